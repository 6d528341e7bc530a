// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A write-once, read-many hash table that maps byte-sequence keys to `i32` values.
//!
//! ##### About
//!
//! This crate exports a [`ByteKeyedTable`], which is built for one job: resolving
//! field names to field indexes inside a binary decoder. Lookups are performed
//! directly on a byte range of the decode buffer, so the key never has to be
//! copied or validated as UTF-8 first, and a lookup never allocates.
//!
//! The table is sized once, at construction, from the expected number of keys and a
//! load factor (0.42 by default). It never rehashes or grows; inserting more keys than
//! planned only makes bucket chains longer.
//!
//! Keys are hashed with 32-bit FNV-1a, see [`hash`].
//!
//! ```
//! use byte_keyed_table::ByteKeyedTable;
//!
//! let table = ByteKeyedTable::new(3);
//! table.insert_str("id", 0)?;
//! table.insert_str("name", 1)?;
//! table.insert_str("tags", 2)?;
//!
//! // Look up a key that lives somewhere inside a larger buffer
//! let buffer = b"\xa4name\xa2id";
//! assert_eq!(Some(1), table.get_range(buffer, 1, 4));
//! assert_eq!(Some(0), table.get_range(buffer, 6, 2));
//!
//! assert_eq!(None, table.get(b"unknown"));
//! assert!(table.insert_str("id", 99).is_err());
//! assert_eq!(Some(0), table.get(b"id"));
//! #
//! # Ok::<(), byte_keyed_table::Error>(())
//! ```
//!
//! ##### Concurrency
//!
//! Every bucket holds an immutable chain of entries. An insert never touches an
//! existing chain; it builds a copy that is one entry longer and atomically swaps it
//! into the bucket. Readers are lock-free and only ever observe a complete chain,
//! so the table can be shared (e.g. in an `Arc` or a `static`) and queried from any
//! number of threads.

#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]
#![warn(clippy::redundant_feature_names)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod config;
mod error;

pub mod hash;

mod slice;
mod table;

pub use {
    config::{Config, DEFAULT_LOAD_FACTOR, MAX_BUCKET_COUNT, MIN_BUCKET_COUNT},
    error::{Error, Result},
    slice::Slice,
    table::{iter::Iter, ByteKeyedTable, TableStats},
};
