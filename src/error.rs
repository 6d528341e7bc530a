// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::Slice;

/// Represents errors that can occur while building a table
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The key already exists in the table
    ///
    /// Carries the rejected key.
    DuplicateKey(Slice),

    /// The load factor is not a finite, positive number
    InvalidLoadFactor(f32),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey(key) => {
                write!(
                    f,
                    "ByteKeyedTableError: key already exists: {:?}",
                    String::from_utf8_lossy(key),
                )
            }
            Self::InvalidLoadFactor(load_factor) => {
                write!(f, "ByteKeyedTableError: invalid load factor: {load_factor}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Table result
pub type Result<T> = std::result::Result<T, Error>;
