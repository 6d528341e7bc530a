// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::Slice;

/// A key and the value it maps to
#[derive(Clone, Debug)]
pub struct Entry {
    pub(crate) key: Slice,
    pub(crate) value: i32,
}

/// Entries sharing one bucket, in insertion order
///
/// A chain is never modified after construction, inserting into a bucket
/// creates a new chain instead.
#[derive(Debug)]
pub struct Chain(Box<[Entry]>);

impl Chain {
    /// Creates a chain holding a single entry.
    #[must_use]
    pub fn single(entry: Entry) -> Self {
        Self(Box::new([entry]))
    }

    /// Returns a copy of `self` with `entry` appended.
    #[must_use]
    pub fn appended(&self, entry: Entry) -> Self {
        let mut entries = Vec::with_capacity(self.0.len() + 1);
        entries.extend_from_slice(&self.0);
        entries.push(entry);
        Self(entries.into_boxed_slice())
    }

    /// Returns the number of entries in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.0
    }

    /// Returns the value of the entry whose key equals `key`.
    #[must_use]
    #[inline]
    pub fn find(&self, key: &[u8]) -> Option<i32> {
        let (first, rest) = self.0.split_first()?;

        // NOTE: Most chains have a single entry
        if key_eq(&first.key, key) {
            return Some(first.value);
        }

        rest.iter()
            .find(|entry| key_eq(&entry.key, key))
            .map(|entry| entry.value)
    }

    /// Returns `true` if the chain contains an entry with the given key.
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.0.iter().any(|entry| key_eq(&entry.key, key))
    }
}

/// Compares a stored key against a key range of a caller's buffer.
///
/// The range was bounds checked once when it was cut from the buffer,
/// so the comparison itself is a length check followed by a `memcmp`.
#[inline]
fn key_eq(stored: &[u8], key: &[u8]) -> bool {
    stored.len() == key.len() && stored == key
}
