// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

mod chain;
pub mod iter;


use crate::{hash::fnv1a_32, Config, Error, Slice};
use arc_swap::ArcSwapOption;
use chain::{Chain, Entry};
use iter::Iter;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Cuts the key range `[offset, offset + count)` out of `buffer`.
///
/// # Panics
///
/// Panics if the range is out of bounds of `buffer`.
#[inline]
pub(crate) fn key_range(buffer: &[u8], offset: usize, count: usize) -> &[u8] {
    let Some(range) = offset
        .checked_add(count)
        .and_then(|end| buffer.get(offset..end))
    else {
        panic!(
            "key range [{offset}, {offset} + {count}) out of bounds of buffer with length {}",
            buffer.len(),
        );
    };

    range
}

fn same_chain(a: &Option<Arc<Chain>>, b: &Option<Arc<Chain>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

/// Bucket occupancy of a table
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Number of entries in the table
    pub entry_count: usize,

    /// Number of buckets holding at least one entry
    pub occupied_buckets: usize,

    /// Number of entries in the longest chain
    pub max_chain_len: usize,
}

/// A write-once, read-many hash table mapping byte keys to `i32` values
///
/// The number of buckets is fixed when the table is created. Keys are hashed
/// using 32-bit FNV-1a, and colliding keys are chained inside their bucket.
///
/// Inserting takes `&self`: each insert replaces the affected chain as a whole,
/// so lookups may run concurrently with it and never see a partial chain.
/// Inserts are meant to happen in a single construction phase.
pub struct ByteKeyedTable {
    buckets: Box<[ArcSwapOption<Chain>]>,
    bucket_mask: usize,
    len: AtomicUsize,
}

impl ByteKeyedTable {
    /// Creates an empty table planned to hold `capacity` entries,
    /// using the default load factor of 0.42.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let bucket_count = Config::new(capacity)
            .bucket_count()
            .unwrap_or(crate::MIN_BUCKET_COUNT);

        Self::with_bucket_count(bucket_count)
    }

    /// Creates an empty table planned to hold `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns error if the load factor is not a finite, positive number.
    pub fn with_load_factor(capacity: usize, load_factor: f32) -> crate::Result<Self> {
        Self::with_config(Config::new(capacity).load_factor(load_factor))
    }

    /// Creates an empty table from the given config.
    ///
    /// # Errors
    ///
    /// Returns error if the load factor is not a finite, positive number.
    pub fn with_config(config: Config) -> crate::Result<Self> {
        let bucket_count = config.bucket_count()?;

        log::trace!(
            "Creating table for {} entries (load factor={}) with {bucket_count} buckets",
            config.capacity,
            config.load_factor,
        );

        Ok(Self::with_bucket_count(bucket_count))
    }

    fn with_bucket_count(bucket_count: usize) -> Self {
        debug_assert!(bucket_count.is_power_of_two());

        let buckets = (0..bucket_count)
            .map(|_| ArcSwapOption::empty())
            .collect::<Box<[_]>>();

        Self {
            buckets,
            bucket_mask: bucket_count - 1,
            len: AtomicUsize::new(0),
        }
    }

    #[inline]
    #[expect(
        clippy::indexing_slicing,
        reason = "masking with bucket_mask keeps the index in bounds"
    )]
    fn bucket(&self, hash: u32) -> &ArcSwapOption<Chain> {
        &self.buckets[(hash as usize) & self.bucket_mask]
    }

    /// Inserts a key-value pair.
    ///
    /// The key bytes are copied into the table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if the key already exists, in which case
    /// the table is left untouched.
    pub fn insert<K: AsRef<[u8]>>(&self, key: K, value: i32) -> crate::Result<()> {
        let key = key.as_ref();
        let bucket = self.bucket(fnv1a_32(key));

        let entry = Entry {
            key: Slice::from(key),
            value,
        };

        let mut current = bucket.load();

        loop {
            let chain = match current.as_deref() {
                None => Chain::single(entry.clone()),
                Some(chain) if chain.contains(key) => {
                    log::debug!(
                        "Rejecting duplicate key {:?}",
                        String::from_utf8_lossy(key),
                    );
                    return Err(Error::DuplicateKey(entry.key));
                }
                Some(chain) => chain.appended(entry.clone()),
            };

            // NOTE: Only fails if another insert replaced the chain in the meantime
            let prev = bucket.compare_and_swap(&*current, Some(Arc::new(chain)));

            if same_chain(&current, &prev) {
                break;
            }

            current = prev;
        }

        self.len.fetch_add(1, Ordering::Relaxed);

        Ok(())
    }

    /// Inserts a text key, stored as its UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if the key already exists.
    pub fn insert_str(&self, key: &str, value: i32) -> crate::Result<()> {
        self.insert(key.as_bytes(), value)
    }

    /// Returns the value of the key found at `buffer[offset..offset + count]`.
    ///
    /// Never allocates.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds of `buffer`.
    #[must_use]
    #[inline]
    pub fn get_range(&self, buffer: &[u8], offset: usize, count: usize) -> Option<i32> {
        self.get(key_range(buffer, offset, count))
    }

    /// Returns the value of the given key.
    ///
    /// Never allocates.
    #[must_use]
    #[inline]
    pub fn get(&self, key: &[u8]) -> Option<i32> {
        let chain = self.bucket(fnv1a_32(key)).load();
        chain.as_deref()?.find(key)
    }

    /// Returns `true` if the table contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the bucket occupancy of the table.
    ///
    /// Only meant for diagnostics, as it visits every bucket.
    #[must_use]
    pub fn stats(&self) -> TableStats {
        self.buckets
            .iter()
            .filter_map(|bucket| bucket.load_full())
            .fold(TableStats::default(), |mut stats, chain| {
                stats.entry_count += chain.len();
                stats.occupied_buckets += 1;
                stats.max_chain_len = stats.max_chain_len.max(chain.len());
                stats
            })
    }

    /// Iterates over all entries, decoding keys as (lossy) UTF-8.
    ///
    /// Entries are yielded bucket by bucket, so the order is unrelated
    /// to the insertion order and should not be relied upon.
    ///
    /// Only meant for debugging and tests.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.buckets)
    }
}

impl std::fmt::Debug for ByteKeyedTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a ByteKeyedTable {
    type Item = (String, i32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
