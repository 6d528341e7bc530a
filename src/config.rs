// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{ByteKeyedTable, Error};

/// Default ratio of planned entries to buckets.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.42;

/// Smallest bucket count a table is created with.
pub const MIN_BUCKET_COUNT: usize = 8;

/// Largest bucket count a table is created with.
pub const MAX_BUCKET_COUNT: usize = 1 << 30;

/// Table construction options
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Number of entries the table is planned for
    #[doc(hidden)]
    pub capacity: usize,

    /// Planned ratio of entries to buckets
    #[doc(hidden)]
    pub load_factor: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 0,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl Config {
    /// Initializes a new config for a table that is planned to hold `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Sets the planned number of entries.
    ///
    /// Inserting more entries than planned is allowed, but makes chains longer.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the load factor.
    ///
    /// Lower values use more buckets, and thus more memory, to keep chains short.
    ///
    /// Defaults to 0.42.
    #[must_use]
    pub fn load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Returns the number of buckets a table built from this config will have.
    ///
    /// This is the smallest power of two that is at least `capacity / load_factor`,
    /// but at least [`MIN_BUCKET_COUNT`] and at most [`MAX_BUCKET_COUNT`].
    ///
    /// # Errors
    ///
    /// Returns error if the load factor is not a finite, positive number.
    pub fn bucket_count(&self) -> crate::Result<usize> {
        if !(self.load_factor.is_finite() && self.load_factor > 0.0) {
            return Err(Error::InvalidLoadFactor(self.load_factor));
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "capacities beyond 2^24 are rounded, which only affects sizing"
        )]
        let capacity = self.capacity as f32;

        // NOTE: Float to int casts saturate, so huge ratios end up at MAX_BUCKET_COUNT
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "ratio is positive and truncation matches the sizing rule"
        )]
        let initial = (capacity / self.load_factor) as usize;

        let bucket_count = initial
            .min(MAX_BUCKET_COUNT)
            .next_power_of_two()
            .max(MIN_BUCKET_COUNT);

        Ok(bucket_count)
    }

    /// Creates an empty table.
    ///
    /// # Errors
    ///
    /// Returns error if the load factor is not a finite, positive number.
    pub fn build(self) -> crate::Result<ByteKeyedTable> {
        ByteKeyedTable::with_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn config_bucket_count_floor() -> crate::Result<()> {
        assert_eq!(8, Config::new(0).bucket_count()?);
        assert_eq!(8, Config::new(1).bucket_count()?);
        assert_eq!(8, Config::new(3).bucket_count()?);
        Ok(())
    }

    #[test]
    fn config_bucket_count_default_load_factor() -> crate::Result<()> {
        // 4 / 0.42 = 9.52 -> 9 -> 16
        assert_eq!(16, Config::new(4).bucket_count()?);

        // 100 / 0.42 = 238.09 -> 256
        assert_eq!(256, Config::new(100).bucket_count()?);

        // 1_000 / 0.42 = 2380.95 -> 4096
        assert_eq!(4_096, Config::new(1_000).bucket_count()?);

        Ok(())
    }

    #[test]
    fn config_bucket_count_exact_power_of_two() -> crate::Result<()> {
        assert_eq!(64, Config::new(64).load_factor(1.0).bucket_count()?);
        assert_eq!(128, Config::new(65).load_factor(1.0).bucket_count()?);
        assert_eq!(32, Config::new(16).load_factor(0.5).bucket_count()?);
        Ok(())
    }

    #[test]
    fn config_bucket_count_high_load_factor() -> crate::Result<()> {
        assert_eq!(8, Config::new(100).load_factor(100.0).bucket_count()?);
        Ok(())
    }

    #[test]
    fn config_bucket_count_clamped() -> crate::Result<()> {
        assert_eq!(
            MAX_BUCKET_COUNT,
            Config::new(usize::MAX).bucket_count()?,
        );
        assert_eq!(
            MAX_BUCKET_COUNT,
            Config::new(1).load_factor(f32::MIN_POSITIVE).bucket_count()?,
        );
        Ok(())
    }

    #[test]
    fn config_invalid_load_factor() {
        for load_factor in [0.0, -0.5, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                Config::new(10).load_factor(load_factor).bucket_count(),
                Err(Error::InvalidLoadFactor(_)),
            ));
        }
    }
}
