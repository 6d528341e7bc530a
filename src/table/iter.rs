// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::chain::Chain;
use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// Debug iterator over the entries of a [`crate::ByteKeyedTable`]
///
/// Yields keys decoded as (lossy) UTF-8, in bucket order.
pub struct Iter<'a> {
    buckets: std::slice::Iter<'a, ArcSwapOption<Chain>>,
    chain: Option<Arc<Chain>>,
    idx: usize,
}

impl<'a> Iter<'a> {
    pub(super) fn new(buckets: &'a [ArcSwapOption<Chain>]) -> Self {
        Self {
            buckets: buckets.iter(),
            chain: None,
            idx: 0,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = (String, i32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self
                .chain
                .as_ref()
                .and_then(|chain| chain.entries().get(self.idx))
            {
                self.idx += 1;

                let key = String::from_utf8_lossy(&entry.key).into_owned();
                return Some((key, entry.value));
            }

            // NOTE: Each chain is snapshotted when its bucket is reached
            self.chain = self.buckets.next()?.load_full();
            self.idx = 0;
        }
    }
}
