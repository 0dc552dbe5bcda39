//! Confirmation table: height -> identifier -> occurrence count.
//!
//! Buckets are created lazily on first observation. Both levels are sharded maps, so
//! unrelated heights and identifiers do not contend on a shared lock.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

type Bucket = DashMap<String, AtomicU64>;

#[derive(Debug, Default)]
pub struct ConfirmationTable {
    buckets: DashMap<u64, Bucket>,
}

impl ConfirmationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `id` at `height` and return the new total.
    pub fn observe(&self, height: u64, id: &str) -> u64 {
        if let Some(bucket) = self.buckets.get(&height) {
            return bump(bucket.value(), id);
        }
        let bucket = self.buckets.entry(height).or_default().downgrade();
        bump(bucket.value(), id)
    }

    /// Current count for `id` at `height` (0 if never observed or pruned).
    pub fn count(&self, height: u64, id: &str) -> u64 {
        let Some(bucket) = self.buckets.get(&height) else {
            return 0;
        };
        let count = bucket.get(id).map(|c| c.load(Ordering::Acquire));
        count.unwrap_or(0)
    }

    /// Drop all buckets at heights <= `height`. Returns the number removed.
    pub fn prune_through(&self, height: u64) -> usize {
        let mut removed = 0;
        self.buckets.retain(|h, _| {
            if *h <= height {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Number of live height buckets.
    pub fn heights(&self) -> usize {
        self.buckets.len()
    }
}

fn bump(bucket: &Bucket, id: &str) -> u64 {
    if let Some(counter) = bucket.get(id) {
        return counter.fetch_add(1, Ordering::AcqRel) + 1;
    }
    let counter = bucket.entry(id.to_owned()).or_default().downgrade();
    counter.fetch_add(1, Ordering::AcqRel) + 1
}
