//! Confirmation tracker: counts candidate identifiers per height and advances the accepted
//! height once a candidate is confirmed.
//!
//! Each identifier in a submitted batch is a candidate for `start_height + index`. Heights at
//! or below the accepted height are skipped, empty identifiers are rejected, and everything
//! else is counted in the [ConfirmationTable]. A confirmed candidate (per the configured
//! [Strategy], [ConfirmationThreshold] by default) is accepted only if its height is the
//! immediate successor of the accepted height; the [AcceptedCursor] makes that decision, so
//! the stale-height skip is only an optimization. Safe to share across threads via `Arc`.

use crate::config::{PruneMode, TrackerConfig};
use crate::cursor::{AcceptedCursor, Advance};
use crate::strategy::{ConfirmationThreshold, Strategy};
use crate::table::ConfirmationTable;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("confirmation threshold must be at least 1 (got {0})")]
    InvalidThreshold(u64),
}

/// One block accepted during a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedBlock {
    pub height: u64,
    pub id: String,
}

/// Result of one [ConfirmationTracker::submit_detailed] call, ready for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// Accepted height read once after the whole batch was processed.
    pub accepted_height: u64,
    /// Blocks this call accepted, in height order.
    pub accepted: Vec<AcceptedBlock>,
    /// Identifiers skipped because their height was already closed.
    pub stale: u64,
    /// Empty identifiers rejected.
    pub empty: u64,
}

/// Snapshot of the tracker's lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrackerStats {
    pub observed: u64,
    pub stale_skipped: u64,
    pub empty_rejected: u64,
    pub accepted: u64,
    /// Confirmed candidates whose height was closed or not yet reachable.
    pub abandoned: u64,
}

#[derive(Debug, Default)]
struct Counters {
    observed: AtomicU64,
    stale_skipped: AtomicU64,
    empty_rejected: AtomicU64,
    accepted: AtomicU64,
    abandoned: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> TrackerStats {
        TrackerStats {
            observed: self.observed.load(Ordering::Relaxed),
            stale_skipped: self.stale_skipped.load(Ordering::Relaxed),
            empty_rejected: self.empty_rejected.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            abandoned: self.abandoned.load(Ordering::Relaxed),
        }
    }
}

/// Builder for the tracker.
pub struct TrackerBuilder {
    strategy: Option<Box<dyn Strategy>>,
    config: TrackerConfig,
}

impl TrackerBuilder {
    pub fn new() -> Self {
        Self {
            strategy: None,
            config: TrackerConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `ConfirmationThreshold(k)`; `k` is validated at build. Ignored if a strategy is set.
    pub fn threshold(mut self, k: u64) -> Self {
        self.config.threshold = k;
        self
    }

    /// Set a custom confirmation strategy. Takes precedence over the configured threshold.
    pub fn strategy(mut self, s: impl Strategy + 'static) -> Self {
        self.strategy = Some(Box::new(s));
        self
    }

    pub fn prune(mut self, mode: PruneMode) -> Self {
        self.config.prune = mode;
        self
    }

    pub fn build(self) -> Result<ConfirmationTracker, TrackerError> {
        let strategy = match self.strategy {
            Some(s) => s,
            None => {
                if self.config.threshold == 0 {
                    return Err(TrackerError::InvalidThreshold(0));
                }
                Box::new(ConfirmationThreshold(self.config.threshold))
            }
        };
        Ok(ConfirmationTracker {
            strategy,
            prune: self.config.prune,
            table: ConfirmationTable::new(),
            cursor: AcceptedCursor::new(),
            counters: Counters::default(),
        })
    }
}

impl Default for TrackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ConfirmationTracker {
    strategy: Box<dyn Strategy>,
    prune: PruneMode,
    table: ConfirmationTable,
    cursor: AcceptedCursor,
    counters: Counters,
}

impl ConfirmationTracker {
    /// Tracker with the default configuration (threshold 3, prune on advance).
    pub fn new() -> Self {
        Self {
            strategy: Box::new(ConfirmationThreshold::default()),
            prune: PruneMode::default(),
            table: ConfirmationTable::new(),
            cursor: AcceptedCursor::new(),
            counters: Counters::default(),
        }
    }

    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::new()
    }

    /// Submit candidates for consecutive heights starting at `start_height` and return the
    /// accepted height after the whole batch.
    pub fn submit<S: AsRef<str>>(&self, start_height: u64, ids: &[S]) -> u64 {
        self.submit_detailed(start_height, ids).accepted_height
    }

    /// Like [Self::submit], also reporting what this call accepted, skipped and rejected.
    pub fn submit_detailed<S: AsRef<str>>(&self, start_height: u64, ids: &[S]) -> Submission {
        let mut accepted = Vec::new();
        let mut stale = 0;
        let mut empty = 0;

        for (offset, id) in ids.iter().enumerate() {
            let Some(height) = u64::try_from(offset)
                .ok()
                .and_then(|o| start_height.checked_add(o))
            else {
                break;
            };
            let id = id.as_ref();

            if height <= self.cursor.get() {
                stale += 1;
                trace!(height, id, "height already closed, skipping");
                continue;
            }
            if id.is_empty() {
                empty += 1;
                trace!(height, "empty identifier rejected");
                continue;
            }

            let count = self.table.observe(height, id);
            self.counters.observed.fetch_add(1, Ordering::Relaxed);
            if !self.strategy.is_confirmed(count) {
                continue;
            }

            match self.cursor.try_advance(height) {
                Advance::Accepted => {
                    self.counters.accepted.fetch_add(1, Ordering::Relaxed);
                    debug!(height, id, count, "block accepted");
                    if self.prune == PruneMode::OnAdvance {
                        self.table.prune_through(height);
                    }
                    accepted.push(AcceptedBlock {
                        height,
                        id: id.to_owned(),
                    });
                }
                outcome => {
                    self.counters.abandoned.fetch_add(1, Ordering::Relaxed);
                    trace!(height, id, count, ?outcome, "confirmed but not accepted");
                }
            }
        }

        self.counters.stale_skipped.fetch_add(stale, Ordering::Relaxed);
        self.counters.empty_rejected.fetch_add(empty, Ordering::Relaxed);

        Submission {
            accepted_height: self.cursor.get(),
            accepted,
            stale,
            empty,
        }
    }

    /// Highest accepted height (0 = genesis only).
    pub fn accepted_height(&self) -> u64 {
        self.cursor.get()
    }

    /// Occurrences counted so far for `id` at `height`.
    pub fn count(&self, height: u64, id: &str) -> u64 {
        self.table.count(height, id)
    }

    /// Number of heights with live confirmation buckets.
    pub fn tracked_heights(&self) -> usize {
        self.table.heights()
    }

    /// Drop buckets for heights at or below the accepted height. Returns the number removed.
    pub fn prune(&self) -> usize {
        let through = self.cursor.get();
        let removed = self.table.prune_through(through);
        debug!(through, removed, "pruned closed heights");
        removed
    }

    pub fn stats(&self) -> TrackerStats {
        self.counters.snapshot()
    }
}

impl Default for ConfirmationTracker {
    fn default() -> Self {
        Self::new()
    }
}
