//! Accepted-height cursor (in-memory, process-wide for one tracker).
//!
//! Starts at 0: the genesis height is always accepted. Only moves forward, one height at a
//! time, through [AcceptedCursor::try_advance].

use std::sync::atomic::{AtomicU64, Ordering};

/// Outcome of an advancement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved from `h - 1` to `h`.
    Accepted,
    /// The cursor was already at or past `h`; the height is closed.
    Closed,
    /// The cursor is below `h - 1`; heights cannot be skipped.
    Gap,
}

/// Cursor: highest accepted height.
#[derive(Debug, Default)]
pub struct AcceptedCursor {
    height: AtomicU64,
}

impl AcceptedCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u64 {
        self.height.load(Ordering::Acquire)
    }

    /// Attempt to accept height `h`. Succeeds only if the cursor is exactly `h - 1`.
    ///
    /// The loop retries while the observed value is still compatible and gives up as soon as
    /// it is not, so it is bounded by the number of concurrent advancers.
    pub fn try_advance(&self, h: u64) -> Advance {
        let Some(prev) = h.checked_sub(1) else {
            return Advance::Closed;
        };
        loop {
            let current = self.height.load(Ordering::Acquire);
            if current >= h {
                return Advance::Closed;
            }
            if current != prev {
                return Advance::Gap;
            }
            if self
                .height
                .compare_exchange(current, h, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return Advance::Accepted;
            }
        }
    }
}
