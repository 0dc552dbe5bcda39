//! Tracker configuration.

use crate::strategy::ConfirmationThreshold;

/// When to drop confirmation buckets for heights that can no longer be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruneMode {
    /// Keep every bucket; memory grows with the number of distinct heights observed.
    Never,
    /// After each successful advancement to `h`, drop buckets at heights <= `h`.
    #[default]
    OnAdvance,
}

/// Tracker configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Occurrences required before a candidate may be accepted.
    pub threshold: u64,
    /// Eviction of closed heights.
    pub prune: PruneMode,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            threshold: ConfirmationThreshold::DEFAULT,
            prune: PruneMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_config_default() {
        let c = TrackerConfig::default();
        assert_eq!(c.threshold, 3);
        assert_eq!(c.prune, PruneMode::OnAdvance);
    }
}
