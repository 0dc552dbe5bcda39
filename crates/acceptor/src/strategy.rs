//! Confirmation rule: when an occurrence count is enough to attempt acceptance.

/// Defines when a candidate has been observed often enough to be considered for acceptance.
pub trait Strategy: Send + Sync {
    /// Returns true if `count` occurrences of a (height, identifier) pair confirm it.
    fn is_confirmed(&self, count: u64) -> bool;
}

/// Threshold strategy: confirmed when `count >= K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationThreshold(pub u64);

impl ConfirmationThreshold {
    pub const DEFAULT: u64 = 3;
}

impl Default for ConfirmationThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl Strategy for ConfirmationThreshold {
    fn is_confirmed(&self, count: u64) -> bool {
        count >= self.0
    }
}
