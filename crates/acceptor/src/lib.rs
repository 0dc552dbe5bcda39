//! Concurrent confirmation tracking for candidate block identifiers.
//!
//! - **ConfirmationTracker**: counts how often each identifier is submitted for a height and
//!   accepts it once the configured [Strategy] (e.g. [ConfirmationThreshold]) confirms it,
//!   advancing the accepted height one height at a time.
//! - **AcceptedCursor**: the atomic accepted-height cursor; the only place acceptance is decided.
//! - **ConfirmationTable**: lazily created per-height counters, optionally pruned once closed.

pub mod config;
pub mod cursor;
pub mod strategy;
pub mod table;
pub mod tracker;

pub use config::{PruneMode, TrackerConfig};
pub use cursor::{AcceptedCursor, Advance};
pub use strategy::{ConfirmationThreshold, Strategy};
pub use table::ConfirmationTable;
pub use tracker::{
    AcceptedBlock, ConfirmationTracker, Submission, TrackerBuilder, TrackerError, TrackerStats,
};
