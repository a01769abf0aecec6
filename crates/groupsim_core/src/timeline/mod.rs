//! Group activity timeline analysis.
//!
//! # Responsibility
//! - Sample group windows at evenly spaced time points into a binary matrix.
//! - Derive overlap pairs, concurrency statistics and activity patterns.
//! - Render and persist plain-text timeline reports.
//!
//! # Invariants
//! - Activity uses inclusive window bounds; overlap uses open intervals.
//! - Output order follows input row order so reports are reproducible.

pub mod matrix;
pub mod overlap;
pub mod report;

pub use matrix::{time_points, ActivityMatrix, ConcurrencyLevel, ConcurrencyStats};
pub use overlap::{active_groups_at, overlapping_groups, OverlapPair};
pub use report::{TimelineReport, DEFAULT_TIMELINE_POINTS};
