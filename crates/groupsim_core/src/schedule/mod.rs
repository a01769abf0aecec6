//! Group schedule validation and summary.
//!
//! # Responsibility
//! - Check scheduling tables (id, size, window) against hard constraints.
//! - Derive aggregate summaries from a validated table.
//!
//! # Invariants
//! - Checks run in a fixed order and stop at the first violation.
//! - Validation never rewrites input data.

pub mod summary;
pub mod validator;

pub use summary::{
    minute_breakdown, render_group_table, save_schedule_summary, total_participants, GroupMinutes,
    ScheduleSummary,
};
pub use validator::{validate_schedule, ScheduleValidationError, MAX_GROUPS};
