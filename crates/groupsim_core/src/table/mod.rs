//! Delimited table input and row shaping.
//!
//! # Responsibility
//! - Read comma-delimited tables with a header row.
//! - Map rows to group and trajectory records, failing fast on bad input.
//! - Render domain records back to CSV rows with the external column layout.
//!
//! # Invariants
//! - A missing required column is a load error naming every missing column.
//! - No partial table is returned when any row fails to parse.

pub mod csv;
pub mod records;

pub use csv::{CsvRecord, CsvTable, TableError, TableResult};
pub use records::{
    group_row, load_scheduled_groups, load_spatial_groups, load_trajectory_samples, object_row,
    parse_scheduled_groups, parse_spatial_groups, parse_trajectory_samples, scheduled_group_row,
    trajectory_row, OBJECT_COLUMNS, SCHEDULE_COLUMNS, SPATIAL_COLUMNS, TRAJECTORY_COLUMNS,
};
