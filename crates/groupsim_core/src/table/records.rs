//! Column layouts and row mapping for group, object and trajectory tables.

use crate::model::group::{Category, ScheduledGroup, SpatialGroup};
use crate::model::object::{SpatialObject, TrajectorySample};
use crate::model::position::Position3;
use crate::table::csv::{CsvRecord, CsvTable, TableError, TableResult};
use std::path::Path;

/// Columns required for scheduling-only use.
pub const SCHEDULE_COLUMNS: [&str; 4] = ["group_id", "group_size", "start_percent", "stop_percent"];

/// Columns required for spatial simulation.
pub const SPATIAL_COLUMNS: [&str; 11] = [
    "group_id",
    "group_size",
    "start_percent",
    "stop_percent",
    "center_north",
    "center_east",
    "center_down",
    "spread_std",
    "mean_travel_distance",
    "travel_std",
    "category",
];

pub const OBJECT_COLUMNS: [&str; 10] = [
    "object_id",
    "group_id",
    "category",
    "start_north",
    "start_east",
    "start_down",
    "end_north",
    "end_east",
    "end_down",
    "travel_distance",
];

pub const TRAJECTORY_COLUMNS: [&str; 7] = [
    "object_id",
    "group_id",
    "category",
    "time_percent",
    "north",
    "east",
    "down",
];

pub fn load_scheduled_groups(path: impl AsRef<Path>) -> TableResult<Vec<ScheduledGroup>> {
    parse_scheduled_groups(&CsvTable::from_path(path)?)
}

pub fn load_spatial_groups(path: impl AsRef<Path>) -> TableResult<Vec<SpatialGroup>> {
    parse_spatial_groups(&CsvTable::from_path(path)?)
}

pub fn load_trajectory_samples(path: impl AsRef<Path>) -> TableResult<Vec<TrajectorySample>> {
    parse_trajectory_samples(&CsvTable::from_path(path)?)
}

pub fn parse_scheduled_groups(table: &CsvTable) -> TableResult<Vec<ScheduledGroup>> {
    table.require_columns(&SCHEDULE_COLUMNS)?;
    table.map_records(|record| {
        Ok(ScheduledGroup::new(
            record.i64("group_id")?,
            record.i64("group_size")?,
            record.f64("start_percent")?,
            record.f64("stop_percent")?,
        ))
    })
}

pub fn parse_spatial_groups(table: &CsvTable) -> TableResult<Vec<SpatialGroup>> {
    table.require_columns(&SPATIAL_COLUMNS)?;
    table.map_records(|record| {
        Ok(SpatialGroup {
            group_id: record.i64("group_id")?,
            group_size: record.i64("group_size")?,
            start_percent: record.f64("start_percent")?,
            stop_percent: record.f64("stop_percent")?,
            center: Position3::new(
                record.f64("center_north")?,
                record.f64("center_east")?,
                record.f64("center_down")?,
            ),
            spread_std: record.f64("spread_std")?,
            mean_travel_distance: record.f64("mean_travel_distance")?,
            travel_std: record.f64("travel_std")?,
            category: record.i64("category")?,
        })
    })
}

pub fn parse_trajectory_samples(table: &CsvTable) -> TableResult<Vec<TrajectorySample>> {
    table.require_columns(&TRAJECTORY_COLUMNS)?;
    table.map_records(|record| {
        Ok(TrajectorySample {
            object_id: record.u64("object_id")?,
            group_id: record.i64("group_id")?,
            category: parse_category(record)?,
            time_percent: record.f64("time_percent")?,
            position: Position3::new(
                record.f64("north")?,
                record.f64("east")?,
                record.f64("down")?,
            ),
        })
    })
}

fn parse_category(record: &CsvRecord<'_>) -> TableResult<Category> {
    let code = record.i64("category")?;
    Category::from_code(code).ok_or_else(|| TableError::InvalidValue {
        line: record.line(),
        column: "category".to_string(),
        value: record.raw("category").to_string(),
        expected: "a category of 1, 2, or 3",
    })
}

pub fn scheduled_group_row(group: &ScheduledGroup) -> Vec<String> {
    vec![
        group.group_id.to_string(),
        group.group_size.to_string(),
        group.start_percent.to_string(),
        group.stop_percent.to_string(),
    ]
}

/// Row in `SPATIAL_COLUMNS` order.
pub fn group_row(group: &SpatialGroup) -> Vec<String> {
    vec![
        group.group_id.to_string(),
        group.group_size.to_string(),
        group.start_percent.to_string(),
        group.stop_percent.to_string(),
        group.center.north.to_string(),
        group.center.east.to_string(),
        group.center.down.to_string(),
        group.spread_std.to_string(),
        group.mean_travel_distance.to_string(),
        group.travel_std.to_string(),
        group.category.to_string(),
    ]
}

/// Row in `OBJECT_COLUMNS` order.
pub fn object_row(object: &SpatialObject) -> Vec<String> {
    vec![
        object.object_id.to_string(),
        object.group_id.to_string(),
        object.category.to_string(),
        object.start.north.to_string(),
        object.start.east.to_string(),
        object.start.down.to_string(),
        object.end.north.to_string(),
        object.end.east.to_string(),
        object.end.down.to_string(),
        object.travel_distance.to_string(),
    ]
}

/// Row in `TRAJECTORY_COLUMNS` order.
pub fn trajectory_row(sample: &TrajectorySample) -> Vec<String> {
    vec![
        sample.object_id.to_string(),
        sample.group_id.to_string(),
        sample.category.to_string(),
        sample.time_percent.to_string(),
        sample.position.north.to_string(),
        sample.position.east.to_string(),
        sample.position.down.to_string(),
    ]
}
