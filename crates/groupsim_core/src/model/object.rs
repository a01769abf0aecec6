//! Simulated objects and their trajectory samples.
//!
//! # Invariants
//! - `object_id` is unique within one simulation run and assigned from 1.
//! - `travel_distance` equals `|end - start|` up to rounding and is never negative.
//! - Records are immutable once a simulation stage has produced them.

use crate::model::group::Category;
use crate::model::position::Position3;
use serde::{Deserialize, Serialize};

/// One object drawn around its group centerpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialObject {
    pub object_id: u64,
    pub group_id: i64,
    pub category: Category,
    pub start: Position3,
    pub end: Position3,
    pub travel_distance: f64,
}

/// Interpolated object position at one time value (percent of timeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub object_id: u64,
    pub group_id: i64,
    pub category: Category,
    pub time_percent: f64,
    pub position: Position3,
}
