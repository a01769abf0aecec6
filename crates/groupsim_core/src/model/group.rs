//! Group domain model.
//!
//! # Responsibility
//! - Define the scheduling projection (`ScheduledGroup`) and the full spatial
//!   group record (`SpatialGroup`).
//! - Validate spatial group tables before any simulation stage runs.
//!
//! # Invariants
//! - Activation windows are inclusive on both ends.
//! - A window with `start_percent == stop_percent` is invalid.
//! - Validation reports only the first violated rule; it never corrects data.

use crate::model::position::Position3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lower bound of the percent time axis.
pub const MIN_PERCENT: f64 = 0.0;
/// Upper bound of the percent time axis.
pub const MAX_PERCENT: f64 = 100.0;

/// Object shape category shared by a group and all of its objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Category {
    One,
    Two,
    Three,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::One, Category::Two, Category::Three];

    /// Integer code used in CSV tables.
    pub fn code(self) -> i64 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }
}

impl From<Category> for i64 {
    fn from(value: Category) -> Self {
        value.code()
    }
}

impl TryFrom<i64> for Category {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_code(value).ok_or_else(|| format!("category must be 1, 2, or 3, got {value}"))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Scheduling-only view of a group: identity, size and activation window.
///
/// Sizes are signed so that invalid input survives loading and is rejected by
/// validation with a precise message instead of a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGroup {
    pub group_id: i64,
    pub group_size: i64,
    pub start_percent: f64,
    pub stop_percent: f64,
}

impl ScheduledGroup {
    pub fn new(group_id: i64, group_size: i64, start_percent: f64, stop_percent: f64) -> Self {
        Self {
            group_id,
            group_size,
            start_percent,
            stop_percent,
        }
    }

    /// Returns whether `time` lies inside the window, both bounds inclusive.
    pub fn contains_time(&self, time: f64) -> bool {
        self.start_percent <= time && time <= self.stop_percent
    }

    /// Open-interval intersection test; windows that only touch do not overlap.
    pub fn overlaps(&self, other: &ScheduledGroup) -> bool {
        self.start_percent < other.stop_percent && other.start_percent < self.stop_percent
    }

    pub fn duration_percent(&self) -> f64 {
        self.stop_percent - self.start_percent
    }
}

/// Full group record used by the spatial simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialGroup {
    pub group_id: i64,
    pub group_size: i64,
    pub start_percent: f64,
    pub stop_percent: f64,
    /// Centerpoint of the initial object cloud.
    pub center: Position3,
    /// Standard deviation of start positions around `center`, per axis.
    pub spread_std: f64,
    pub mean_travel_distance: f64,
    pub travel_std: f64,
    /// Raw category code; validated into [`Category`] by [`validate_spatial_groups`].
    pub category: i64,
}

impl SpatialGroup {
    /// Projects the scheduling fields.
    pub fn schedule(&self) -> ScheduledGroup {
        ScheduledGroup::new(
            self.group_id,
            self.group_size,
            self.start_percent,
            self.stop_percent,
        )
    }

    /// Category after validation; `None` for codes outside 1..=3.
    pub fn category(&self) -> Option<Category> {
        Category::from_code(self.category)
    }
}

/// Constraint violation detected while validating a spatial group table.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupValidationError {
    InvalidCategory { group_id: i64, value: i64 },
    NonPositiveSpread { group_id: i64, value: f64 },
    NegativeMeanTravel { group_id: i64, value: f64 },
    NonPositiveTravelStd { group_id: i64, value: f64 },
    NonPositiveSize { group_id: i64, value: i64 },
    StartOutOfRange { group_id: i64, value: f64 },
    StopOutOfRange { group_id: i64, value: f64 },
    StopNotAfterStart { group_id: i64, start: f64, stop: f64 },
    NonFiniteCenter { group_id: i64 },
    NonPositiveGroupId(i64),
    DuplicateGroupId(i64),
}

impl GroupValidationError {
    /// Name of the offending input column.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidCategory { .. } => "category",
            Self::NonPositiveSpread { .. } => "spread_std",
            Self::NegativeMeanTravel { .. } => "mean_travel_distance",
            Self::NonPositiveTravelStd { .. } => "travel_std",
            Self::NonPositiveSize { .. } => "group_size",
            Self::StartOutOfRange { .. } => "start_percent",
            Self::StopOutOfRange { .. } | Self::StopNotAfterStart { .. } => "stop_percent",
            Self::NonFiniteCenter { .. } => "center",
            Self::NonPositiveGroupId(_) | Self::DuplicateGroupId(_) => "group_id",
        }
    }
}

impl Display for GroupValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCategory { group_id, value } => write!(
                f,
                "Category must be 1, 2, or 3 (group {group_id} has category {value})"
            ),
            Self::NonPositiveSpread { group_id, value } => write!(
                f,
                "spread_std must be positive (group {group_id} has spread_std {value})"
            ),
            Self::NegativeMeanTravel { group_id, value } => write!(
                f,
                "mean_travel_distance must be non-negative (group {group_id} has mean_travel_distance {value})"
            ),
            Self::NonPositiveTravelStd { group_id, value } => write!(
                f,
                "travel_std must be positive (group {group_id} has travel_std {value})"
            ),
            Self::NonPositiveSize { group_id, value } => write!(
                f,
                "group_size must be positive (group {group_id} has group_size {value})"
            ),
            Self::StartOutOfRange { group_id, value } => write!(
                f,
                "start_percent must be between 0 and 100 (group {group_id} has start_percent {value})"
            ),
            Self::StopOutOfRange { group_id, value } => write!(
                f,
                "stop_percent must be between 0 and 100 (group {group_id} has stop_percent {value})"
            ),
            Self::StopNotAfterStart {
                group_id,
                start,
                stop,
            } => write!(
                f,
                "stop_percent must be greater than start_percent (group {group_id}: start {start}, stop {stop})"
            ),
            Self::NonFiniteCenter { group_id } => {
                write!(f, "center coordinates must be finite (group {group_id})")
            }
            Self::NonPositiveGroupId(group_id) => {
                write!(f, "group_id must be positive (got {group_id})")
            }
            Self::DuplicateGroupId(group_id) => write!(f, "group_id {group_id} is not unique"),
        }
    }
}

impl Error for GroupValidationError {}

/// Validates a spatial group table.
///
/// Each rule is checked across every group before the next rule runs, so the
/// reported error is the first rule (in the order below) that any group breaks:
/// category, spread, mean travel, travel std, size, start range, stop range,
/// window ordering, finite center, positive ids, unique ids.
///
/// NaN and infinite inputs fail the rule of the field that holds them.
pub fn validate_spatial_groups(groups: &[SpatialGroup]) -> Result<(), GroupValidationError> {
    for group in groups {
        if group.category().is_none() {
            return Err(GroupValidationError::InvalidCategory {
                group_id: group.group_id,
                value: group.category,
            });
        }
    }
    for group in groups {
        if !(group.spread_std.is_finite() && group.spread_std > 0.0) {
            return Err(GroupValidationError::NonPositiveSpread {
                group_id: group.group_id,
                value: group.spread_std,
            });
        }
    }
    for group in groups {
        if !(group.mean_travel_distance.is_finite() && group.mean_travel_distance >= 0.0) {
            return Err(GroupValidationError::NegativeMeanTravel {
                group_id: group.group_id,
                value: group.mean_travel_distance,
            });
        }
    }
    for group in groups {
        if !(group.travel_std.is_finite() && group.travel_std > 0.0) {
            return Err(GroupValidationError::NonPositiveTravelStd {
                group_id: group.group_id,
                value: group.travel_std,
            });
        }
    }
    for group in groups {
        if group.group_size <= 0 {
            return Err(GroupValidationError::NonPositiveSize {
                group_id: group.group_id,
                value: group.group_size,
            });
        }
    }
    for group in groups {
        if !in_percent_range(group.start_percent) {
            return Err(GroupValidationError::StartOutOfRange {
                group_id: group.group_id,
                value: group.start_percent,
            });
        }
    }
    for group in groups {
        if !in_percent_range(group.stop_percent) {
            return Err(GroupValidationError::StopOutOfRange {
                group_id: group.group_id,
                value: group.stop_percent,
            });
        }
    }
    for group in groups {
        if group.stop_percent <= group.start_percent {
            return Err(GroupValidationError::StopNotAfterStart {
                group_id: group.group_id,
                start: group.start_percent,
                stop: group.stop_percent,
            });
        }
    }
    for group in groups {
        if !group.center.is_finite() {
            return Err(GroupValidationError::NonFiniteCenter {
                group_id: group.group_id,
            });
        }
    }

    for group in groups {
        if group.group_id <= 0 {
            return Err(GroupValidationError::NonPositiveGroupId(group.group_id));
        }
    }

    let mut seen = BTreeSet::new();
    for group in groups {
        if !seen.insert(group.group_id) {
            return Err(GroupValidationError::DuplicateGroupId(group.group_id));
        }
    }

    Ok(())
}

fn in_percent_range(value: f64) -> bool {
    (MIN_PERCENT..=MAX_PERCENT).contains(&value)
}
