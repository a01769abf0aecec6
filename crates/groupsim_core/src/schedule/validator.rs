//! Scheduling constraint checks.

use crate::model::group::{ScheduledGroup, MAX_PERCENT, MIN_PERCENT};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum number of groups a schedule may contain.
pub const MAX_GROUPS: usize = 5;

/// First constraint violated by a scheduling table.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleValidationError {
    TooManyGroups { count: usize },
    StartBelowMin { group_id: i64, start: f64 },
    StopAboveMax { group_id: i64, stop: f64 },
    StartNotBeforeStop { group_id: i64, start: f64, stop: f64 },
    NonPositiveSize { group_id: i64, size: i64 },
}

impl Display for ScheduleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyGroups { count } => {
                write!(f, "Maximum {MAX_GROUPS} groups allowed, got {count}")
            }
            Self::StartBelowMin { group_id, start } => write!(
                f,
                "Start times must be >= {MIN_PERCENT} (group {group_id} has start {start})"
            ),
            Self::StopAboveMax { group_id, stop } => write!(
                f,
                "Stop times must be <= {MAX_PERCENT} (group {group_id} has stop {stop})"
            ),
            Self::StartNotBeforeStop {
                group_id,
                start,
                stop,
            } => write!(
                f,
                "Start time must be before stop time for all groups (group {group_id}: start {start}, stop {stop})"
            ),
            Self::NonPositiveSize { group_id, size } => write!(
                f,
                "Group size must be positive (group {group_id} has size {size})"
            ),
        }
    }
}

impl Error for ScheduleValidationError {}

/// Validates a scheduling table.
///
/// Order: group count, start lower bound, stop upper bound, window ordering,
/// positive size. Each rule is evaluated over the whole table before the
/// next one.
pub fn validate_schedule(groups: &[ScheduledGroup]) -> Result<(), ScheduleValidationError> {
    let result = check_rules(groups);
    match &result {
        Ok(()) => info!(
            "event=schedule_validate module=schedule status=ok groups={}",
            groups.len()
        ),
        Err(err) => warn!(
            "event=schedule_validate module=schedule status=rejected groups={} reason={}",
            groups.len(),
            err
        ),
    }
    result
}

fn check_rules(groups: &[ScheduledGroup]) -> Result<(), ScheduleValidationError> {
    if groups.len() > MAX_GROUPS {
        return Err(ScheduleValidationError::TooManyGroups {
            count: groups.len(),
        });
    }

    // Negated comparisons so NaN fails each bound.
    if let Some(group) = groups.iter().find(|g| !(g.start_percent >= MIN_PERCENT)) {
        return Err(ScheduleValidationError::StartBelowMin {
            group_id: group.group_id,
            start: group.start_percent,
        });
    }

    if let Some(group) = groups.iter().find(|g| !(g.stop_percent <= MAX_PERCENT)) {
        return Err(ScheduleValidationError::StopAboveMax {
            group_id: group.group_id,
            stop: group.stop_percent,
        });
    }

    if let Some(group) = groups
        .iter()
        .find(|g| !(g.start_percent < g.stop_percent))
    {
        return Err(ScheduleValidationError::StartNotBeforeStop {
            group_id: group.group_id,
            start: group.start_percent,
            stop: group.stop_percent,
        });
    }

    if let Some(group) = groups.iter().find(|g| g.group_size <= 0) {
        return Err(ScheduleValidationError::NonPositiveSize {
            group_id: group.group_id,
            size: group.group_size,
        });
    }

    Ok(())
}
