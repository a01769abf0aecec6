//! Stage-tagged spatial group simulator.
//!
//! # Invariants
//! - Construction validates the group table; no simulator exists for an
//!   invalid table.
//! - Object ids run from 1 without gaps, in group-table order.
//! - Every trajectory starts at its object's start position at exactly
//!   `start_percent` and ends at its end position at exactly `stop_percent`.

use crate::model::group::{validate_spatial_groups, Category, GroupValidationError, SpatialGroup};
use crate::model::object::{SpatialObject, TrajectorySample};
use crate::simulation::sampler::ObjectSampler;
use crate::simulation::summary::SimulationSummary;
use crate::simulation::trajectory::{interpolate_trajectory, window_times};
use crate::timeline::time_points;
use log::{error, info};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Default number of sampled time points per simulation.
pub const DEFAULT_TIME_POINTS: usize = 100;

pub type SimulationResult<T> = Result<T, SimulationError>;

/// Runtime parameters of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Evenly spaced samples over `[0, 100]`, both ends included.
    pub num_time_points: usize,
    /// `None` seeds from OS entropy and gives a non-reproducible run.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_time_points: DEFAULT_TIME_POINTS,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn seeded(num_time_points: usize, seed: u64) -> Self {
        Self {
            num_time_points,
            seed: Some(seed),
        }
    }
}

/// Progress marker of a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StageKind {
    Validated,
    ObjectsGenerated,
    TrajectoriesGenerated,
}

impl Display for StageKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Validated => "validated",
            Self::ObjectsGenerated => "objects generated",
            Self::TrajectoriesGenerated => "trajectories generated",
        };
        f.write_str(label)
    }
}

/// Simulation data available at each stage.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationStage {
    Validated,
    ObjectsGenerated {
        objects: Vec<SpatialObject>,
    },
    TrajectoriesGenerated {
        objects: Vec<SpatialObject>,
        trajectories: Vec<TrajectorySample>,
    },
}

impl SimulationStage {
    pub fn kind(&self) -> StageKind {
        match self {
            Self::Validated => StageKind::Validated,
            Self::ObjectsGenerated { .. } => StageKind::ObjectsGenerated,
            Self::TrajectoriesGenerated { .. } => StageKind::TrajectoriesGenerated,
        }
    }
}

/// Simulation failure.
#[derive(Debug)]
pub enum SimulationError {
    /// The group table broke a constraint; no simulator was created.
    Validation(GroupValidationError),
    /// `operation` was called before the simulator reached `required`.
    PrerequisiteNotSatisfied {
        operation: &'static str,
        required: StageKind,
    },
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::PrerequisiteNotSatisfied {
                operation,
                required,
            } => write!(
                f,
                "prerequisite not satisfied: `{operation}` requires stage `{required}`"
            ),
        }
    }
}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::PrerequisiteNotSatisfied { .. } => None,
        }
    }
}

impl From<GroupValidationError> for SimulationError {
    fn from(value: GroupValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Simulates objects moving within groups over percentage-based time.
#[derive(Debug, Clone)]
pub struct SpatialSimulator {
    groups: Vec<SpatialGroup>,
    categories: Vec<Category>,
    config: SimulationConfig,
    sampler: ObjectSampler,
    stage: SimulationStage,
}

impl SpatialSimulator {
    /// Validates `groups` and returns a simulator in the `Validated` stage.
    ///
    /// # Errors
    /// - `SimulationError::Validation` naming the first violated field.
    pub fn new(groups: Vec<SpatialGroup>, config: SimulationConfig) -> SimulationResult<Self> {
        if let Err(err) = validate_spatial_groups(&groups) {
            error!(
                "event=simulator_init module=simulation status=error field={} error={}",
                err.field(),
                err
            );
            return Err(err.into());
        }

        let categories = groups
            .iter()
            .map(|group| {
                group
                    .category()
                    .ok_or(GroupValidationError::InvalidCategory {
                        group_id: group.group_id,
                        value: group.category,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "event=simulator_init module=simulation status=ok groups={} time_points={} seeded={}",
            groups.len(),
            config.num_time_points,
            config.seed.is_some()
        );

        Ok(Self {
            groups,
            categories,
            sampler: ObjectSampler::new(config.seed),
            config,
            stage: SimulationStage::Validated,
        })
    }

    pub fn groups(&self) -> &[SpatialGroup] {
        &self.groups
    }

    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    pub fn stage(&self) -> StageKind {
        self.stage.kind()
    }

    /// Draws `group_size` objects per group and returns the object table.
    ///
    /// Calling again draws a fresh population from the current generator
    /// state and discards any trajectories.
    pub fn generate_objects(&mut self) -> &[SpatialObject] {
        let started_at = Instant::now();
        let mut objects = Vec::new();
        let mut next_id = 1_u64;

        for (group, category) in self.groups.iter().zip(&self.categories) {
            for _ in 0..group.group_size {
                objects.push(self.sampler.draw_object(group, *category, next_id));
                next_id += 1;
            }
        }

        info!(
            "event=objects_generated module=simulation status=ok groups={} objects={} duration_ms={}",
            self.groups.len(),
            objects.len(),
            started_at.elapsed().as_millis()
        );

        self.stage = SimulationStage::ObjectsGenerated { objects };
        match &self.stage {
            SimulationStage::ObjectsGenerated { objects } => objects,
            _ => &[],
        }
    }

    /// Interpolates every object across its group's window.
    ///
    /// # Errors
    /// - `PrerequisiteNotSatisfied` when objects have not been generated.
    pub fn generate_trajectories(&mut self) -> SimulationResult<&[TrajectorySample]> {
        let started_at = Instant::now();
        let objects = match std::mem::replace(&mut self.stage, SimulationStage::Validated) {
            SimulationStage::Validated => {
                error!(
                    "event=trajectories_generated module=simulation status=error error_code=objects_missing"
                );
                return Err(SimulationError::PrerequisiteNotSatisfied {
                    operation: "generate_trajectories",
                    required: StageKind::ObjectsGenerated,
                });
            }
            SimulationStage::ObjectsGenerated { objects }
            | SimulationStage::TrajectoriesGenerated { objects, .. } => objects,
        };

        let trajectories = self.build_trajectories(&objects);
        info!(
            "event=trajectories_generated module=simulation status=ok objects={} samples={} duration_ms={}",
            objects.len(),
            trajectories.len(),
            started_at.elapsed().as_millis()
        );

        self.stage = SimulationStage::TrajectoriesGenerated {
            objects,
            trajectories,
        };
        self.trajectories()
    }

    fn build_trajectories(&self, objects: &[SpatialObject]) -> Vec<TrajectorySample> {
        let time_points = time_points(self.config.num_time_points);
        let windows = self
            .groups
            .iter()
            .map(|group| {
                let times = window_times(&time_points, group.start_percent, group.stop_percent);
                (group.group_id, (group.start_percent, group.stop_percent, times))
            })
            .collect::<HashMap<_, _>>();

        let mut trajectories = Vec::new();
        for object in objects {
            if let Some((start, stop, times)) = windows.get(&object.group_id) {
                trajectories.extend(interpolate_trajectory(object, *start, *stop, times));
            }
        }
        trajectories
    }

    /// # Errors
    /// - `PrerequisiteNotSatisfied` before `generate_objects`.
    pub fn objects(&self) -> SimulationResult<&[SpatialObject]> {
        match &self.stage {
            SimulationStage::Validated => Err(SimulationError::PrerequisiteNotSatisfied {
                operation: "objects",
                required: StageKind::ObjectsGenerated,
            }),
            SimulationStage::ObjectsGenerated { objects }
            | SimulationStage::TrajectoriesGenerated { objects, .. } => Ok(objects),
        }
    }

    /// # Errors
    /// - `PrerequisiteNotSatisfied` before `generate_trajectories`.
    pub fn trajectories(&self) -> SimulationResult<&[TrajectorySample]> {
        match &self.stage {
            SimulationStage::TrajectoriesGenerated { trajectories, .. } => Ok(trajectories),
            _ => Err(SimulationError::PrerequisiteNotSatisfied {
                operation: "trajectories",
                required: StageKind::TrajectoriesGenerated,
            }),
        }
    }

    /// Statistics of the current run.
    ///
    /// # Errors
    /// - `PrerequisiteNotSatisfied` before `generate_objects`.
    pub fn summary(&self) -> SimulationResult<SimulationSummary> {
        let objects = self.objects().map_err(|_| SimulationError::PrerequisiteNotSatisfied {
            operation: "summary",
            required: StageKind::ObjectsGenerated,
        })?;
        let total_trajectory_points = self.trajectories().ok().map(<[_]>::len);
        Ok(SimulationSummary::new(
            self.groups.len(),
            self.config.num_time_points,
            objects,
            total_trajectory_points,
        ))
    }
}
