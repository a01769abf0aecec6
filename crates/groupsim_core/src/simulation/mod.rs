//! Spatial trajectory simulation.
//!
//! # Responsibility
//! - Validate spatial group tables once, at construction.
//! - Draw object populations around group centerpoints.
//! - Interpolate object trajectories across each group's active window.
//! - Summarize and persist simulation tables.
//!
//! # Invariants
//! - Stages run in order: validated, objects generated, trajectories generated.
//!   A stage invoked before its prerequisite fails with
//!   `SimulationError::PrerequisiteNotSatisfied`.
//! - A run is a pure function of (groups, time-point count, seed).
//! - Each simulator owns its random generator; instances never share state.

pub mod persist;
pub mod sampler;
pub mod simulator;
pub mod summary;
pub mod trajectory;

pub use persist::SavedOutputs;
pub use sampler::ObjectSampler;
pub use simulator::{
    SimulationConfig, SimulationError, SimulationResult, SimulationStage, SpatialSimulator,
    StageKind, DEFAULT_TIME_POINTS,
};
pub use summary::{CategoryCounts, SimulationSummary, TravelDistanceStats};
pub use trajectory::{interpolate_trajectory, window_times};
