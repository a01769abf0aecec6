//! Core logic for group scheduling and spatial trajectory scenarios.
//! This crate is the single source of truth for group invariants.

pub mod convert;
pub mod logging;
pub mod model;
pub mod output;
pub mod scenarios;
pub mod schedule;
pub mod simulation;
pub mod table;
pub mod timeline;

pub use convert::{
    ConversionResult, ConvertError, ConvertResult, ConverterConfig, WorldEntityConverter,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::group::{
    validate_spatial_groups, Category, GroupValidationError, ScheduledGroup, SpatialGroup,
};
pub use model::object::{SpatialObject, TrajectorySample};
pub use model::position::Position3;
pub use output::{OutputError, OutputResult};
pub use schedule::{validate_schedule, ScheduleSummary, ScheduleValidationError};
pub use simulation::{
    SavedOutputs, SimulationConfig, SimulationError, SimulationResult, SimulationSummary,
    SpatialSimulator, StageKind,
};
pub use table::{TableError, TableResult};
pub use timeline::{ActivityMatrix, ConcurrencyStats, OverlapPair, TimelineReport};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
