//! Trajectory table to world-entity conversion.
//!
//! # Responsibility
//! - Assign stable integer keys to `(object_id, group_id)` pairs.
//! - Write one tab-delimited state file per key.
//! - Maintain one consolidated descriptor file covering every key seen.
//!
//! # Invariants
//! - Keys start at 1 and follow first-seen order across all calls on one
//!   converter.
//! - The consolidated file is rewritten in full on every call.

pub mod world_entity;

pub use world_entity::{
    ConversionResult, ConverterConfig, WorldEntityConverter, CONSOLIDATED_FILE_NAME,
    ENTITY_FILE_COLUMNS,
};

use crate::output::OutputError;
use crate::table::TableError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Debug)]
pub enum ConvertError {
    Table(TableError),
    Output(OutputError),
    /// The trajectory table had no rows.
    EmptyInput,
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "{err}"),
            Self::EmptyInput => write!(f, "trajectory table has no rows to convert"),
        }
    }
}

impl Error for ConvertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Table(err) => Some(err),
            Self::Output(err) => Some(err),
            Self::EmptyInput => None,
        }
    }
}

impl From<TableError> for ConvertError {
    fn from(value: TableError) -> Self {
        Self::Table(value)
    }
}

impl From<OutputError> for ConvertError {
    fn from(value: OutputError) -> Self {
        Self::Output(value)
    }
}
