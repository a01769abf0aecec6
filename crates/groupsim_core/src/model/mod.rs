//! Domain model for group scenarios.
//!
//! # Responsibility
//! - Define the records shared by validation, timeline analysis, simulation
//!   and conversion.
//!
//! # Invariants
//! - Groups own objects; objects own their trajectory samples.
//! - All records are plain values without shared mutable aliasing.

pub mod group;
pub mod object;
pub mod position;
