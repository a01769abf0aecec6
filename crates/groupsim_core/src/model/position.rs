//! North-East-Down position vector.
//!
//! # Invariants
//! - Components are plain `f64` values; no frame conversion happens here.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// 3D position (or displacement) in a local North-East-Down frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position3 {
    pub north: f64,
    pub east: f64,
    pub down: f64,
}

impl Position3 {
    pub const fn new(north: f64, east: f64, down: f64) -> Self {
        Self { north, east, down }
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(
            self.north + other.north,
            self.east + other.east,
            self.down + other.down,
        )
    }

    pub fn sub(self, other: Self) -> Self {
        Self::new(
            self.north - other.north,
            self.east - other.east,
            self.down - other.down,
        )
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.north * factor, self.east * factor, self.down * factor)
    }

    /// Euclidean length.
    pub fn norm(self) -> f64 {
        (self.north * self.north + self.east * self.east + self.down * self.down).sqrt()
    }

    /// Euclidean distance between two positions.
    pub fn distance_to(self, other: Self) -> f64 {
        other.sub(self).norm()
    }

    /// Linear interpolation `from + alpha * (to - from)`.
    ///
    /// `alpha = 0` returns `from` exactly; `alpha = 1` returns `to` up to
    /// floating-point rounding.
    pub fn lerp(from: Self, to: Self, alpha: f64) -> Self {
        from.add(to.sub(from).scale(alpha))
    }

    pub fn is_finite(self) -> bool {
        self.north.is_finite() && self.east.is_finite() && self.down.is_finite()
    }
}

impl Display for Position3 {
    /// Renders as `N, E, D` with shortest round-trip float formatting.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.north, self.east, self.down)
    }
}
