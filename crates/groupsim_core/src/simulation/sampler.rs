//! Seeded random draws for object generation.

use crate::model::group::{Category, SpatialGroup};
use crate::model::object::SpatialObject;
use crate::model::position::Position3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Direction draws with a norm below this are discarded and redrawn.
pub const MIN_DIRECTION_NORM: f64 = 1e-12;

/// Random source owned by one simulator instance.
#[derive(Debug, Clone)]
pub struct ObjectSampler {
    rng: StdRng,
}

impl ObjectSampler {
    /// Seeded sampler; `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    /// Three independent standard-normal components (north, east, down).
    pub fn normal3(&mut self) -> Position3 {
        let north = self.standard_normal();
        let east = self.standard_normal();
        let down = self.standard_normal();
        Position3::new(north, east, down)
    }

    /// Uniform direction on the unit sphere from a normalized Gaussian vector.
    pub fn unit_direction(&mut self) -> Position3 {
        loop {
            let draw = self.normal3();
            let norm = draw.norm();
            if norm >= MIN_DIRECTION_NORM {
                return draw.scale(1.0 / norm);
            }
        }
    }

    /// Travel distance `max(0, N(0,1) * travel_std + mean)`.
    pub fn travel_distance(&mut self, mean: f64, std: f64) -> f64 {
        (self.standard_normal() * std + mean).max(0.0)
    }

    /// Draws one object for `group`.
    ///
    /// Draw order per object: start offset (3), travel distance (1),
    /// direction (3, plus any redraws).
    pub fn draw_object(
        &mut self,
        group: &SpatialGroup,
        category: Category,
        object_id: u64,
    ) -> SpatialObject {
        let start = group.center.add(self.normal3().scale(group.spread_std));
        let travel_distance = self.travel_distance(group.mean_travel_distance, group.travel_std);
        let direction = self.unit_direction();
        let end = start.add(direction.scale(travel_distance));

        SpatialObject {
            object_id,
            group_id: group.group_id,
            category,
            start,
            end,
            travel_distance,
        }
    }
}
