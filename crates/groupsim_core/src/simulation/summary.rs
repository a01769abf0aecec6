//! Summary statistics of a simulation run.

use crate::model::group::Category;
use crate::model::object::SpatialObject;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Object counts per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CategoryCounts {
    pub category_1: usize,
    pub category_2: usize,
    pub category_3: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::One => self.category_1,
            Category::Two => self.category_2,
            Category::Three => self.category_3,
        }
    }

    fn increment(&mut self, category: Category) {
        match category {
            Category::One => self.category_1 += 1,
            Category::Two => self.category_2 += 1,
            Category::Three => self.category_3 += 1,
        }
    }
}

/// Travel distance distribution across all objects.
///
/// `std` is the sample standard deviation (n - 1); it is `0` for fewer than
/// two objects. All fields are `0` when there are no objects.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TravelDistanceStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

impl TravelDistanceStats {
    pub fn from_objects(objects: &[SpatialObject]) -> Self {
        if objects.is_empty() {
            return Self::default();
        }

        let count = objects.len() as f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for object in objects {
            min = min.min(object.travel_distance);
            max = max.max(object.travel_distance);
            sum += object.travel_distance;
        }
        let mean = sum / count;

        let std = if objects.len() < 2 {
            0.0
        } else {
            let squares = objects
                .iter()
                .map(|object| (object.travel_distance - mean).powi(2))
                .sum::<f64>();
            (squares / (count - 1.0)).sqrt()
        };

        Self {
            min,
            max,
            mean,
            std,
        }
    }
}

/// Simulation statistics available once objects exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub total_groups: usize,
    pub total_objects: usize,
    pub num_time_points: usize,
    pub objects_per_group: BTreeMap<i64, usize>,
    pub categories: CategoryCounts,
    pub travel_distance: TravelDistanceStats,
    /// Present only after trajectories were generated.
    pub total_trajectory_points: Option<usize>,
}

impl SimulationSummary {
    pub fn new(
        total_groups: usize,
        num_time_points: usize,
        objects: &[SpatialObject],
        total_trajectory_points: Option<usize>,
    ) -> Self {
        let mut objects_per_group = BTreeMap::new();
        let mut categories = CategoryCounts::default();
        for object in objects {
            *objects_per_group.entry(object.group_id).or_insert(0) += 1;
            categories.increment(object.category);
        }

        Self {
            total_groups,
            total_objects: objects.len(),
            num_time_points,
            objects_per_group,
            categories,
            travel_distance: TravelDistanceStats::from_objects(objects),
            total_trajectory_points,
        }
    }

    /// Title, rule, then one `key: value` line per statistic.
    pub fn render_text(&self) -> String {
        let mut text = String::from("Spatial Group Simulation Summary\n");
        text.push_str(&"=".repeat(60));
        text.push_str("\n\n");

        let per_group = self
            .objects_per_group
            .iter()
            .map(|(group_id, count)| format!("{group_id}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");

        let _ = writeln!(text, "total_groups: {}", self.total_groups);
        let _ = writeln!(text, "total_objects: {}", self.total_objects);
        let _ = writeln!(text, "num_time_points: {}", self.num_time_points);
        let _ = writeln!(text, "objects_per_group: {{{per_group}}}");
        let _ = writeln!(
            text,
            "categories: {{category_1: {}, category_2: {}, category_3: {}}}",
            self.categories.category_1, self.categories.category_2, self.categories.category_3
        );
        let _ = writeln!(
            text,
            "travel_distance_stats: {{min: {}, max: {}, mean: {}, std: {}}}",
            self.travel_distance.min,
            self.travel_distance.max,
            self.travel_distance.mean,
            self.travel_distance.std
        );
        if let Some(points) = self.total_trajectory_points {
            let _ = writeln!(text, "total_trajectory_points: {points}");
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::{SimulationSummary, TravelDistanceStats};
    use crate::model::group::Category;
    use crate::model::object::SpatialObject;
    use crate::model::position::Position3;

    fn object(object_id: u64, group_id: i64, category: Category, travel: f64) -> SpatialObject {
        SpatialObject {
            object_id,
            group_id,
            category,
            start: Position3::default(),
            end: Position3::new(travel, 0.0, 0.0),
            travel_distance: travel,
        }
    }

    #[test]
    fn travel_stats_use_sample_std() {
        let objects = [
            object(1, 1, Category::One, 2.0),
            object(2, 1, Category::One, 4.0),
            object(3, 2, Category::Three, 6.0),
        ];
        let stats = TravelDistanceStats::from_objects(&objects);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 6.0);
        assert_eq!(stats.mean, 4.0);
        assert!((stats.std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_object_has_zero_std() {
        let stats = TravelDistanceStats::from_objects(&[object(1, 1, Category::One, 3.0)]);
        assert_eq!(stats.std, 0.0);
    }

    #[test]
    fn render_text_lists_statistics() {
        let objects = [
            object(1, 1, Category::One, 2.0),
            object(2, 2, Category::Two, 4.0),
        ];
        let summary = SimulationSummary::new(2, 10, &objects, Some(8));
        let text = summary.render_text();
        assert!(text.starts_with("Spatial Group Simulation Summary\n"));
        assert!(text.contains("objects_per_group: {1: 1, 2: 1}\n"));
        assert!(text.contains("categories: {category_1: 1, category_2: 1, category_3: 0}\n"));
        assert!(text.ends_with("total_trajectory_points: 8\n"));
    }
}
