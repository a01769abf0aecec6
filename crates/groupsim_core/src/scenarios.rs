//! Built-in demonstration scenarios.

use crate::model::group::{ScheduledGroup, SpatialGroup};
use crate::model::position::Position3;

/// Named scheduling-only table.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineScenario {
    pub name: &'static str,
    pub groups: Vec<ScheduledGroup>,
}

/// Named spatial group table.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub groups: Vec<SpatialGroup>,
}

fn scheduled(rows: &[(i64, i64, f64, f64)]) -> Vec<ScheduledGroup> {
    rows.iter()
        .map(|(id, size, start, stop)| ScheduledGroup::new(*id, *size, *start, *stop))
        .collect()
}

pub fn timeline_scenarios() -> Vec<TimelineScenario> {
    vec![
        TimelineScenario {
            name: "No Overlaps Sequential",
            groups: scheduled(&[(1, 10, 0.0, 30.0), (2, 15, 35.0, 65.0), (3, 8, 70.0, 100.0)]),
        },
        TimelineScenario {
            name: "Two Groups Overlap",
            groups: scheduled(&[(1, 20, 0.0, 60.0), (2, 15, 40.0, 100.0)]),
        },
        TimelineScenario {
            name: "Three Groups Overlap",
            groups: scheduled(&[(1, 10, 0.0, 60.0), (2, 15, 20.0, 80.0), (3, 12, 40.0, 100.0)]),
        },
        TimelineScenario {
            name: "Four Groups Complex",
            groups: scheduled(&[
                (1, 10, 0.0, 50.0),
                (2, 15, 15.0, 70.0),
                (3, 8, 40.0, 85.0),
                (4, 12, 65.0, 100.0),
            ]),
        },
        TimelineScenario {
            name: "With Gaps",
            groups: scheduled(&[(1, 10, 0.0, 25.0), (2, 15, 40.0, 60.0), (3, 8, 75.0, 100.0)]),
        },
        TimelineScenario {
            name: "Maximum Overlap",
            groups: scheduled(&[
                (1, 10, 0.0, 70.0),
                (2, 15, 10.0, 80.0),
                (3, 8, 20.0, 90.0),
                (4, 12, 30.0, 100.0),
            ]),
        },
    ]
}

/// Column-major spatial table, one entry per group.
struct SpatialColumns<'a> {
    sizes: &'a [i64],
    windows: &'a [(f64, f64)],
    centers: &'a [(f64, f64, f64)],
    spread: &'a [f64],
    travel: &'a [f64],
    travel_std: &'a [f64],
    categories: &'a [i64],
}

impl SpatialColumns<'_> {
    fn into_groups(self) -> Vec<SpatialGroup> {
        (0..self.sizes.len())
            .map(|i| {
                let (north, east, down) = self.centers[i];
                SpatialGroup {
                    group_id: i as i64 + 1,
                    group_size: self.sizes[i],
                    start_percent: self.windows[i].0,
                    stop_percent: self.windows[i].1,
                    center: Position3::new(north, east, down),
                    spread_std: self.spread[i],
                    mean_travel_distance: self.travel[i],
                    travel_std: self.travel_std[i],
                    category: self.categories[i],
                }
            })
            .collect()
    }
}

pub fn spatial_scenarios() -> Vec<SpatialScenario> {
    vec![
        SpatialScenario {
            name: "three_groups_different_categories",
            description: "Three partially overlapping groups, one per category",
            groups: SpatialColumns {
                sizes: &[5, 3, 4],
                windows: &[(0.0, 40.0), (30.0, 70.0), (60.0, 100.0)],
                centers: &[(100.0, 50.0, 0.0), (200.0, -30.0, -5.0), (150.0, 80.0, -2.0)],
                spread: &[10.0, 15.0, 8.0],
                travel: &[50.0, 30.0, 40.0],
                travel_std: &[5.0, 3.0, 4.0],
                categories: &[1, 2, 3],
            }
            .into_groups(),
        },
        SpatialScenario {
            name: "high_overlap",
            description: "Four groups with heavily overlapping windows",
            groups: SpatialColumns {
                sizes: &[3, 4, 3, 2],
                windows: &[(0.0, 60.0), (20.0, 80.0), (40.0, 90.0), (60.0, 100.0)],
                centers: &[
                    (0.0, 0.0, 0.0),
                    (50.0, 25.0, -2.0),
                    (100.0, 50.0, -4.0),
                    (150.0, 75.0, -6.0),
                ],
                spread: &[20.0, 18.0, 15.0, 12.0],
                travel: &[80.0, 70.0, 60.0, 50.0],
                travel_std: &[8.0, 7.0, 6.0, 5.0],
                categories: &[1, 1, 2, 3],
            }
            .into_groups(),
        },
        SpatialScenario {
            name: "sequential_no_overlap",
            description: "Three groups active one after another",
            groups: SpatialColumns {
                sizes: &[4, 5, 6],
                windows: &[(0.0, 30.0), (35.0, 65.0), (70.0, 100.0)],
                centers: &[(0.0, 0.0, 0.0), (100.0, 50.0, -3.0), (200.0, 100.0, -6.0)],
                spread: &[12.0, 15.0, 18.0],
                travel: &[40.0, 50.0, 60.0],
                travel_std: &[4.0, 5.0, 6.0],
                categories: &[1, 2, 3],
            }
            .into_groups(),
        },
        SpatialScenario {
            name: "tight_cluster",
            description: "Two dense groups with short travel",
            groups: SpatialColumns {
                sizes: &[8, 6],
                windows: &[(0.0, 50.0), (50.0, 100.0)],
                centers: &[(100.0, 50.0, -5.0), (120.0, 60.0, -7.0)],
                spread: &[5.0, 5.0],
                travel: &[15.0, 20.0],
                travel_std: &[2.0, 3.0],
                categories: &[1, 1],
            }
            .into_groups(),
        },
        SpatialScenario {
            name: "wide_dispersal",
            description: "Two sparse groups with long travel",
            groups: SpatialColumns {
                sizes: &[4, 5],
                windows: &[(0.0, 60.0), (40.0, 100.0)],
                centers: &[(200.0, 100.0, 0.0), (300.0, -100.0, 10.0)],
                spread: &[50.0, 60.0],
                travel: &[150.0, 180.0],
                travel_std: &[20.0, 25.0],
                categories: &[2, 3],
            }
            .into_groups(),
        },
    ]
}
