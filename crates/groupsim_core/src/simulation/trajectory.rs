//! Window sampling and linear interpolation of object trajectories.

use crate::model::object::{SpatialObject, TrajectorySample};
use crate::model::position::Position3;

/// Sampled times inside `[start, stop]`, with the exact window bounds forced
/// in as first and last entries.
pub fn window_times(time_points: &[f64], start: f64, stop: f64) -> Vec<f64> {
    let mut times = time_points
        .iter()
        .copied()
        .filter(|time| start <= *time && *time <= stop)
        .collect::<Vec<_>>();

    if times.first() != Some(&start) {
        times.insert(0, start);
    }
    if times.last() != Some(&stop) {
        times.push(stop);
    }
    times
}

/// Position of `object` at each of `times`, for a group active on `[start, stop]`.
///
/// `alpha = (t - start) / (stop - start)`; a degenerate window uses `alpha = 0`.
pub fn interpolate_trajectory(
    object: &SpatialObject,
    start: f64,
    stop: f64,
    times: &[f64],
) -> Vec<TrajectorySample> {
    let span = stop - start;
    times
        .iter()
        .map(|time| {
            let alpha = if span == 0.0 {
                0.0
            } else {
                (time - start) / span
            };
            TrajectorySample {
                object_id: object.object_id,
                group_id: object.group_id,
                category: object.category,
                time_percent: *time,
                position: Position3::lerp(object.start, object.end, alpha),
            }
        })
        .collect()
}
