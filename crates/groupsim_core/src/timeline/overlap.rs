//! Pairwise window overlap and point-in-time activity queries.

use crate::model::group::ScheduledGroup;
use serde::Serialize;

/// Two groups whose windows intersect on an open interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapPair {
    pub first_group_id: i64,
    pub second_group_id: i64,
    /// `max(start)` of the two windows.
    pub overlap_start: f64,
    /// `min(stop)` of the two windows.
    pub overlap_stop: f64,
}

impl OverlapPair {
    pub fn ids(&self) -> (i64, i64) {
        (self.first_group_id, self.second_group_id)
    }
}

/// Every overlapping unordered pair exactly once, as `(i, j)` with `i < j`
/// in input row order.
pub fn overlapping_groups(groups: &[ScheduledGroup]) -> Vec<OverlapPair> {
    let mut pairs = Vec::new();
    for (i, first) in groups.iter().enumerate() {
        for second in &groups[i + 1..] {
            if first.overlaps(second) {
                pairs.push(OverlapPair {
                    first_group_id: first.group_id,
                    second_group_id: second.group_id,
                    overlap_start: first.start_percent.max(second.start_percent),
                    overlap_stop: first.stop_percent.min(second.stop_percent),
                });
            }
        }
    }
    pairs
}

/// Ids of groups whose window contains `time` (inclusive), in input order.
pub fn active_groups_at(groups: &[ScheduledGroup], time: f64) -> Vec<i64> {
    groups
        .iter()
        .filter(|group| group.contains_time(time))
        .map(|group| group.group_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{active_groups_at, overlapping_groups};
    use crate::model::group::ScheduledGroup;

    #[test]
    fn overlap_pairs_follow_row_order_and_carry_span() {
        let groups = [
            ScheduledGroup::new(3, 1, 40.0, 100.0),
            ScheduledGroup::new(1, 1, 0.0, 60.0),
        ];
        let pairs = overlapping_groups(&groups);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].ids(), (3, 1));
        assert_eq!(pairs[0].overlap_start, 40.0);
        assert_eq!(pairs[0].overlap_stop, 60.0);
    }

    #[test]
    fn active_groups_use_inclusive_bounds() {
        let groups = [
            ScheduledGroup::new(1, 1, 0.0, 40.0),
            ScheduledGroup::new(2, 1, 40.0, 80.0),
        ];
        assert_eq!(active_groups_at(&groups, 40.0), vec![1, 2]);
        assert_eq!(active_groups_at(&groups, 80.5), Vec::<i64>::new());
    }
}
