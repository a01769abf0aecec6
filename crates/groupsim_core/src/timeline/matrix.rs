//! Binary group-activity matrix and concurrency statistics.

use crate::model::group::{ScheduledGroup, MAX_PERCENT, MIN_PERCENT};
use serde::Serialize;
use std::fmt::Write as _;

/// `n` evenly spaced values over `[0, 100]`, both ends included.
///
/// `n = 1` yields `[0]`, `n = 0` yields an empty vector. The last value is
/// exactly `100` so windows ending at 100 always see a sample.
pub fn time_points(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![MIN_PERCENT],
        _ => {
            let step = (MAX_PERCENT - MIN_PERCENT) / (n - 1) as f64;
            let mut points = (0..n)
                .map(|i| MIN_PERCENT + i as f64 * step)
                .collect::<Vec<_>>();
            points[n - 1] = MAX_PERCENT;
            points
        }
    }
}

/// Concurrent-activity statistics over the sampled time points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcurrencyStats {
    pub max_concurrent: usize,
    pub min_concurrent: usize,
    pub avg_concurrent: f64,
    pub times_with_zero: usize,
    pub times_with_max: usize,
}

/// Time points sharing one concurrency level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcurrencyLevel {
    pub level: usize,
    pub time_points: Vec<f64>,
}

/// Groups × time points matrix; cell is 1 iff the group is active at that time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityMatrix {
    group_ids: Vec<i64>,
    time_points: Vec<f64>,
    cells: Vec<Vec<u8>>,
}

impl ActivityMatrix {
    pub fn build(groups: &[ScheduledGroup], num_points: usize) -> Self {
        let time_points = time_points(num_points);
        let cells = groups
            .iter()
            .map(|group| {
                time_points
                    .iter()
                    .map(|time| u8::from(group.contains_time(*time)))
                    .collect()
            })
            .collect();

        Self {
            group_ids: groups.iter().map(|group| group.group_id).collect(),
            time_points,
            cells,
        }
    }

    pub fn group_ids(&self) -> &[i64] {
        &self.group_ids
    }

    pub fn time_points(&self) -> &[f64] {
        &self.time_points
    }

    /// One row per group, in input order.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    pub fn cell(&self, group_index: usize, time_index: usize) -> Option<u8> {
        self.cells.get(group_index)?.get(time_index).copied()
    }

    /// Number of active groups at each time point (column sums).
    pub fn concurrency(&self) -> Vec<usize> {
        (0..self.time_points.len())
            .map(|t| self.cells.iter().map(|row| usize::from(row[t])).sum())
            .collect()
    }

    /// `None` when no time points were sampled.
    pub fn concurrency_stats(&self) -> Option<ConcurrencyStats> {
        let concurrency = self.concurrency();
        let max_concurrent = *concurrency.iter().max()?;
        let min_concurrent = *concurrency.iter().min()?;
        let total = concurrency.iter().sum::<usize>();

        Some(ConcurrencyStats {
            max_concurrent,
            min_concurrent,
            avg_concurrent: total as f64 / concurrency.len() as f64,
            times_with_zero: concurrency.iter().filter(|c| **c == 0).count(),
            times_with_max: concurrency.iter().filter(|c| **c == max_concurrent).count(),
        })
    }

    /// Time points grouped by concurrency level, ascending; empty levels are skipped.
    pub fn concurrency_levels(&self) -> Vec<ConcurrencyLevel> {
        let concurrency = self.concurrency();
        let (Some(min), Some(max)) = (concurrency.iter().min(), concurrency.iter().max()) else {
            return Vec::new();
        };

        (*min..=*max)
            .filter_map(|level| {
                let time_points = concurrency
                    .iter()
                    .zip(&self.time_points)
                    .filter(|(count, _)| **count == level)
                    .map(|(_, time)| *time)
                    .collect::<Vec<_>>();
                (!time_points.is_empty()).then_some(ConcurrencyLevel { level, time_points })
            })
            .collect()
    }

    /// Fixed-width table: one row per time point, one column per group plus a total.
    pub fn render_table(&self) -> String {
        let mut header = String::from("Time%  |");
        for group_id in &self.group_ids {
            let _ = write!(header, " Group{group_id:2} |");
        }
        header.push_str(" Total |");

        let mut lines = vec![header.clone(), "-".repeat(header.chars().count())];
        for (t, (time, total)) in self
            .time_points
            .iter()
            .zip(self.concurrency())
            .enumerate()
        {
            let mut line = format!("{time:5.1}  |");
            for row in &self.cells {
                let _ = write!(line, "   {}    |", row[t]);
            }
            let _ = write!(line, "   {total}   |");
            lines.push(line);
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::{time_points, ActivityMatrix};
    use crate::model::group::ScheduledGroup;

    #[test]
    fn time_points_cover_both_ends() {
        let points = time_points(5);
        assert_eq!(points, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(time_points(1), vec![0.0]);
        assert!(time_points(0).is_empty());
        assert_eq!(*time_points(20).last().expect("20 points"), 100.0);
    }

    #[test]
    fn boundary_times_count_as_active() {
        let groups = [ScheduledGroup::new(1, 1, 25.0, 75.0)];
        let matrix = ActivityMatrix::build(&groups, 5);
        assert_eq!(matrix.rows()[0], vec![0, 1, 1, 1, 0]);
    }

    #[test]
    fn concurrency_levels_group_time_points() {
        let groups = [
            ScheduledGroup::new(1, 1, 0.0, 50.0),
            ScheduledGroup::new(2, 1, 50.0, 100.0),
        ];
        let matrix = ActivityMatrix::build(&groups, 5);
        assert_eq!(matrix.concurrency(), vec![1, 1, 2, 1, 1]);

        let levels = matrix.concurrency_levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].level, 1);
        assert_eq!(levels[0].time_points, vec![0.0, 25.0, 75.0, 100.0]);
        assert_eq!(levels[1].time_points, vec![50.0]);
    }

    #[test]
    fn render_table_has_header_rule_and_rows() {
        let groups = [ScheduledGroup::new(7, 1, 0.0, 50.0)];
        let table = ActivityMatrix::build(&groups, 3).render_table();
        let lines = table.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "Time%  | Group 7 | Total |");
        assert_eq!(lines[1], "-".repeat(lines[0].len()));
        assert_eq!(lines[2], "  0.0  |   1    |   1   |");
        assert_eq!(lines[4], "100.0  |   0    |   0   |");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn stats_are_none_without_time_points() {
        let groups = [ScheduledGroup::new(1, 1, 0.0, 50.0)];
        assert_eq!(ActivityMatrix::build(&groups, 0).concurrency_stats(), None);
    }
}
