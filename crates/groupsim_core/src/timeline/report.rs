//! Complete timeline analysis bundle and its text rendering.

use crate::model::group::ScheduledGroup;
use crate::output::{ensure_dir, resolve_prefix, slugify, write_text_file, OutputResult};
use crate::timeline::matrix::{ActivityMatrix, ConcurrencyStats};
use crate::timeline::overlap::{overlapping_groups, OverlapPair};
use chrono::Local;
use log::info;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Default number of sampled time points for timeline analysis.
pub const DEFAULT_TIMELINE_POINTS: usize = 20;

/// Timeline table, matrix, overlaps and concurrency statistics for one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineReport {
    pub table: String,
    pub matrix: ActivityMatrix,
    pub overlaps: Vec<OverlapPair>,
    pub stats: Option<ConcurrencyStats>,
}

impl TimelineReport {
    pub fn generate(groups: &[ScheduledGroup], num_points: usize) -> Self {
        let matrix = ActivityMatrix::build(groups, num_points);
        Self {
            table: matrix.render_table(),
            overlaps: overlapping_groups(groups),
            stats: matrix.concurrency_stats(),
            matrix,
        }
    }

    /// One line per overlapping pair with its shared span.
    pub fn render_overlaps(&self) -> String {
        if self.overlaps.is_empty() {
            return "No overlapping groups\n".to_string();
        }
        let mut out = String::new();
        for pair in &self.overlaps {
            let _ = writeln!(
                out,
                "Groups {} and {}: overlap from {:.1}% to {:.1}%",
                pair.first_group_id, pair.second_group_id, pair.overlap_start, pair.overlap_stop
            );
        }
        out
    }

    /// Concurrency statistics as `key: value` lines.
    pub fn render_stats(&self) -> String {
        match &self.stats {
            Some(stats) => format!(
                "max_concurrent: {}\n\
                 min_concurrent: {}\n\
                 avg_concurrent: {:.2}\n\
                 times_with_zero: {}\n\
                 times_with_max: {}\n",
                stats.max_concurrent,
                stats.min_concurrent,
                stats.avg_concurrent,
                stats.times_with_zero,
                stats.times_with_max,
            ),
            None => "no time points sampled\n".to_string(),
        }
    }

    /// Activity patterns: how many time points sit at each concurrency level.
    /// At most five example times are listed per level.
    pub fn render_patterns(&self) -> String {
        let mut out = String::new();
        for level in self.matrix.concurrency_levels() {
            let times = level
                .time_points
                .iter()
                .map(|time| format!("{time:.1}%"))
                .collect::<Vec<_>>();
            let examples = if times.len() <= 5 {
                times.join(", ")
            } else {
                format!("{} ... ({} total)", times[..3].join(", "), times.len())
            };
            let _ = writeln!(
                out,
                "{} groups active: {} time points (e.g., {examples})",
                level.level,
                level.time_points.len()
            );
        }
        out
    }

    pub fn render_text(&self, name: &str) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "Timeline Report: {name}");
        let _ = writeln!(
            text,
            "Generated: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        text.push_str(&self.table);
        text.push_str("\n\nOverlapping Groups:\n");
        text.push_str(&self.render_overlaps());
        text.push_str("\nConcurrent Stats:\n");
        text.push_str(&self.render_stats());
        text
    }

    /// Writes `<prefix>_timeline_<slug(name)>.txt` into `dir`.
    pub fn save(&self, dir: &Path, name: &str, prefix: Option<&str>) -> OutputResult<PathBuf> {
        let prefix = resolve_prefix(prefix)?;
        ensure_dir(dir)?;
        let path = dir.join(format!("{prefix}_timeline_{}.txt", slugify(name)));
        write_text_file(&path, &self.render_text(name))?;
        info!(
            "event=timeline_report_save module=timeline status=ok path={}",
            path.display()
        );
        Ok(path)
    }
}
