//! Aggregate queries over a validated schedule.

use crate::model::group::ScheduledGroup;
use crate::output::{ensure_dir, resolve_prefix, write_text_file, OutputResult};
use chrono::Local;
use log::info;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Summary statistics of one scheduling table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub num_groups: usize,
    /// Widened so any table of `i64` sizes sums without overflow.
    pub total_participants: i128,
    pub earliest_start: f64,
    pub latest_stop: f64,
    pub avg_group_size: f64,
    pub min_group_size: i64,
    pub max_group_size: i64,
}

impl ScheduleSummary {
    /// Returns `None` for an empty table.
    pub fn from_groups(groups: &[ScheduledGroup]) -> Option<Self> {
        let first = groups.first()?;
        let mut summary = Self {
            num_groups: groups.len(),
            total_participants: 0,
            earliest_start: first.start_percent,
            latest_stop: first.stop_percent,
            avg_group_size: 0.0,
            min_group_size: first.group_size,
            max_group_size: first.group_size,
        };

        for group in groups {
            summary.total_participants += i128::from(group.group_size);
            summary.earliest_start = summary.earliest_start.min(group.start_percent);
            summary.latest_stop = summary.latest_stop.max(group.stop_percent);
            summary.min_group_size = summary.min_group_size.min(group.group_size);
            summary.max_group_size = summary.max_group_size.max(group.group_size);
        }
        summary.avg_group_size = summary.total_participants as f64 / groups.len() as f64;
        Some(summary)
    }

    /// `key: value` lines, one per statistic.
    pub fn render_text(&self) -> String {
        format!(
            "num_groups: {}\n\
             total_participants: {}\n\
             earliest_start: {}\n\
             latest_stop: {}\n\
             avg_group_size: {}\n\
             min_group_size: {}\n\
             max_group_size: {}\n",
            self.num_groups,
            self.total_participants,
            self.earliest_start,
            self.latest_stop,
            self.avg_group_size,
            self.min_group_size,
            self.max_group_size,
        )
    }
}

/// Sum of group sizes.
pub fn total_participants(groups: &[ScheduledGroup]) -> i128 {
    groups.iter().map(|group| i128::from(group.group_size)).sum()
}

/// Group window converted to minutes of a concrete session length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMinutes {
    pub group_id: i64,
    pub group_size: i64,
    pub start_minute: f64,
    pub stop_minute: f64,
    pub duration_minutes: f64,
}

/// Maps percent windows onto a session of `total_minutes`.
pub fn minute_breakdown(groups: &[ScheduledGroup], total_minutes: f64) -> Vec<GroupMinutes> {
    groups
        .iter()
        .map(|group| {
            let start_minute = group.start_percent / 100.0 * total_minutes;
            let stop_minute = group.stop_percent / 100.0 * total_minutes;
            GroupMinutes {
                group_id: group.group_id,
                group_size: group.group_size,
                start_minute,
                stop_minute,
                duration_minutes: stop_minute - start_minute,
            }
        })
        .collect()
}

/// Fixed-width rendering of a scheduling table.
pub fn render_group_table(groups: &[ScheduledGroup]) -> String {
    let mut out = String::from(" group_id  group_size  start_percent  stop_percent\n");
    for group in groups {
        let _ = writeln!(
            out,
            "{:>9}  {:>10}  {:>13}  {:>12}",
            group.group_id, group.group_size, group.start_percent, group.stop_percent
        );
    }
    out
}

/// Writes `<prefix>_group_summary.txt` into `dir` and returns its path.
///
/// `source` labels where the table came from (usually the input file path).
pub fn save_schedule_summary(
    dir: &Path,
    prefix: Option<&str>,
    source: &str,
    groups: &[ScheduledGroup],
) -> OutputResult<PathBuf> {
    let prefix = resolve_prefix(prefix)?;
    ensure_dir(dir)?;

    let mut text = String::from("Group Scheduler Summary\n");
    text.push_str(&"=".repeat(60));
    text.push_str("\n\n");
    let _ = writeln!(text, "Input file: {source}");
    let _ = writeln!(
        text,
        "Generated: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    text.push_str("Group Data:\n");
    text.push_str(&"-".repeat(60));
    text.push('\n');
    text.push_str(&render_group_table(groups));
    text.push('\n');
    text.push_str("Summary Statistics:\n");
    text.push_str(&"-".repeat(60));
    text.push('\n');
    if let Some(summary) = ScheduleSummary::from_groups(groups) {
        text.push_str(&summary.render_text());
    }

    let path = dir.join(format!("{prefix}_group_summary.txt"));
    write_text_file(&path, &text)?;
    info!(
        "event=schedule_summary_save module=schedule status=ok path={}",
        path.display()
    );
    Ok(path)
}
