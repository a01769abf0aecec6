//! Flat-file persistence of simulation tables.

use crate::output::{
    ensure_dir, resolve_prefix, write_csv_file, write_text_file, OutputError, OutputResult,
};
use crate::simulation::simulator::SpatialSimulator;
use crate::table::{
    group_row, object_row, trajectory_row, OBJECT_COLUMNS, SPATIAL_COLUMNS, TRAJECTORY_COLUMNS,
};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Paths written by one `save_outputs` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedOutputs {
    pub input_groups: PathBuf,
    pub objects: PathBuf,
    /// `None` when trajectories were not generated yet.
    pub trajectories: Option<PathBuf>,
    pub summary: PathBuf,
}

impl SpatialSimulator {
    /// Writes the group, object, trajectory and summary files into `dir`.
    ///
    /// Every file is named `<prefix>_<kind>`; a missing prefix is derived
    /// from the local time.
    ///
    /// # Errors
    /// - `OutputError::NothingToSave` before objects were generated.
    /// - `OutputError::InvalidPrefix` / `OutputError::Io` on write failures.
    pub fn save_outputs(&self, dir: &Path, prefix: Option<&str>) -> OutputResult<SavedOutputs> {
        let started_at = Instant::now();
        let objects = self
            .objects()
            .map_err(|_| OutputError::NothingToSave("objects have not been generated"))?;
        let summary = self
            .summary()
            .map_err(|_| OutputError::NothingToSave("objects have not been generated"))?;
        let prefix = resolve_prefix(prefix)?;
        ensure_dir(dir)?;

        let input_groups = dir.join(format!("{prefix}_input_groups.csv"));
        write_csv_file(
            &input_groups,
            &SPATIAL_COLUMNS,
            self.groups().iter().map(group_row),
        )?;

        let objects_path = dir.join(format!("{prefix}_objects.csv"));
        write_csv_file(&objects_path, &OBJECT_COLUMNS, objects.iter().map(object_row))?;

        let trajectories = match self.trajectories() {
            Ok(samples) => {
                let path = dir.join(format!("{prefix}_trajectories.csv"));
                write_csv_file(&path, &TRAJECTORY_COLUMNS, samples.iter().map(trajectory_row))?;
                Some(path)
            }
            Err(_) => None,
        };

        let summary_path = dir.join(format!("{prefix}_summary.txt"));
        write_text_file(&summary_path, &summary.render_text())?;

        info!(
            "event=simulation_save module=simulation status=ok dir={} prefix={} trajectories={} duration_ms={}",
            dir.display(),
            prefix,
            trajectories.is_some(),
            started_at.elapsed().as_millis()
        );

        Ok(SavedOutputs {
            input_groups,
            objects: objects_path,
            trajectories,
            summary: summary_path,
        })
    }
}
