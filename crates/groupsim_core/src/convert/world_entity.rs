use crate::convert::{ConvertError, ConvertResult};
use crate::model::object::TrajectorySample;
use crate::output::{ensure_dir, write_delimited_file, write_text_file};
use crate::table::load_trajectory_samples;
use log::{error, info};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Header of every per-entity state file.
pub const ENTITY_FILE_COLUMNS: [&str; 6] = ["FIELDS", "FRAME", "TIME", "POS_N", "POS_E", "POS_D"];

/// Consolidated descriptor file name inside the output directory.
pub const CONSOLIDATED_FILE_NAME: &str = "all_G_WORLD_ENTITIES.txt";

const FRAME_VALUE: &str = "0.0";

/// Output layout of a converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    pub output_dir: PathBuf,
    /// Subdirectory of `output_dir` holding the per-entity files.
    pub entity_subdir: String,
    /// Entity name prefix, also the file name prefix.
    pub entity_prefix: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./trajectories"),
            entity_subdir: "G".to_string(),
            entity_prefix: "G_".to_string(),
        }
    }
}

impl ConverterConfig {
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn entity_name(&self, key: u32) -> String {
        format!("{}{key}", self.entity_prefix)
    }

    /// `<output_dir>/<entity_subdir>/<entity_prefix><key>_.txt`
    pub fn entity_file(&self, key: u32) -> PathBuf {
        self.entity_dir()
            .join(format!("{}{key}_.txt", self.entity_prefix))
    }

    pub fn entity_dir(&self) -> PathBuf {
        self.output_dir.join(&self.entity_subdir)
    }

    pub fn consolidated_file(&self) -> PathBuf {
        self.output_dir.join(CONSOLIDATED_FILE_NAME)
    }
}

/// Files and blocks produced by one conversion call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversionResult {
    pub entity_blocks: BTreeMap<u32, String>,
    pub trajectory_files: BTreeMap<u32, PathBuf>,
    pub consolidated_file: PathBuf,
    pub num_entities: usize,
}

impl ConversionResult {
    fn merge(&mut self, other: ConversionResult) {
        self.entity_blocks.extend(other.entity_blocks);
        self.trajectory_files.extend(other.trajectory_files);
        self.consolidated_file = other.consolidated_file;
        self.num_entities = self.entity_blocks.len();
    }
}

/// Stateful converter; key assignments persist for the life of the instance.
#[derive(Debug, Clone)]
pub struct WorldEntityConverter {
    config: ConverterConfig,
    key_mapping: HashMap<(u64, i64), u32>,
    next_key: u32,
    entity_blocks: BTreeMap<u32, String>,
}

impl Default for WorldEntityConverter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl WorldEntityConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            key_mapping: HashMap::new(),
            next_key: 1,
            entity_blocks: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn key_for(&self, object_id: u64, group_id: i64) -> Option<u32> {
        self.key_mapping.get(&(object_id, group_id)).copied()
    }

    /// Number of keys assigned so far.
    pub fn num_keys(&self) -> usize {
        self.key_mapping.len()
    }

    /// Assigns keys to unseen pairs in first-seen order and returns the key
    /// of every sample, aligned with `samples`.
    pub fn assign_keys(&mut self, samples: &[TrajectorySample]) -> Vec<u32> {
        let mut keys = Vec::with_capacity(samples.len());
        for sample in samples {
            let pair = (sample.object_id, sample.group_id);
            let key = match self.key_mapping.get(&pair) {
                Some(key) => *key,
                None => {
                    let key = self.next_key;
                    self.key_mapping.insert(pair, key);
                    self.next_key += 1;
                    key
                }
            };
            keys.push(key);
        }
        keys
    }

    /// Converts one trajectory table.
    ///
    /// Writes one state file per key present in `samples`, then rewrites the
    /// consolidated descriptor file with every block produced so far.
    ///
    /// # Errors
    /// - `ConvertError::EmptyInput` for an empty table; no key is assigned.
    /// - `ConvertError::Output` when a file cannot be written.
    pub fn convert_samples(
        &mut self,
        samples: &[TrajectorySample],
    ) -> ConvertResult<ConversionResult> {
        let started_at = Instant::now();
        if samples.is_empty() {
            error!("event=convert module=convert status=error error_code=empty_input");
            return Err(ConvertError::EmptyInput);
        }

        let keys = self.assign_keys(samples);
        let mut rows_by_key: BTreeMap<u32, Vec<&TrajectorySample>> = BTreeMap::new();
        for (key, sample) in keys.into_iter().zip(samples) {
            rows_by_key.entry(key).or_default().push(sample);
        }

        ensure_dir(&self.config.entity_dir())?;
        let mut result = ConversionResult::default();
        for (key, rows) in &rows_by_key {
            let path = self.config.entity_file(*key);
            write_delimited_file(
                &path,
                '\t',
                &ENTITY_FILE_COLUMNS,
                rows.iter().map(|sample| entity_row(sample)),
            )?;

            let block = self.entity_block(*key, rows[0], &path);
            self.entity_blocks.insert(*key, block.clone());
            result.entity_blocks.insert(*key, block);
            result.trajectory_files.insert(*key, path);
        }

        result.consolidated_file = self.write_consolidated()?;
        result.num_entities = result.entity_blocks.len();

        info!(
            "event=convert module=convert status=ok rows={} entities={} total_keys={} duration_ms={}",
            samples.len(),
            result.num_entities,
            self.key_mapping.len(),
            started_at.elapsed().as_millis()
        );
        Ok(result)
    }

    /// Loads and converts one trajectory CSV file.
    pub fn convert_csv(&mut self, path: impl AsRef<Path>) -> ConvertResult<ConversionResult> {
        let samples = load_trajectory_samples(path)?;
        self.convert_samples(&samples)
    }

    /// Converts several files in order with continuous key numbering.
    ///
    /// The returned result merges the blocks and files of every input.
    pub fn convert_many<P: AsRef<Path>>(&mut self, paths: &[P]) -> ConvertResult<ConversionResult> {
        let mut merged = ConversionResult {
            consolidated_file: self.config.consolidated_file(),
            ..ConversionResult::default()
        };
        for path in paths {
            merged.merge(self.convert_csv(path)?);
        }
        Ok(merged)
    }

    fn entity_block(&self, key: u32, first: &TrajectorySample, path: &Path) -> String {
        format!(
            "WORLD_ENTITY {{\n    name = {}\n    position = \"{}\"\n    scale =\n    stateAttsLoadFilename = '{}'\n}}",
            self.config.entity_name(key),
            first.position,
            path.display()
        )
    }

    fn write_consolidated(&self) -> ConvertResult<PathBuf> {
        let path = self.config.consolidated_file();
        ensure_dir(&self.config.output_dir)?;
        let contents = self
            .entity_blocks
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n");
        write_text_file(&path, &contents)?;
        Ok(path)
    }
}

fn entity_row(sample: &TrajectorySample) -> Vec<String> {
    vec![
        String::new(),
        FRAME_VALUE.to_string(),
        sample.time_percent.to_string(),
        sample.position.north.to_string(),
        sample.position.east.to_string(),
        sample.position.down.to_string(),
    ]
}
