use groupsim_core::convert::CONSOLIDATED_FILE_NAME;
use groupsim_core::table::{trajectory_row, TRAJECTORY_COLUMNS};
use groupsim_core::{
    Category, ConvertError, ConverterConfig, Position3, TrajectorySample, WorldEntityConverter,
};
use std::path::Path;

fn sample(object_id: u64, group_id: i64, time: f64, north: f64) -> TrajectorySample {
    TrajectorySample {
        object_id,
        group_id,
        category: Category::Two,
        time_percent: time,
        position: Position3::new(north, 2.5, -1.0),
    }
}

fn write_trajectory_csv(path: &Path, samples: &[TrajectorySample]) {
    let mut text = TRAJECTORY_COLUMNS.join(",");
    text.push('\n');
    for sample in samples {
        text.push_str(&trajectory_row(sample).join(","));
        text.push('\n');
    }
    std::fs::write(path, text).unwrap();
}

#[test]
fn keys_are_stable_across_calls() {
    let dir = tempfile::tempdir().unwrap();
    let mut converter = WorldEntityConverter::new(ConverterConfig::with_output_dir(dir.path()));

    let first = converter
        .convert_samples(&[sample(1, 1, 0.0, 10.0), sample(1, 2, 0.0, 20.0)])
        .unwrap();
    assert_eq!(first.entity_blocks.keys().copied().collect::<Vec<_>>(), vec![1, 2]);

    let second = converter
        .convert_samples(&[sample(3, 1, 0.0, 30.0), sample(1, 2, 50.0, 21.0)])
        .unwrap();
    assert_eq!(second.entity_blocks.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(second.num_entities, 2);
    assert_eq!(converter.key_for(1, 2), Some(2));
    assert_eq!(converter.key_for(3, 1), Some(3));
}

#[test]
fn object_id_alone_does_not_identify_an_entity() {
    let mut converter = WorldEntityConverter::default();
    let keys = converter.assign_keys(&[sample(7, 1, 0.0, 0.0), sample(7, 2, 0.0, 0.0)]);
    assert_eq!(keys, vec![1, 2]);
}

#[test]
fn entity_file_is_tab_delimited_with_blank_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut converter = WorldEntityConverter::new(ConverterConfig::with_output_dir(dir.path()));
    let result = converter
        .convert_samples(&[sample(4, 1, 0.0, 1.5), sample(4, 1, 25.0, 3.0)])
        .unwrap();

    let path = &result.trajectory_files[&1];
    assert_eq!(path, &dir.path().join("G").join("G_1_.txt"));
    let text = std::fs::read_to_string(path).unwrap();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "FIELDS\tFRAME\tTIME\tPOS_N\tPOS_E\tPOS_D");
    assert_eq!(lines[1], "\t0.0\t0\t1.5\t2.5\t-1");
    assert_eq!(lines[2], "\t0.0\t25\t3\t2.5\t-1");
    assert_eq!(lines.len(), 3);
}

#[test]
fn descriptor_block_uses_first_position_and_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut converter = WorldEntityConverter::new(ConverterConfig::with_output_dir(dir.path()));
    let result = converter
        .convert_samples(&[sample(4, 1, 0.0, 1.5), sample(4, 1, 25.0, 3.0)])
        .unwrap();

    let expected = format!(
        "WORLD_ENTITY {{\n    name = G_1\n    position = \"1.5, 2.5, -1\"\n    scale =\n    stateAttsLoadFilename = '{}'\n}}",
        dir.path().join("G").join("G_1_.txt").display()
    );
    assert_eq!(result.entity_blocks[&1], expected);
}

#[test]
fn consolidated_file_covers_every_key_seen() {
    let dir = tempfile::tempdir().unwrap();
    let mut converter = WorldEntityConverter::new(ConverterConfig::with_output_dir(dir.path()));
    converter
        .convert_samples(&[sample(1, 1, 0.0, 0.0)])
        .unwrap();
    let result = converter
        .convert_samples(&[sample(2, 1, 0.0, 0.0)])
        .unwrap();

    assert_eq!(result.consolidated_file, dir.path().join(CONSOLIDATED_FILE_NAME));
    let text = std::fs::read_to_string(&result.consolidated_file).unwrap();
    let blocks = text.split("\n\n").collect::<Vec<_>>();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].contains("name = G_1\n"));
    assert!(blocks[1].contains("name = G_2\n"));
    assert!(!text.ends_with('\n'));
}

#[test]
fn empty_table_is_rejected_without_assigning_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut converter = WorldEntityConverter::new(ConverterConfig::with_output_dir(dir.path()));
    let err = converter.convert_samples(&[]).unwrap_err();
    assert!(matches!(err, ConvertError::EmptyInput));
    assert_eq!(converter.num_keys(), 0);
}

#[test]
fn multiple_files_continue_numbering() {
    let dir = tempfile::tempdir().unwrap();
    let first_csv = dir.path().join("first.csv");
    let second_csv = dir.path().join("second.csv");
    write_trajectory_csv(&first_csv, &[sample(1, 1, 0.0, 0.0), sample(2, 1, 0.0, 1.0)]);
    write_trajectory_csv(&second_csv, &[sample(1, 1, 10.0, 0.5), sample(1, 3, 0.0, 9.0)]);

    let out = dir.path().join("out");
    let mut converter = WorldEntityConverter::new(ConverterConfig::with_output_dir(&out));
    let result = converter.convert_many(&[first_csv, second_csv]).unwrap();

    assert_eq!(result.num_entities, 3);
    assert_eq!(result.trajectory_files.len(), 3);
    assert_eq!(converter.key_for(1, 3), Some(3));
    assert!(out.join("G").join("G_3_.txt").exists());
}

#[test]
fn missing_trajectory_file_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut converter = WorldEntityConverter::new(ConverterConfig::with_output_dir(dir.path()));
    let err = converter
        .convert_csv(dir.path().join("absent.csv"))
        .unwrap_err();
    assert!(matches!(err, ConvertError::Table(_)));
}
