use groupsim_core::table::{
    group_row, load_scheduled_groups, load_spatial_groups, load_trajectory_samples, CsvTable,
    SPATIAL_COLUMNS,
};
use groupsim_core::{SimulationConfig, SpatialSimulator, TableError};
use std::collections::BTreeSet;

const SPATIAL_CSV: &str = "\
group_id,group_size,start_percent,stop_percent,center_north,center_east,center_down,spread_std,mean_travel_distance,travel_std,category
1,5,0,40,100,50,0,10,50,5,1
2,3.0,30,70,200,-30,-5,15,30,3,2
";

#[test]
fn scheduling_load_ignores_extra_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("groups.csv");
    std::fs::write(&path, SPATIAL_CSV).unwrap();

    let groups = load_scheduled_groups(&path).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].group_size, 3);
    assert_eq!(groups[1].start_percent, 30.0);
}

#[test]
fn spatial_load_reads_every_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("groups.csv");
    std::fs::write(&path, SPATIAL_CSV).unwrap();

    let groups = load_spatial_groups(&path).unwrap();
    assert_eq!(groups[1].center.east, -30.0);
    assert_eq!(groups[1].category, 2);
    assert_eq!(groups[0].travel_std, 5.0);
}

#[test]
fn missing_columns_are_all_named() {
    let table = CsvTable::parse("group_id,group_size\n1,5\n").unwrap();
    let err = table
        .require_columns(&["group_id", "group_size", "start_percent", "stop_percent"])
        .unwrap_err();
    match &err {
        TableError::MissingColumns(columns) => assert_eq!(
            columns,
            &BTreeSet::from(["start_percent".to_string(), "stop_percent".to_string()])
        ),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.to_string(),
        "Missing required columns: {start_percent, stop_percent}"
    );
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_scheduled_groups(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, TableError::NotFound(_)));
}

#[test]
fn unparsable_cell_names_line_and_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(
        &path,
        "group_id,group_size,start_percent,stop_percent\n1,5,zero,40\n",
    )
    .unwrap();

    let err = load_scheduled_groups(&path).unwrap_err();
    match err {
        TableError::InvalidValue { line, column, .. } => {
            assert_eq!(line, 2);
            assert_eq!(column, "start_percent");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fractional_size_is_rejected() {
    let table =
        CsvTable::parse("group_id,group_size,start_percent,stop_percent\n1,2.5,0,40\n").unwrap();
    let err = groupsim_core::table::parse_scheduled_groups(&table).unwrap_err();
    assert!(matches!(err, TableError::InvalidValue { .. }));
}

#[test]
fn saved_tables_load_back_identically() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("groups.csv");
    std::fs::write(&source, SPATIAL_CSV).unwrap();
    let groups = load_spatial_groups(&source).unwrap();

    let mut sim = SpatialSimulator::new(groups.clone(), SimulationConfig::seeded(25, 11)).unwrap();
    sim.generate_objects();
    sim.generate_trajectories().unwrap();
    let saved = sim.save_outputs(dir.path(), Some("io")).unwrap();

    assert_eq!(load_spatial_groups(&saved.input_groups).unwrap(), groups);
    let reloaded = load_trajectory_samples(saved.trajectories.unwrap()).unwrap();
    assert_eq!(reloaded.as_slice(), sim.trajectories().unwrap());

    let header = std::fs::read_to_string(&saved.input_groups)
        .unwrap()
        .lines()
        .next()
        .unwrap()
        .to_string();
    assert_eq!(header, SPATIAL_COLUMNS.join(","));
    assert_eq!(group_row(&groups[0])[0], "1");
}

#[test]
fn objects_file_has_external_columns() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("groups.csv");
    std::fs::write(&source, SPATIAL_CSV).unwrap();

    let mut sim = SpatialSimulator::new(
        load_spatial_groups(&source).unwrap(),
        SimulationConfig::seeded(10, 2),
    )
    .unwrap();
    sim.generate_objects();
    let saved = sim.save_outputs(dir.path(), Some("cols")).unwrap();

    let text = std::fs::read_to_string(&saved.objects).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "object_id,group_id,category,start_north,start_east,start_down,end_north,end_east,end_down,travel_distance"
    );
    assert_eq!(lines.count(), 8);

    let summary = std::fs::read_to_string(&saved.summary).unwrap();
    assert!(summary.contains("total_objects: 8\n"));
    assert!(!summary.contains("total_trajectory_points"));
}
