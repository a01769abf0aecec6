use groupsim_core::schedule::{save_schedule_summary, MAX_GROUPS};
use groupsim_core::{validate_schedule, ScheduleSummary, ScheduleValidationError, ScheduledGroup};

fn valid_table() -> Vec<ScheduledGroup> {
    vec![
        ScheduledGroup::new(1, 10, 0.0, 30.0),
        ScheduledGroup::new(2, 15, 35.0, 65.0),
        ScheduledGroup::new(3, 8, 70.0, 100.0),
    ]
}

#[test]
fn valid_table_passes() {
    validate_schedule(&valid_table()).unwrap();
}

#[test]
fn six_groups_are_rejected() {
    let groups = (1..=6)
        .map(|id| ScheduledGroup::new(id, 1, 0.0, 10.0))
        .collect::<Vec<_>>();
    assert_eq!(groups.len(), MAX_GROUPS + 1);

    let err = validate_schedule(&groups).unwrap_err();
    assert_eq!(err, ScheduleValidationError::TooManyGroups { count: 6 });
    assert!(err.to_string().contains("Maximum 5 groups"));
}

#[test]
fn reversed_window_is_rejected() {
    let groups = vec![ScheduledGroup::new(1, 10, 60.0, 50.0)];
    let err = validate_schedule(&groups).unwrap_err();
    assert!(matches!(
        err,
        ScheduleValidationError::StartNotBeforeStop { group_id: 1, .. }
    ));
    assert!(err
        .to_string()
        .contains("Start time must be before stop time"));
}

#[test]
fn equal_start_and_stop_is_rejected() {
    let groups = vec![ScheduledGroup::new(4, 10, 50.0, 50.0)];
    assert!(matches!(
        validate_schedule(&groups),
        Err(ScheduleValidationError::StartNotBeforeStop { group_id: 4, .. })
    ));
}

#[test]
fn bounds_are_checked_before_ordering_and_size() {
    // Group 2 breaks the stop bound; group 1 breaks ordering and size.
    let groups = vec![
        ScheduledGroup::new(1, 0, 40.0, 20.0),
        ScheduledGroup::new(2, 5, 10.0, 120.0),
    ];
    let err = validate_schedule(&groups).unwrap_err();
    assert_eq!(
        err,
        ScheduleValidationError::StopAboveMax {
            group_id: 2,
            stop: 120.0
        }
    );
    assert!(err.to_string().starts_with("Stop times must be <= 100"));
}

#[test]
fn negative_start_is_rejected() {
    let groups = vec![ScheduledGroup::new(3, 5, -1.0, 20.0)];
    let err = validate_schedule(&groups).unwrap_err();
    assert!(err.to_string().starts_with("Start times must be >= 0"));
}

#[test]
fn non_positive_size_is_rejected_last() {
    let groups = vec![ScheduledGroup::new(2, 0, 0.0, 20.0)];
    let err = validate_schedule(&groups).unwrap_err();
    assert_eq!(
        err,
        ScheduleValidationError::NonPositiveSize {
            group_id: 2,
            size: 0
        }
    );
}

#[test]
fn nan_window_is_rejected() {
    let groups = vec![ScheduledGroup::new(1, 5, f64::NAN, 20.0)];
    assert!(matches!(
        validate_schedule(&groups),
        Err(ScheduleValidationError::StartBelowMin { group_id: 1, .. })
    ));
}

#[test]
fn empty_table_is_valid_with_no_summary() {
    validate_schedule(&[]).unwrap();
    assert!(ScheduleSummary::from_groups(&[]).is_none());
}

#[test]
fn summary_file_lists_table_and_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let path = save_schedule_summary(dir.path(), Some("check"), "input.csv", &valid_table())
        .unwrap();

    assert_eq!(path, dir.path().join("check_group_summary.txt"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Group Scheduler Summary\n"));
    assert!(text.contains("Input file: input.csv"));
    assert!(text.contains("total_participants: 33\n"));
    assert!(text.contains("max_group_size: 15\n"));
}

#[test]
fn summary_of_huge_sizes_is_saved_without_overflow() {
    let groups = vec![
        ScheduledGroup::new(1, i64::MAX, 0.0, 50.0),
        ScheduledGroup::new(2, 1, 40.0, 100.0),
    ];
    validate_schedule(&groups).unwrap();

    let summary = ScheduleSummary::from_groups(&groups).unwrap();
    assert_eq!(summary.total_participants, i128::from(i64::MAX) + 1);

    let dir = tempfile::tempdir().unwrap();
    let path = save_schedule_summary(dir.path(), Some("huge"), "huge.csv", &groups).unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("total_participants: 9223372036854775808\n"));
}
