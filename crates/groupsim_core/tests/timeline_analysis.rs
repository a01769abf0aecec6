use groupsim_core::timeline::{
    active_groups_at, overlapping_groups, time_points, ActivityMatrix, TimelineReport,
};
use groupsim_core::ScheduledGroup;

#[test]
fn overlapping_windows_reach_two_concurrent_groups_without_gaps() {
    let groups = [
        ScheduledGroup::new(1, 10, 0.0, 50.0),
        ScheduledGroup::new(2, 15, 40.0, 100.0),
    ];
    let matrix = ActivityMatrix::build(&groups, 20);
    let concurrency = matrix.concurrency();

    let has_double = matrix
        .time_points()
        .iter()
        .zip(&concurrency)
        .any(|(time, count)| (40.0..=50.0).contains(time) && *count == 2);
    assert!(has_double);
    assert!(concurrency.iter().all(|count| *count > 0));

    let stats = matrix.concurrency_stats().unwrap();
    assert_eq!(stats.max_concurrent, 2);
    assert_eq!(stats.min_concurrent, 1);
    assert_eq!(stats.times_with_zero, 0);
}

#[test]
fn separated_windows_leave_an_idle_gap() {
    let groups = [
        ScheduledGroup::new(1, 10, 0.0, 30.0),
        ScheduledGroup::new(2, 15, 70.0, 100.0),
    ];
    let matrix = ActivityMatrix::build(&groups, 20);

    let has_gap = matrix
        .time_points()
        .iter()
        .zip(matrix.concurrency())
        .any(|(time, count)| *time > 30.0 && *time < 70.0 && count == 0);
    assert!(has_gap);
    assert!(matrix.concurrency_stats().unwrap().times_with_zero > 0);
    assert!(overlapping_groups(&groups).is_empty());
}

#[test]
fn touching_windows_do_not_overlap() {
    let touching = [
        ScheduledGroup::new(1, 1, 0.0, 40.0),
        ScheduledGroup::new(2, 1, 40.0, 80.0),
    ];
    assert!(overlapping_groups(&touching).is_empty());
    // Both count as active at the shared boundary.
    assert_eq!(active_groups_at(&touching, 40.0), vec![1, 2]);

    let crossing = [
        ScheduledGroup::new(1, 1, 0.0, 60.0),
        ScheduledGroup::new(2, 1, 40.0, 100.0),
    ];
    let pairs = overlapping_groups(&crossing);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].ids(), (1, 2));
    assert_eq!(pairs[0].overlap_start, 40.0);
    assert_eq!(pairs[0].overlap_stop, 60.0);
}

#[test]
fn overlap_pairs_follow_input_order() {
    let groups = [
        ScheduledGroup::new(3, 1, 20.0, 80.0),
        ScheduledGroup::new(1, 1, 0.0, 60.0),
        ScheduledGroup::new(2, 1, 40.0, 100.0),
    ];
    let ids = overlapping_groups(&groups)
        .iter()
        .map(|pair| pair.ids())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![(3, 1), (3, 2), (1, 2)]);
}

#[test]
fn boundary_samples_are_active() {
    let groups = [ScheduledGroup::new(1, 1, 0.0, 100.0)];
    let matrix = ActivityMatrix::build(&groups, 20);
    assert_eq!(matrix.cell(0, 0), Some(1));
    assert_eq!(matrix.cell(0, 19), Some(1));
    assert_eq!(*time_points(20).last().unwrap(), 100.0);
}

#[test]
fn report_saves_named_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let groups = [
        ScheduledGroup::new(1, 20, 0.0, 60.0),
        ScheduledGroup::new(2, 15, 40.0, 100.0),
    ];
    let report = TimelineReport::generate(&groups, 20);
    let path = report
        .save(dir.path(), "Two Groups Overlap", Some("demo"))
        .unwrap();

    assert_eq!(path, dir.path().join("demo_timeline_two_groups_overlap.txt"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Timeline Report: Two Groups Overlap\n"));
    assert!(text.contains("Groups 1 and 2: overlap from 40.0% to 60.0%"));
    assert!(text.contains("max_concurrent: 2\n"));
}
