use super::{collinear_waypoints, right_angle_waypoints};
use crate::path::{NormalizedIndex, PathConfig, PathError, assign_progress, build_nodes};

fn progressed(waypoints: &[crate::geom::Pose]) -> crate::path::ProgressedNodes {
    let built = build_nodes(waypoints, &PathConfig::default());
    assign_progress(&built.nodes, built.total_length).unwrap()
}

#[test]
fn collinear_index_has_one_entry_per_half() {
    let p = progressed(&collinear_waypoints());
    let index = NormalizedIndex::build(&p.nodes, p.min_progress_delta, Some(1000)).unwrap();
    assert_eq!(index.entries(), &[0, 1, 1]);
    assert_eq!(index.step(), 0.5);
}

#[test]
fn every_entry_brackets_its_bucket() {
    let p = progressed(&right_angle_waypoints());
    let index = NormalizedIndex::build(&p.nodes, p.min_progress_delta, None).unwrap();
    let last_segment = p.nodes.len() - 2;

    let expected = (1.0 / p.min_progress_delta).floor() as usize + 1;
    assert!(index.len() >= expected && index.len() <= expected + 2);

    for (i, &entry) in index.entries().iter().enumerate() {
        let bucket = (i as f64 * index.step()).min(1.0);
        assert!(entry <= last_segment);
        assert!(p.nodes[entry].progress <= bucket, "entry {i}");
        assert!(entry == last_segment || bucket < p.nodes[entry + 1].progress, "entry {i}");
    }
}

#[test]
fn oversized_index_is_rejected() {
    let p = progressed(&collinear_waypoints());
    let err = NormalizedIndex::build(&p.nodes, p.min_progress_delta, Some(2)).unwrap_err();
    assert_eq!(err, PathError::IndexTooLarge { required: 4, max: 2 });
}

#[test]
fn single_node_index_is_trivial() {
    let p = progressed(&collinear_waypoints()[..1]);
    let index = NormalizedIndex::build(&p.nodes, p.min_progress_delta, Some(10)).unwrap();
    assert_eq!(index.entries(), &[0]);
    assert!(!index.is_empty());
}

#[test]
fn lookup_reads_entry_before_closing_bucket() {
    let p = progressed(&collinear_waypoints());
    let index = NormalizedIndex::build(&p.nodes, p.min_progress_delta, Some(1000)).unwrap();
    // table [0, 1, 1]: t = 0.9 lands in the closing bucket
    assert_eq!(index.lookup(0.9), 1);
    assert_eq!(index.lookup(0.1), 0);
    assert_eq!(index.lookup(1.0), 1);
}

#[test]
fn tightly_spaced_nodes_build_a_large_table_by_default() {
    // a short corner at the end of a long straight leg
    let waypoints = vec![
        super::facing([0.0, 0.0, 0.0], crate::geom::Vec3::X),
        super::facing([10_000.0, 0.0, 0.0], crate::geom::Vec3::X),
        super::facing([10_000.01, 0.0, 0.01], crate::geom::Vec3::Z),
    ];
    let p = progressed(&waypoints);
    let index = NormalizedIndex::build(&p.nodes, p.min_progress_delta, None).unwrap();
    assert!(index.len() > 1_000_000);
    assert_eq!(index.entries()[0], 0);
    assert_eq!(index.entries()[index.len() - 1], p.nodes.len() - 2);
}
