use easypath_engine::geom::{Point3, Pose, Rotation, Tolerance, Vec3, polyline_length};
use easypath_engine::path::{CompiledPath, PathConfig, PathError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn facing(position: [f64; 3], dir: Vec3) -> Pose {
    Pose::new(
        Point3::from(position),
        Rotation::looking_along(dir).expect("non-zero direction"),
    )
}

fn straight_line() -> Vec<Pose> {
    vec![
        facing([0.0, 0.0, 0.0], Vec3::X),
        facing([5.0, 0.0, 0.0], Vec3::X),
        facing([10.0, 0.0, 0.0], Vec3::X),
    ]
}

fn right_angle() -> Vec<Pose> {
    vec![
        facing([0.0, 0.0, 0.0], Vec3::X),
        facing([10.0, 0.0, 10.0], Vec3::Z),
        facing([10.0, 0.0, 20.0], Vec3::Z),
    ]
}

/// Random walk with headings wandering up to 30 degrees per waypoint and
/// look directions off the next leg by up to 30 degrees.
fn random_waypoints(rng: &mut StdRng, count: usize) -> Vec<Pose> {
    let mut heading = Vec3::X;
    let mut position = Point3::ORIGIN;
    let mut legs = Vec::with_capacity(count);
    for _ in 0..count {
        let turn = Rotation::from_axis_angle(Vec3::Y, rng.random_range(-0.5..0.5)).unwrap();
        heading = turn.rotate_vec(heading);
        let step = rng.random_range(3.0..15.0);
        let rise = rng.random_range(-1.0..1.0);
        legs.push((position, heading));
        position = position + heading * step + Vec3::Y * rise;
    }

    legs.iter()
        .enumerate()
        .map(|(i, &(position, heading))| {
            let toward = legs
                .get(i + 1)
                .and_then(|&(next, _)| (next - position).normalized())
                .unwrap_or(heading);
            let wobble = Rotation::from_axis_angle(Vec3::Y, rng.random_range(-0.5..0.5)).unwrap();
            Pose::new(position, Rotation::looking_along(wobble.rotate_vec(toward)).unwrap())
        })
        .collect()
}

#[test]
fn straight_line_example() {
    let path = CompiledPath::new(&straight_line()).compiled().expect("compile");
    let tol = Tolerance::new(1e-9);

    assert!(tol.approx_eq_f64(path.length().unwrap(), 10.0));
    assert_eq!(path.nodes().unwrap().len(), 3);
    assert!(!path.diagnostics().unwrap().is_smoothed());

    let by_length = path.calculate_pose_by_length(5.0).unwrap();
    assert!(tol.approx_eq_point3(by_length.position, Point3::new(5.0, 0.0, 0.0)));
    let by_progress = path.calculate_pose(0.5).unwrap();
    assert!(tol.approx_eq_point3(by_progress.position, Point3::new(5.0, 0.0, 0.0)));
    assert!(tol.approx_eq_vec3(by_progress.look_vector(), Vec3::X));
}

#[test]
fn right_angle_example() {
    let waypoints = right_angle();
    let path = CompiledPath::new(&waypoints).compiled().expect("compile");
    let nodes = path.nodes().unwrap();

    assert_eq!(nodes.len(), waypoints.len() + 9);
    let diagnostics = path.diagnostics().unwrap();
    assert_eq!(diagnostics.curve_segments.len(), 1);
    assert_eq!(diagnostics.curve_node_count(), 10);

    let positions: Vec<_> = waypoints.iter().map(|w| w.position).collect();
    assert!(path.length().unwrap() > polyline_length(&positions));

    let tol = Tolerance::new(1e-9);
    assert!(tol.approx_eq_pose(path.calculate_pose(0.0).unwrap(), waypoints[0]));
    assert!(tol.approx_eq_pose(path.calculate_pose(1.0).unwrap(), waypoints[2]));

    // the smoothed corner cuts inside the sharp corner at (10, 0, 0)
    let mid_curve = path.calculate_pose(nodes[5].progress).unwrap();
    assert!(mid_curve.position.x < 10.0 && mid_curve.position.z > 0.0);
}

#[test]
fn raised_corner_is_still_smoothed() {
    // the next waypoint sits half a unit higher, so the look lines are skew
    let waypoints = vec![
        facing([0.0, 0.0, 0.0], Vec3::X),
        facing([10.0, 0.5, 10.0], Vec3::Z),
        facing([10.0, 0.5, 20.0], Vec3::Z),
    ];
    let path = CompiledPath::new(&waypoints).compiled().expect("compile");
    let diagnostics = path.diagnostics().unwrap();

    assert_eq!(diagnostics.curve_segments.len(), 1);
    assert_eq!(diagnostics.missing_intersection_fallbacks, 0);
    assert_eq!(path.nodes().unwrap().len(), waypoints.len() + 9);

    // the curve bends through the closest-approach midpoint at y = 0.25
    let mid_curve = path.nodes().unwrap()[5].pose.position;
    assert!(mid_curve.x < 10.0 && mid_curve.z > 0.0);
    assert!(mid_curve.y > 0.0 && mid_curve.y < 0.5);

    let strict = PathConfig {
        max_intersection_skew: Some(1e-6),
        ..PathConfig::default()
    };
    let path = CompiledPath::with_config(&waypoints, strict).compiled().unwrap();
    assert_eq!(path.diagnostics().unwrap().missing_intersection_fallbacks, 1);
    assert_eq!(path.nodes().unwrap().len(), 3);
}

#[test]
fn tight_corner_after_long_leg_compiles_by_default() {
    let waypoints = vec![
        facing([0.0, 0.0, 0.0], Vec3::X),
        facing([10_000.0, 0.0, 0.0], Vec3::X),
        facing([10_000.01, 0.0, 0.01], Vec3::Z),
    ];
    let path = CompiledPath::new(&waypoints).compiled().expect("compile");

    assert!(path.index_len().unwrap() > 1_000_000);
    assert!(path.diagnostics().unwrap().is_smoothed());
    let tol = Tolerance::new(1e-6);
    assert!(tol.approx_eq_point3(
        path.calculate_pose_by_length(5_000.0).unwrap().position,
        Point3::new(5_000.0, 0.0, 0.0)
    ));
    assert!(tol.approx_eq_pose(path.calculate_pose(1.0).unwrap(), waypoints[2]));
}

#[test]
fn queries_require_compilation() {
    let waypoints = straight_line();
    let path = CompiledPath::new(&waypoints);

    assert!(!path.is_compiled());
    assert_eq!(path.waypoints(), waypoints.as_slice());
    assert_eq!(path.calculate_pose(0.5), Err(PathError::NotCompiled));
    assert_eq!(path.calculate_pose_by_length(1.0), Err(PathError::NotCompiled));
    assert_eq!(path.length(), Err(PathError::NotCompiled));
    assert!(matches!(path.nodes(), Err(PathError::NotCompiled)));
    assert_eq!(path.index_len(), Err(PathError::NotCompiled));
    assert!(matches!(path.sample_poses(0.1), Err(PathError::NotCompiled)));
}

#[test]
fn compile_is_idempotent() {
    let mut path = CompiledPath::new(&right_angle());
    path.compile().unwrap();
    let nodes = path.nodes().unwrap().to_vec();
    let length = path.length().unwrap();

    path.compile().unwrap();
    assert_eq!(path.nodes().unwrap(), nodes.as_slice());
    assert_eq!(path.length().unwrap(), length);
}

#[test]
fn clones_are_independent() {
    let original = CompiledPath::new(&right_angle());
    let mut copy = original.clone();
    copy.compile().unwrap();

    assert!(copy.is_compiled());
    assert!(!original.is_compiled());

    let compiled = original.compiled().unwrap();
    let second = compiled.clone();
    drop(compiled);
    assert!(second.is_compiled());
    assert_eq!(second.calculate_pose(0.3), copy.calculate_pose(0.3));
}

#[test]
fn single_waypoint_path() {
    let waypoint = facing([3.0, 1.0, -2.0], Vec3::Y);
    let path = CompiledPath::new(&[waypoint]).compiled().unwrap();

    assert_eq!(path.nodes().unwrap().len(), 1);
    assert_eq!(path.length().unwrap(), 0.0);
    for t in [0.0, 0.4, 1.0] {
        assert_eq!(path.calculate_pose(t).unwrap(), waypoint);
    }
    assert_eq!(path.calculate_pose_by_length(1.0), Err(PathError::ZeroLength));
}

#[test]
fn duplicate_positions_are_degenerate() {
    let waypoints = vec![
        facing([0.0, 0.0, 0.0], Vec3::X),
        facing([0.0, 0.0, 0.0], Vec3::X),
        facing([5.0, 0.0, 0.0], Vec3::X),
    ];
    let mut path = CompiledPath::new(&waypoints);
    let err = path.compile().map(|_| ()).unwrap_err();

    assert!(matches!(err, PathError::DegenerateGeometry { index: 0, .. }));
    assert!(!path.is_compiled());
}

#[test]
fn rejects_empty_and_non_finite_input() {
    assert_eq!(
        CompiledPath::new(&[]).compiled().map(|_| ()),
        Err(PathError::NoWaypoints)
    );

    let mut waypoints = straight_line();
    waypoints[1].position.y = f64::NAN;
    assert_eq!(
        CompiledPath::new(&waypoints).compiled().map(|_| ()),
        Err(PathError::NonFiniteInput { index: 1 })
    );
}

#[test]
fn index_size_is_bounded_by_config() {
    let config = PathConfig {
        max_index_entries: Some(4),
        ..PathConfig::default()
    };
    let err = CompiledPath::with_config(&right_angle(), config)
        .compiled()
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(err, PathError::IndexTooLarge { max: 4, .. }));

    let invalid = PathConfig {
        curve_samples: 0,
        ..PathConfig::default()
    };
    assert!(matches!(
        CompiledPath::with_config(&right_angle(), invalid).compiled(),
        Err(PathError::InvalidConfig(_))
    ));
}

#[test]
fn progress_and_distance_are_clamped() {
    let path = CompiledPath::new(&right_angle()).compiled().unwrap();
    let start = path.calculate_pose(0.0).unwrap();
    let end = path.calculate_pose(1.0).unwrap();

    assert_eq!(path.calculate_pose(-3.0).unwrap(), start);
    assert_eq!(path.calculate_pose(7.5).unwrap(), end);
    assert_eq!(path.calculate_pose_by_length(-1.0).unwrap(), start);
    assert_eq!(path.calculate_pose_by_length(1e6).unwrap(), end);
}

#[test]
fn deviation_moves_along_right_vector() {
    let path = CompiledPath::new(&straight_line()).compiled().unwrap();
    let tol = Tolerance::new(1e-9);

    let pose = path.calculate_pose_with_deviation(0.5, 1.5).unwrap();
    assert!(tol.approx_eq_point3(pose.position, Point3::new(5.0, 0.0, 1.5)));
    let pose = path.calculate_pose_by_length_with_deviation(2.0, -1.0).unwrap();
    assert!(tol.approx_eq_point3(pose.position, Point3::new(2.0, 0.0, -1.0)));
}

#[test]
fn sample_poses_cover_the_whole_path() {
    let waypoints = right_angle();
    let path = CompiledPath::new(&waypoints).compiled().unwrap();

    let poses = path.sample_poses(0.01).unwrap();
    assert_eq!(poses.len(), 101);
    assert_eq!(poses[0], path.calculate_pose(0.0).unwrap());
    assert_eq!(poses[100], path.calculate_pose(1.0).unwrap());

    // a step that does not divide 1 still ends exactly at the last node
    let poses = path.sample_poses(0.3).unwrap();
    assert_eq!(poses.len(), 5);
    assert_eq!(poses[4], waypoints[2]);

    for step in [0.0, -0.1, f64::NAN, 1e-9] {
        assert!(matches!(path.sample_poses(step), Err(PathError::InvalidConfig(_))));
    }
    assert_eq!(
        CompiledPath::sample_progress(0.25).unwrap(),
        vec![0.0, 0.25, 0.5, 0.75, 1.0]
    );
}

#[test]
fn random_paths_hold_their_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut smoothed_corners = 0;

    for round in 0..25 {
        let count = rng.random_range(2..12);
        let waypoints = random_waypoints(&mut rng, count);
        let path = CompiledPath::new(&waypoints)
            .compiled()
            .unwrap_or_else(|err| panic!("round {round}: {err}"));
        let nodes = path.nodes().unwrap();
        let length = path.length().unwrap();

        // progress pinned and non-decreasing
        assert_eq!(nodes[0].progress, 0.0, "round {round}");
        assert_eq!(nodes[nodes.len() - 1].progress, 1.0, "round {round}");
        assert!(nodes.windows(2).all(|p| p[0].progress <= p[1].progress), "round {round}");

        // length is the sum of node spacing
        let positions: Vec<_> = nodes.iter().map(|n| n.pose.position).collect();
        let spacing = polyline_length(&positions);
        assert!((length - spacing).abs() <= 1e-9 * length.max(1.0), "round {round}");

        // the node count grows by a fixed amount per smoothed corner
        let diagnostics = path.diagnostics().unwrap();
        assert_eq!(
            nodes.len(),
            waypoints.len() + 9 * diagnostics.curve_segments.len(),
            "round {round}"
        );
        smoothed_corners += diagnostics.curve_segments.len();

        // endpoints
        let tol = Tolerance::new(1e-9);
        assert!(tol.approx_eq_pose(path.calculate_pose(0.0).unwrap(), nodes[0].pose));
        assert!(tol.approx_eq_pose(
            path.calculate_pose(1.0).unwrap(),
            waypoints[waypoints.len() - 1]
        ));

        // queries never move backwards along the path
        let mut previous = 0.0;
        for i in 0..=200_u32 {
            let t = f64::from(i) / 200.0;
            let pose = path.calculate_pose(t).unwrap();
            let link = nodes
                .windows(2)
                .position(|pair| t < pair[1].progress)
                .unwrap_or(nodes.len() - 2);
            let along = nodes[link].length + nodes[link].pose.position.distance_to(pose.position);
            assert!(along + 1e-9 >= previous, "round {round}, t = {t}");
            previous = along;
        }
    }

    // every check above also ran over curved nodes
    assert!(smoothed_corners > 0);
}
