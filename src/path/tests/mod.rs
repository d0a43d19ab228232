mod test_index_basic;

use crate::geom::{Point3, Pose, Rotation, Vec3};

pub(super) fn facing(position: [f64; 3], dir: Vec3) -> Pose {
    Pose::new(
        Point3::from(position),
        Rotation::looking_along(dir).expect("non-zero direction"),
    )
}

/// Three waypoints with a 90 degree turn at the first one.
pub(super) fn right_angle_waypoints() -> Vec<Pose> {
    vec![
        facing([0.0, 0.0, 0.0], Vec3::X),
        facing([10.0, 0.0, 10.0], Vec3::Z),
        facing([10.0, 0.0, 20.0], Vec3::Z),
    ]
}

pub(super) fn collinear_waypoints() -> Vec<Pose> {
    vec![
        facing([0.0, 0.0, 0.0], Vec3::X),
        facing([5.0, 0.0, 0.0], Vec3::X),
        facing([10.0, 0.0, 0.0], Vec3::X),
    ]
}
