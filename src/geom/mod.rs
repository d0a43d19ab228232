mod core;
mod curve;
mod intersect;

pub use core::{Point3, Pose, Rotation, Tolerance, Vec3};
pub use curve::{
    Curve3, QuadraticBezier3, bezier_point, polyline_length, sample_curve_open,
};
pub use intersect::{intersect, intersect_with_max_skew};
