//! Waypoint to node conversion with corner smoothing.
//!
//! Every waypoint except the last contributes either one straight node or a
//! run of curved nodes sampled from a quadratic Bezier through the corner
//! where its look line meets the next waypoint's look line. The last
//! waypoint becomes the terminal node unchanged.

use super::config::PathConfig;
use super::node::{CurveSegment, RawNode, Waypoint};
use crate::geom::{Point3, Pose, QuadraticBezier3, intersect_with_max_skew, sample_curve_open};

/// Output of [`build_nodes`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltNodes {
    pub nodes: Vec<RawNode>,
    /// Sum of the distances between consecutive nodes.
    pub total_length: f64,
    pub curve_segments: Vec<CurveSegment>,
    pub straight_segments: usize,
    /// Turns kept straight because the turn angle was not a number:
    /// coincident waypoints, or a look vector whose dot product with the
    /// travel direction rounds outside `[-1, 1]`.
    pub nan_angle_fallbacks: usize,
    /// Turns above the angle threshold kept straight because the look lines
    /// never meet ahead of the waypoint.
    pub missing_intersection_fallbacks: usize,
}

enum SegmentKind {
    Straight,
    Curved(Point3),
}

pub fn build_nodes(waypoints: &[Waypoint], config: &PathConfig) -> BuiltNodes {
    let angle_offset = config.angle_offset_radians();
    let mut built = BuiltNodes {
        nodes: Vec::with_capacity(waypoints.len()),
        ..BuiltNodes::default()
    };

    for (index, current) in waypoints.iter().enumerate() {
        let Some(next) = waypoints.get(index + 1) else {
            built.nodes.push(RawNode { pose: *current });
            break;
        };

        match classify_turn(index, current, next, angle_offset, config, &mut built) {
            SegmentKind::Straight => push_straight(current, next, &mut built),
            SegmentKind::Curved(corner) => {
                push_curve(index, current, next, corner, config.curve_samples, &mut built);
            }
        }
    }

    log::debug!(
        "built {} nodes from {} waypoints ({} curves, {} straight), length {:.4}",
        built.nodes.len(),
        waypoints.len(),
        built.curve_segments.len(),
        built.straight_segments,
        built.total_length
    );

    built
}

fn classify_turn(
    index: usize,
    current: &Waypoint,
    next: &Waypoint,
    angle_offset: f64,
    config: &PathConfig,
    built: &mut BuiltNodes,
) -> SegmentKind {
    let delta = next.position - current.position;
    // Zero delta yields a NaN direction and therefore a NaN angle. A dot
    // product just outside [-1, 1] is NaN too and takes the same fallback.
    let angle = delta.unit_unchecked().dot(current.look_vector()).acos();

    if angle.is_nan() {
        log::trace!("waypoint {index}: turn angle is NaN, keeping segment straight");
        built.nan_angle_fallbacks += 1;
        return SegmentKind::Straight;
    }
    if angle.abs() <= angle_offset {
        return SegmentKind::Straight;
    }

    match intersect_with_max_skew(current, next, true, config.max_intersection_skew) {
        Some(corner) => SegmentKind::Curved(corner),
        None => {
            log::trace!(
                "waypoint {index}: look lines do not meet ahead ({:.2} deg), keeping segment straight",
                angle.to_degrees()
            );
            built.missing_intersection_fallbacks += 1;
            SegmentKind::Straight
        }
    }
}

fn push_straight(current: &Waypoint, next: &Waypoint, built: &mut BuiltNodes) {
    built.total_length += current.position.distance_to(next.position);
    let pose = Pose::look_at(current.position, next.position).unwrap_or(*current);
    built.nodes.push(RawNode { pose });
    built.straight_segments += 1;
}

fn push_curve(
    index: usize,
    current: &Waypoint,
    next: &Waypoint,
    corner: Point3,
    samples: usize,
    built: &mut BuiltNodes,
) {
    let curve = QuadraticBezier3::new(current.position, corner, next.position);
    let points = sample_curve_open(&curve, samples);
    let start = built.nodes.len();

    for (k, &point) in points.iter().enumerate() {
        // The curve end coincides with the first node of the next segment.
        let toward = points.get(k + 1).copied().unwrap_or(curve.p2);
        built.total_length += point.distance_to(toward);

        let pose = if k == 0 {
            *current
        } else {
            Pose::look_at(point, toward).unwrap_or(Pose::new(point, current.rotation))
        };
        built.nodes.push(RawNode { pose });
    }

    built.curve_segments.push(CurveSegment {
        waypoint: index,
        start,
        end: built.nodes.len() - 1,
    });
}
