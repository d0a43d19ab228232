//! Intersection of the forward lines of two oriented poses.
//!
//! Corner smoothing needs the point where the travel direction of one
//! waypoint meets the travel direction of the next. In 3D the two lines are
//! rarely exactly coplanar, so the result is the midpoint of the
//! closest-approach points. Only parallel lines (and, with `forward_only`,
//! lines that do not converge between the poses) have no intersection.

use super::core::{Point3, Pose, Tolerance};

/// Intersection of the look lines of `a` and `b`, whatever their skew gap.
///
/// With `forward_only`, the point must lie ahead of `a` along its look vector
/// and `b` must lie ahead of the point along its own look vector, i.e. the
/// corner sits between the two poses in travel order.
#[must_use]
pub fn intersect(a: &Pose, b: &Pose, forward_only: bool) -> Option<Point3> {
    intersect_with_max_skew(a, b, forward_only, None)
}

/// [`intersect`], additionally rejecting lines whose closest-approach gap
/// exceeds `max_skew * max(|b - a|, 1)`.
#[must_use]
pub fn intersect_with_max_skew(
    a: &Pose,
    b: &Pose,
    forward_only: bool,
    max_skew: Option<f64>,
) -> Option<Point3> {
    let da = a.look_vector();
    let db = b.look_vector();
    let w0 = a.position - b.position;

    let aa = da.dot(da);
    let ab = da.dot(db);
    let bb = db.dot(db);
    let d = da.dot(w0);
    let e = db.dot(w0);

    let denom = aa * bb - ab * ab;
    if !denom.is_finite() || denom <= Tolerance::ZERO_LENGTH.eps * aa * bb {
        return None;
    }

    let s = (ab * e - bb * d) / denom;
    let u = (aa * e - ab * d) / denom;

    let on_a = a.position + da * s;
    let on_b = b.position + db * u;

    let scale = a.position.distance_to(b.position).max(1.0);
    if let Some(max_skew) = max_skew {
        if on_a.distance_to(on_b) > max_skew * scale {
            return None;
        }
    }

    if forward_only {
        let eps = Tolerance::DEFAULT.eps * scale;
        if s <= eps || u >= -eps {
            return None;
        }
    }

    Some(on_a.lerp(on_b, 0.5))
}
