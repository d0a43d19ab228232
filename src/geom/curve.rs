use super::core::Point3;

/// A parametric curve over `[0, 1]`.
pub trait Curve3 {
    fn point_at(&self, t: f64) -> Point3;
}

/// Quadratic Bezier through `p0`, pulled toward the control point `p1`,
/// ending at `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier3 {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
}

impl QuadraticBezier3 {
    #[must_use]
    pub const fn new(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self { p0, p1, p2 }
    }
}

impl Curve3 for QuadraticBezier3 {
    fn point_at(&self, t: f64) -> Point3 {
        bezier_point(self.p0, self.p1, self.p2, t)
    }
}

/// Point on the quadratic Bezier `[p0, p1, p2]` at parameter `t` (clamped).
#[must_use]
pub fn bezier_point(p0: Point3, p1: Point3, p2: Point3, t: f64) -> Point3 {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    point_weighted_sum(p0, u * u, p1, 2.0 * u * t, p2, t * t)
}

/// Samples `count` points at parameters `k / count` for `k in 0..count`.
/// The curve end (`t = 1`) is not included.
#[must_use]
pub fn sample_curve_open(curve: &impl Curve3, count: usize) -> Vec<Point3> {
    if count == 0 {
        return Vec::new();
    }
    let denom = count as f64;
    (0..count)
        .map(|k| curve.point_at(k as f64 / denom))
        .collect()
}

/// Sum of distances between consecutive points.
#[must_use]
pub fn polyline_length(points: &[Point3]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].distance_to(pair[1]))
        .sum()
}

fn point_weighted_sum(a: Point3, wa: f64, b: Point3, wb: f64, c: Point3, wc: f64) -> Point3 {
    Point3::new(
        a.x * wa + b.x * wb + c.x * wc,
        a.y * wa + b.y * wb + c.y * wc,
        a.z * wa + b.z * wb + c.z * wc,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_bezier_hits_endpoints() {
        let curve = QuadraticBezier3::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 10.0),
        );
        assert_eq!(curve.point_at(0.0), curve.p0);
        assert_eq!(curve.point_at(1.0), curve.p2);
        assert_eq!(curve.point_at(0.5), Point3::new(7.5, 0.0, 2.5));
        // parameters are clamped
        assert_eq!(curve.point_at(-1.0), curve.p0);
        assert_eq!(curve.point_at(2.0), curve.p2);
    }

    #[test]
    fn open_sampling_excludes_end() {
        // control point on the chord: a straight, uniformly parameterized curve
        let line = QuadraticBezier3::new(
            Point3::ORIGIN,
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
        );
        let pts = sample_curve_open(&line, 10);
        assert_eq!(pts.len(), 10);
        assert_eq!(pts[0], Point3::ORIGIN);
        assert!((pts[9].x - 9.0).abs() < 1e-12);
        assert!(sample_curve_open(&line, 0).is_empty());
    }

    #[test]
    fn polyline_length_sums_segments() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
            Point3::new(3.0, 4.0, 2.0),
        ];
        assert_eq!(polyline_length(&pts), 7.0);
        assert_eq!(polyline_length(&pts[..1]), 0.0);
    }

    #[test]
    fn bezier_point_matches_curve() {
        let (a, b, c) = (
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
            Point3::new(4.0, 4.0, 0.0),
        );
        assert_eq!(
            bezier_point(a, b, c, 0.3),
            QuadraticBezier3::new(a, b, c).point_at(0.3)
        );
    }
}
