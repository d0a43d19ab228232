use serde::Serialize;

use crate::geom::Pose;

/// Caller-supplied oriented point defining the intended path shape.
pub type Waypoint = Pose;

/// A point on the compiled path before progress has been assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawNode {
    pub pose: Pose,
}

/// A point on the compiled path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Node {
    pub pose: Pose,
    /// Arc length from the path start, normalized to `[0, 1]`.
    pub progress: f64,
    /// Arc length from the path start.
    pub length: f64,
}

/// Node index range `[start, end]` produced by smoothing one corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurveSegment {
    /// Index of the waypoint whose outgoing turn was smoothed.
    pub waypoint: usize,
    pub start: usize,
    pub end: usize,
}

impl CurveSegment {
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.end - self.start + 1
    }
}
