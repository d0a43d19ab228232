//! Waypoint path compilation and pose queries.
//!
//! A [`CompiledPath`] turns an ordered list of oriented waypoints into a
//! traversable path in three passes, run once by
//! [`CompiledPath::compile`]:
//!
//! 1. **Node building** ([`build_nodes`]): each waypoint pair becomes one
//!    straight node, or, when the turn exceeds the angle threshold and the
//!    look lines meet ahead, a run of nodes sampled from a quadratic Bezier
//!    through that corner.
//! 2. **Progress assignment** ([`assign_progress`]): cumulative arc length,
//!    normalized to `[0, 1]`, plus the smallest step between nodes.
//! 3. **Index construction** ([`NormalizedIndex`]): a uniform-step table from
//!    progress buckets to node segments, at the resolution of that smallest
//!    step.
//!
//! Queries then resolve progress (or absolute distance) to a segment through
//! the table and blend the two bounding node poses.
//!
//! # Example
//!
//! ```
//! use easypath_engine::geom::{Point3, Pose, Rotation, Vec3};
//! use easypath_engine::path::CompiledPath;
//!
//! let facing_x = Rotation::looking_along(Vec3::X).unwrap();
//! let waypoints = [
//!     Pose::new(Point3::new(0.0, 0.0, 0.0), facing_x),
//!     Pose::new(Point3::new(5.0, 0.0, 0.0), facing_x),
//!     Pose::new(Point3::new(10.0, 0.0, 0.0), facing_x),
//! ];
//!
//! let path = CompiledPath::new(&waypoints).compiled().unwrap();
//! assert!((path.length().unwrap() - 10.0).abs() < 1e-12);
//! let halfway = path.calculate_pose_by_length(5.0).unwrap();
//! assert!((halfway.position.x - 5.0).abs() < 1e-9);
//! ```

mod builder;
mod compiled;
mod config;
mod diagnostics;
mod error;
mod index;
mod metrics;
mod node;
mod progress;
mod query;

pub use builder::{BuiltNodes, build_nodes};
pub use compiled::{CompiledPath, MAX_SAMPLES};
pub use config::PathConfig;
pub use diagnostics::PathDiagnostics;
pub use error::{PathError, PathResult};
pub use index::NormalizedIndex;
pub use metrics::{PathMetrics, PathTimingReport, TimingBucket};
pub use node::{CurveSegment, Node, RawNode, Waypoint};
pub use progress::{ProgressedNodes, assign_progress};
pub use query::{pose_at, pose_at_with_deviation};

#[cfg(test)]
mod tests;
