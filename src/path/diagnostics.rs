//! Compilation diagnostics.
//!
//! Collected while a path compiles and returned by
//! [`CompiledPath::diagnostics`](super::CompiledPath::diagnostics). Nothing
//! here affects query results; it exists to explain how a waypoint list was
//! turned into nodes (which corners were smoothed, which fell back to
//! straight segments) and how large the lookup table became.

use std::fmt;

use super::metrics::PathTimingReport;
use super::node::CurveSegment;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PathDiagnostics {
    pub waypoint_count: usize,
    pub node_count: usize,

    /// Waypoint pairs emitted as a single straight node.
    pub straight_segment_count: usize,

    /// Node ranges produced by corner smoothing, in path order.
    pub curve_segments: Vec<CurveSegment>,

    /// Turns whose angle was NaN (coincident waypoints) and were kept
    /// straight.
    pub nan_angle_fallbacks: usize,

    /// Turns above the angle threshold whose look lines never met ahead of
    /// the waypoint, kept straight.
    pub missing_intersection_fallbacks: usize,

    pub min_progress_delta: f64,

    /// Entries in the normalized index.
    pub index_entries: usize,

    /// Only populated with the `path_metrics` feature on native targets.
    pub timing: Option<PathTimingReport>,

    pub warnings: Vec<String>,
}

impl PathDiagnostics {
    #[must_use]
    pub fn is_smoothed(&self) -> bool {
        !self.curve_segments.is_empty()
    }

    #[must_use]
    pub fn curve_node_count(&self) -> usize {
        self.curve_segments.iter().map(CurveSegment::node_count).sum()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

impl fmt::Display for PathDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} waypoints -> {} nodes ({} curves / {} curved nodes, {} straight), index {} entries",
            self.waypoint_count,
            self.node_count,
            self.curve_segments.len(),
            self.curve_node_count(),
            self.straight_segment_count,
            self.index_entries,
        )?;
        if self.nan_angle_fallbacks > 0 || self.missing_intersection_fallbacks > 0 {
            write!(
                f,
                ", fallbacks: {} nan angle, {} missing intersection",
                self.nan_angle_fallbacks, self.missing_intersection_fallbacks
            )?;
        }
        if let Some(timing) = &self.timing {
            write!(f, ", {:.3} ms", timing.total_ms())?;
        }
        Ok(())
    }
}
