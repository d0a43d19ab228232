#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::builder::build_nodes;
use super::config::PathConfig;
use super::diagnostics::PathDiagnostics;
use super::error::{PathError, PathResult};
use super::index::NormalizedIndex;
use super::metrics::{PathMetrics, TimingBucket};
use super::node::{Node, Waypoint};
use super::progress::assign_progress;
use super::query::{pose_at, pose_at_with_deviation};
use crate::geom::Pose;

/// Index sizes above this are reported as a warning in the diagnostics.
const LARGE_INDEX_WARNING: usize = 100_000;

/// Upper bound on the number of poses one sampling call produces.
pub const MAX_SAMPLES: usize = 10_000_000;

/// A waypoint list and, once compiled, the traversable path built from it.
///
/// Construction only copies the waypoints. [`compile`](Self::compile) runs
/// node building, progress assignment and index construction once; every
/// query and accessor other than [`waypoints`](Self::waypoints) fails with
/// [`PathError::NotCompiled`] before that.
///
/// `Clone` is a deep copy: a clone shares no state with the original.
#[derive(Debug, Clone)]
pub struct CompiledPath {
    waypoints: Vec<Waypoint>,
    config: PathConfig,
    state: Option<PathState>,
}

#[derive(Debug, Clone)]
struct PathState {
    nodes: Vec<Node>,
    length: f64,
    min_progress_delta: f64,
    index: NormalizedIndex,
    diagnostics: PathDiagnostics,
}

impl CompiledPath {
    #[must_use]
    pub fn new(waypoints: &[Waypoint]) -> Self {
        Self::with_config(waypoints, PathConfig::default())
    }

    #[must_use]
    pub fn with_config(waypoints: &[Waypoint], config: PathConfig) -> Self {
        Self {
            waypoints: waypoints.to_vec(),
            config,
            state: None,
        }
    }

    /// Compiles the path. Calling it again on a compiled path is a no-op.
    ///
    /// On failure the path stays uncompiled.
    pub fn compile(&mut self) -> PathResult<&mut Self> {
        if self.state.is_none() {
            self.state = Some(compile_state(&self.waypoints, &self.config)?);
        }
        Ok(self)
    }

    /// Consuming variant of [`compile`](Self::compile) for builder-style use.
    pub fn compiled(mut self) -> PathResult<Self> {
        self.compile()?;
        Ok(self)
    }

    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    #[must_use]
    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Pose at normalized progress `t`; `t` outside `[0, 1]` is clamped.
    pub fn calculate_pose(&self, t: f64) -> PathResult<Pose> {
        let state = self.state()?;
        Ok(pose_at(&state.nodes, &state.index, t))
    }

    /// Pose at progress `t`, shifted `deviation` units along its right vector.
    pub fn calculate_pose_with_deviation(&self, t: f64, deviation: f64) -> PathResult<Pose> {
        let state = self.state()?;
        Ok(pose_at_with_deviation(&state.nodes, &state.index, t, deviation))
    }

    /// Pose at arc length `distance` from the path start.
    pub fn calculate_pose_by_length(&self, distance: f64) -> PathResult<Pose> {
        self.calculate_pose_by_length_with_deviation(distance, 0.0)
    }

    pub fn calculate_pose_by_length_with_deviation(
        &self,
        distance: f64,
        deviation: f64,
    ) -> PathResult<Pose> {
        let state = self.state()?;
        if state.length <= 0.0 {
            return Err(PathError::ZeroLength);
        }
        Ok(pose_at_with_deviation(
            &state.nodes,
            &state.index,
            distance / state.length,
            deviation,
        ))
    }

    /// Total arc length.
    pub fn length(&self) -> PathResult<f64> {
        Ok(self.state()?.length)
    }

    pub fn nodes(&self) -> PathResult<&[Node]> {
        Ok(&self.state()?.nodes)
    }

    pub fn min_progress_delta(&self) -> PathResult<f64> {
        Ok(self.state()?.min_progress_delta)
    }

    pub fn normalized_index(&self) -> PathResult<&NormalizedIndex> {
        Ok(&self.state()?.index)
    }

    /// Number of entries in the normalized index.
    pub fn index_len(&self) -> PathResult<usize> {
        Ok(self.state()?.index.len())
    }

    pub fn diagnostics(&self) -> PathResult<&PathDiagnostics> {
        Ok(&self.state()?.diagnostics)
    }

    /// Progress values `0, step, 2 * step, ...`, clamped so the last one is
    /// exactly 1. Fails with [`PathError::InvalidConfig`] for a step that is
    /// not finite and positive or that needs more than [`MAX_SAMPLES`]
    /// samples.
    pub fn sample_progress(step: f64) -> PathResult<Vec<f64>> {
        if !(step.is_finite() && step > 0.0) {
            return Err(PathError::InvalidConfig(format!(
                "sample step must be finite and > 0, got {step}"
            )));
        }
        if 1.0 / step > MAX_SAMPLES as f64 {
            return Err(PathError::InvalidConfig(format!(
                "sample step {step} needs more than {MAX_SAMPLES} samples"
            )));
        }
        Ok(sample_params(step))
    }

    /// Poses at every [`sample_progress`](Self::sample_progress) value.
    pub fn sample_poses(&self, step: f64) -> PathResult<Vec<Pose>> {
        let state = self.state()?;
        let params = Self::sample_progress(step)?;

        #[cfg(feature = "parallel")]
        let poses = params
            .into_par_iter()
            .map(|t| pose_at(&state.nodes, &state.index, t))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let poses = params
            .into_iter()
            .map(|t| pose_at(&state.nodes, &state.index, t))
            .collect();

        Ok(poses)
    }

    fn state(&self) -> PathResult<&PathState> {
        self.state.as_ref().ok_or(PathError::NotCompiled)
    }
}

fn compile_state(waypoints: &[Waypoint], config: &PathConfig) -> PathResult<PathState> {
    config.validate()?;
    if waypoints.is_empty() {
        return Err(PathError::NoWaypoints);
    }
    if let Some(index) = waypoints.iter().position(|waypoint| !waypoint.is_finite()) {
        return Err(PathError::NonFiniteInput { index });
    }

    let mut metrics = PathMetrics::default();
    metrics.begin();

    let built = metrics.time(TimingBucket::NodeBuild, || build_nodes(waypoints, config));
    let progressed = metrics.time(TimingBucket::Progress, || {
        assign_progress(&built.nodes, built.total_length)
    })?;
    let index = metrics.time(TimingBucket::Index, || {
        NormalizedIndex::build(
            &progressed.nodes,
            progressed.min_progress_delta,
            config.max_index_entries,
        )
    })?;

    let mut diagnostics = PathDiagnostics {
        waypoint_count: waypoints.len(),
        node_count: progressed.nodes.len(),
        straight_segment_count: built.straight_segments,
        curve_segments: built.curve_segments,
        nan_angle_fallbacks: built.nan_angle_fallbacks,
        missing_intersection_fallbacks: built.missing_intersection_fallbacks,
        min_progress_delta: progressed.min_progress_delta,
        index_entries: index.len(),
        timing: metrics.end(),
        warnings: Vec::new(),
    };
    if index.len() > LARGE_INDEX_WARNING {
        diagnostics.add_warning(format!(
            "normalized index has {} entries; node spacing is highly non-uniform",
            index.len()
        ));
        log::warn!("normalized index has {} entries", index.len());
    }
    if diagnostics.missing_intersection_fallbacks > 0 {
        diagnostics.add_warning(format!(
            "{} turn(s) above the angle threshold were kept straight",
            diagnostics.missing_intersection_fallbacks
        ));
    }

    log::debug!("compiled path: {diagnostics}");

    Ok(PathState {
        nodes: progressed.nodes,
        length: built.total_length,
        min_progress_delta: progressed.min_progress_delta,
        index,
        diagnostics,
    })
}

fn sample_params(step: f64) -> Vec<f64> {
    let mut params = Vec::with_capacity((1.0 / step).ceil() as usize + 1);
    let mut i = 0usize;
    loop {
        let t = (i as f64 * step).min(1.0);
        params.push(t);
        if t >= 1.0 {
            break;
        }
        i += 1;
    }
    params
}
