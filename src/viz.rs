//! Debug drawing of a compiled path.
//!
//! The path never draws itself. A caller hands a [`DisplaySink`] to a
//! [`PathVisualizer`], which samples the path and asks the sink for one
//! marker per sampled pose. Markers are owned by the visualizer: drawing
//! again, [`PathVisualizer::clear`], or dropping the visualizer destroys
//! them.

use serde::{Deserialize, Serialize};

use crate::geom::{Pose, Vec3};
use crate::path::{CompiledPath, PathResult};

/// Handle returned by a sink for a created marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarkerId(pub u64);

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color3 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color3 {
    /// Neutral grey used for path markers.
    pub const MARKER_GREY: Self = Self::new(163, 162, 165);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub size: Vec3,
    pub color: Color3,
}

impl MarkerStyle {
    pub const DEFAULT_SIZE: Vec3 = Vec3::splat(0.1);
    /// Progress step between markers.
    pub const DEFAULT_STEP: f64 = 0.01;
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            color: Color3::MARKER_GREY,
        }
    }
}

/// Something that can place and remove markers in a scene.
pub trait DisplaySink {
    fn create_marker(&mut self, pose: Pose, size: Vec3, color: Color3) -> MarkerId;
    fn destroy_marker(&mut self, id: MarkerId);
}

/// Draws a path into a borrowed sink and owns the markers it created.
pub struct PathVisualizer<'s, S: DisplaySink> {
    sink: &'s mut S,
    markers: Vec<MarkerId>,
}

impl<'s, S: DisplaySink> PathVisualizer<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        Self {
            sink,
            markers: Vec::new(),
        }
    }

    /// Replaces any previously drawn markers with one marker per pose sampled
    /// every `step` of progress.
    ///
    /// On error the previous markers are already gone and nothing new is
    /// drawn.
    pub fn draw(&mut self, path: &CompiledPath, style: MarkerStyle, step: f64) -> PathResult<usize> {
        self.clear();
        let poses = path.sample_poses(step)?;
        self.markers.reserve(poses.len());
        for pose in poses {
            let id = self.sink.create_marker(pose, style.size, style.color);
            self.markers.push(id);
        }
        log::debug!("drew {} path markers", self.markers.len());
        Ok(self.markers.len())
    }

    pub fn clear(&mut self) {
        for id in self.markers.drain(..) {
            self.sink.destroy_marker(id);
        }
    }

    #[must_use]
    pub fn markers(&self) -> &[MarkerId] {
        &self.markers
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        self.sink
    }
}

impl<S: DisplaySink> Drop for PathVisualizer<'_, S> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// A marker held by [`RecordingSink`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecordedMarker {
    pub id: MarkerId,
    pub pose: Pose,
    pub size: Vec3,
    pub color: Color3,
}

/// In-memory sink that keeps the live markers in creation order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    next_id: u64,
    live: Vec<RecordedMarker>,
    destroyed: usize,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn markers(&self) -> &[RecordedMarker] {
        &self.live
    }

    /// Markers destroyed over the sink's lifetime.
    #[must_use]
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }
}

impl DisplaySink for RecordingSink {
    fn create_marker(&mut self, pose: Pose, size: Vec3, color: Color3) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.live.push(RecordedMarker {
            id,
            pose,
            size,
            color,
        });
        id
    }

    fn destroy_marker(&mut self, id: MarkerId) {
        if let Some(position) = self.live.iter().position(|marker| marker.id == id) {
            self.live.remove(position);
            self.destroyed += 1;
        }
    }
}
