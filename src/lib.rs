#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod path;
pub mod viz;

use std::fmt;

use geom::{Point3, Pose, Rotation, Vec3};
use path::{CompiledPath, Node, PathConfig};
use serde::{Deserialize, Serialize};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    // A second `initialize` finds the logger already set; keep it.
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not start rayon thread pool: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Waypoint as passed from JavaScript. `rotation` (`[w, x, y, z]`) wins over
/// `look`; with neither, the waypoint uses the identity orientation.
#[derive(Debug, Clone, Deserialize)]
struct WaypointInput {
    position: [f64; 3],
    #[serde(default)]
    look: Option<[f64; 3]>,
    #[serde(default)]
    rotation: Option<[f64; 4]>,
}

impl WaypointInput {
    fn to_pose(&self, index: usize) -> Result<Pose, String> {
        let rotation = match (self.rotation, self.look) {
            (Some([w, x, y, z]), _) => Rotation::from_wxyz(w, x, y, z)
                .ok_or_else(|| format!("waypoint {index}: rotation is not a valid quaternion"))?,
            (None, Some(look)) => Rotation::looking_along(Vec3::from(look))
                .ok_or_else(|| format!("waypoint {index}: look direction has zero length"))?,
            (None, None) => Rotation::IDENTITY,
        };
        Ok(Pose::new(Point3::from(self.position), rotation))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
struct PoseExport {
    position: [f64; 3],
    /// `[w, x, y, z]`
    rotation: [f64; 4],
    look: [f64; 3],
    right: [f64; 3],
}

impl From<Pose> for PoseExport {
    fn from(pose: Pose) -> Self {
        let r = pose.rotation;
        Self {
            position: pose.position.to_array(),
            rotation: [r.w, r.x, r.y, r.z],
            look: pose.look_vector().to_array(),
            right: pose.right_vector().to_array(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct NodeExport {
    pose: PoseExport,
    progress: f64,
    length: f64,
}

impl From<&Node> for NodeExport {
    fn from(node: &Node) -> Self {
        Self {
            pose: node.pose.into(),
            progress: node.progress,
            length: node.length,
        }
    }
}

fn parse_waypoints(inputs: &[WaypointInput]) -> Result<Vec<Pose>, String> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| input.to_pose(index))
        .collect()
}

/// Public entry point for JavaScript consumers.
#[wasm_bindgen]
pub struct PathEngine {
    path: CompiledPath,
}

#[wasm_bindgen]
impl PathEngine {
    /// Copies the waypoints; `config` may be `undefined` for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(waypoints: JsValue, config: JsValue) -> Result<PathEngine, JsValue> {
        let inputs: Vec<WaypointInput> =
            serde_wasm_bindgen::from_value(waypoints).map_err(to_js_error)?;
        let config: Option<PathConfig> =
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?;
        let waypoints = parse_waypoints(&inputs).map_err(|err| js_error(&err))?;

        Ok(PathEngine {
            path: CompiledPath::with_config(&waypoints, config.unwrap_or_default()),
        })
    }

    #[wasm_bindgen]
    pub fn compile(&mut self) -> Result<(), JsValue> {
        self.path.compile().map_err(to_js_error)?;
        crate::debug_log!("path compiled: {:?}", self.path.diagnostics().map(ToString::to_string));
        Ok(())
    }

    #[wasm_bindgen]
    pub fn is_compiled(&self) -> bool {
        self.path.is_compiled()
    }

    /// Pose at progress `t` as `{ position, rotation, look, right }`.
    #[wasm_bindgen]
    pub fn calculate_pose(&self, t: f64, deviation: f64) -> Result<JsValue, JsValue> {
        let pose = self
            .path
            .calculate_pose_with_deviation(t, deviation)
            .map_err(to_js_error)?;
        to_js_value(&PoseExport::from(pose))
    }

    #[wasm_bindgen]
    pub fn calculate_pose_by_length(&self, distance: f64, deviation: f64) -> Result<JsValue, JsValue> {
        let pose = self
            .path
            .calculate_pose_by_length_with_deviation(distance, deviation)
            .map_err(to_js_error)?;
        to_js_value(&PoseExport::from(pose))
    }

    #[wasm_bindgen]
    pub fn length(&self) -> Result<f64, JsValue> {
        self.path.length().map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn nodes(&self) -> Result<JsValue, JsValue> {
        let nodes = self.path.nodes().map_err(to_js_error)?;
        let export: Vec<NodeExport> = nodes.iter().map(NodeExport::from).collect();
        to_js_value(&export)
    }

    /// Poses every `step` of progress, ending at `t = 1`.
    #[wasm_bindgen]
    pub fn sample(&self, step: f64) -> Result<JsValue, JsValue> {
        let poses = self.path.sample_poses(step).map_err(to_js_error)?;
        let export: Vec<PoseExport> = poses.into_iter().map(PoseExport::from).collect();
        to_js_value(&export)
    }

    /// One-line compilation summary.
    #[wasm_bindgen]
    pub fn diagnostics(&self) -> Result<String, JsValue> {
        self.path
            .diagnostics()
            .map(ToString::to_string)
            .map_err(to_js_error)
    }
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
