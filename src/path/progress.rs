use super::error::{PathError, PathResult};
use super::node::{Node, RawNode};

/// Nodes annotated with normalized arc-length progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressedNodes {
    pub nodes: Vec<Node>,
    /// Smallest progress step between two consecutive nodes. `1.0` when the
    /// path has a single node.
    pub min_progress_delta: f64,
}

/// Assigns each node its cumulative arc length and normalized progress.
///
/// The first node gets progress 0 and the last is pinned to exactly 1. Any
/// step that is zero or not a number (coincident nodes, zero total length)
/// fails with [`PathError::DegenerateGeometry`].
pub fn assign_progress(raw: &[RawNode], total_length: f64) -> PathResult<ProgressedNodes> {
    let Some(first) = raw.first() else {
        return Err(PathError::NoWaypoints);
    };

    if raw.len() == 1 {
        return Ok(ProgressedNodes {
            nodes: vec![Node {
                pose: first.pose,
                progress: 1.0,
                length: 0.0,
            }],
            min_progress_delta: 1.0,
        });
    }

    let mut nodes = Vec::with_capacity(raw.len());
    nodes.push(Node {
        pose: first.pose,
        progress: 0.0,
        length: 0.0,
    });

    let mut total_progress = 0.0;
    let mut cumulative_length = 0.0;
    let mut min_progress_delta: f64 = 1.0;

    for (index, pair) in raw.windows(2).enumerate() {
        let distance = pair[0].pose.position.distance_to(pair[1].pose.position);
        let delta = distance / total_length;
        if !(delta.is_finite() && delta > 0.0) {
            return Err(PathError::DegenerateGeometry { index, delta });
        }

        total_progress += delta;
        cumulative_length += distance;
        min_progress_delta = min_progress_delta.min(delta);

        nodes.push(Node {
            pose: pair[1].pose,
            progress: total_progress.min(1.0),
            length: cumulative_length,
        });
    }

    if let Some(last) = nodes.last_mut() {
        last.progress = 1.0;
    }

    log::debug!(
        "assigned progress to {} nodes, min delta {min_progress_delta:e}",
        nodes.len()
    );

    Ok(ProgressedNodes {
        nodes,
        min_progress_delta,
    })
}
