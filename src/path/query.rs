use super::index::NormalizedIndex;
use super::node::Node;
use crate::geom::Pose;

/// Pose at normalized progress `t`, clamped to `[0, 1]`. A NaN `t` reads as 0.
///
/// `nodes` must be non-empty with progress pinned to 0 at the first node and
/// 1 at the last, as produced by the progress pass.
pub fn pose_at(nodes: &[Node], index: &NormalizedIndex, t: f64) -> Pose {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    let (Some(first), Some(last)) = (nodes.first(), nodes.last()) else {
        return Pose::default();
    };
    if nodes.len() == 1 || t >= 1.0 {
        return last.pose;
    }
    if t <= 0.0 {
        return first.pose;
    }

    let link = settle(nodes, index.lookup(t), t);
    let node = &nodes[link];
    let next = &nodes[link + 1];
    let local_t = ((t - node.progress) / (next.progress - node.progress)).clamp(0.0, 1.0);
    node.pose.lerp(next.pose, local_t)
}

/// [`pose_at`] displaced sideways along the interpolated pose's right vector.
pub fn pose_at_with_deviation(nodes: &[Node], index: &NormalizedIndex, t: f64, deviation: f64) -> Pose {
    let pose = pose_at(nodes, index, t);
    if deviation == 0.0 {
        return pose;
    }
    pose.translated(pose.right_vector() * deviation)
}

/// Moves a table hint onto the segment `[link, link + 1]` whose progress
/// range contains `t`. Bucketing by table size can land a segment early or
/// late near bucket edges; the walk is at most a few steps.
fn settle(nodes: &[Node], hint: usize, t: f64) -> usize {
    let last_segment = nodes.len() - 2;
    let mut link = hint.min(last_segment);
    while link > 0 && t < nodes[link].progress {
        link -= 1;
    }
    while link < last_segment && t >= nodes[link + 1].progress {
        link += 1;
    }
    link
}
