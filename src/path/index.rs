//! Uniform-step lookup from progress to node.
//!
//! The table has one entry per `step`-wide progress bucket, where `step` is
//! the smallest progress delta between consecutive nodes. Entry `i` holds the
//! index of the segment `[nodes[e], nodes[e + 1]]` containing progress
//! `i * step`, so a query only needs a multiply and a short local walk
//! instead of a binary search. Highly non-uniform node spacing makes the
//! table large; that is accepted unless the caller passes `max_entries`.

use super::error::{PathError, PathResult};
use super::node::Node;

/// Entries reserved up front; larger tables grow while they are built.
const PREALLOCATE_LIMIT: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedIndex {
    entries: Vec<usize>,
    step: f64,
}

impl NormalizedIndex {
    pub fn build(nodes: &[Node], step: f64, max_entries: Option<usize>) -> PathResult<Self> {
        if nodes.len() < 2 {
            return Ok(Self {
                entries: vec![0],
                step: 1.0,
            });
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(PathError::DegenerateGeometry {
                index: 0,
                delta: step,
            });
        }

        // One entry per bucket plus the closing entry at progress 1, with one
        // spare for rounding in `i * step`.
        let required = (1.0 / step).ceil() + 2.0;
        if let Some(max) = max_entries.filter(|&max| required > max as f64) {
            return Err(PathError::IndexTooLarge {
                required: required as usize,
                max,
            });
        }

        let last_segment = nodes.len() - 2;
        let mut entries = Vec::with_capacity((required as usize).min(PREALLOCATE_LIMIT));
        let mut node_index = 0;
        let mut bucket = 0usize;

        loop {
            let progress = (bucket as f64 * step).clamp(0.0, 1.0);
            while node_index < last_segment && progress >= nodes[node_index + 1].progress {
                node_index += 1;
            }
            entries.push(node_index);

            if progress >= 1.0 {
                break;
            }
            bucket += 1;
        }

        log::debug!("built normalized index with {} entries, step {step:e}", entries.len());

        Ok(Self { entries, step })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    /// Entry for progress `t` in `[0, 1)`, bucketed by table size.
    ///
    /// A `t` that falls into the closing bucket without being exactly 1 reads
    /// the entry before it.
    #[must_use]
    pub fn lookup(&self, t: f64) -> usize {
        let size = self.entries.len();
        let idx = ((t * size as f64).floor() as usize).min(size - 1);
        let slot = if t < 1.0 && idx + 1 == size && idx > 0 {
            idx - 1
        } else {
            idx
        };
        self.entries[slot]
    }
}
