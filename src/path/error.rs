use thiserror::Error;

/// Result type for path compilation and queries.
pub type PathResult<T> = Result<T, PathError>;

/// Failures raised by [`CompiledPath`](super::CompiledPath).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// A query or accessor ran before `compile()`.
    #[error("path has not been compiled")]
    NotCompiled,
    /// Compilation needs at least one waypoint.
    #[error("path has no waypoints")]
    NoWaypoints,
    /// A waypoint carries NaN or infinite components.
    #[error("waypoint {index} is not finite")]
    NonFiniteInput { index: usize },
    /// Two consecutive nodes share a position, so the progress step between
    /// them is zero (or not a number).
    #[error("degenerate geometry: progress step {delta} between nodes {index} and {next}", next = .index + 1)]
    DegenerateGeometry { index: usize, delta: f64 },
    /// A distance query on a path of zero length.
    #[error("path has zero length")]
    ZeroLength,
    /// The normalized index would need more entries than allowed.
    #[error("normalized index needs {required} entries, limit is {max}")]
    IndexTooLarge { required: usize, max: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::PathError;

    #[test]
    fn messages_name_the_offending_nodes() {
        let err = PathError::DegenerateGeometry {
            index: 3,
            delta: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "degenerate geometry: progress step 0 between nodes 3 and 4"
        );
        assert_eq!(
            PathError::IndexTooLarge { required: 10, max: 5 }.to_string(),
            "normalized index needs 10 entries, limit is 5"
        );
    }
}
