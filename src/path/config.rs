use serde::{Deserialize, Serialize};

use super::error::{PathError, PathResult};

/// Options for compiling a waypoint list into a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Turns at or below this angle (degrees) are kept straight.
    pub angle_offset_degrees: f64,
    /// Number of Bezier samples used to smooth one corner. Samples sit at
    /// parameters `k / curve_samples`, the curve end excluded.
    pub curve_samples: usize,
    /// Optional upper bound on the normalized index size. When set, a path
    /// whose shortest node spacing is tiny relative to its length fails with
    /// `IndexTooLarge` instead of allocating. Unbounded by default.
    pub max_index_entries: Option<usize>,
    /// Optional relative limit on the gap between two skew look lines.
    /// When set, corners whose look lines pass further apart than
    /// `max_intersection_skew * max(distance, 1)` stay straight. Unlimited by
    /// default.
    pub max_intersection_skew: Option<f64>,
}

impl PathConfig {
    pub const DEFAULT_ANGLE_OFFSET_DEGREES: f64 = 2.0;
    pub const DEFAULT_CURVE_SAMPLES: usize = 10;

    #[must_use]
    pub fn angle_offset_radians(&self) -> f64 {
        self.angle_offset_degrees.to_radians()
    }

    pub fn validate(&self) -> PathResult<()> {
        if !self.angle_offset_degrees.is_finite() || self.angle_offset_degrees < 0.0 {
            return Err(PathError::InvalidConfig(format!(
                "angle_offset_degrees must be finite and >= 0, got {}",
                self.angle_offset_degrees
            )));
        }
        if self.curve_samples < 2 {
            return Err(PathError::InvalidConfig(format!(
                "curve_samples must be at least 2, got {}",
                self.curve_samples
            )));
        }
        if let Some(max) = self.max_index_entries.filter(|&max| max < 2) {
            return Err(PathError::InvalidConfig(format!(
                "max_index_entries must be at least 2, got {max}"
            )));
        }
        if let Some(skew) = self
            .max_intersection_skew
            .filter(|skew| !skew.is_finite() || *skew <= 0.0)
        {
            return Err(PathError::InvalidConfig(format!(
                "max_intersection_skew must be finite and > 0, got {skew}"
            )));
        }
        Ok(())
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            angle_offset_degrees: Self::DEFAULT_ANGLE_OFFSET_DEGREES,
            curve_samples: Self::DEFAULT_CURVE_SAMPLES,
            max_index_entries: None,
            max_intersection_skew: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PathConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.angle_offset_radians() - 2.0_f64.to_radians()).abs() < 1e-15);
        assert_eq!(config.curve_samples, 10);
        assert_eq!(config.max_index_entries, None);
        assert_eq!(config.max_intersection_skew, None);
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            PathConfig {
                angle_offset_degrees: f64::NAN,
                ..PathConfig::default()
            },
            PathConfig {
                curve_samples: 1,
                ..PathConfig::default()
            },
            PathConfig {
                max_index_entries: Some(0),
                ..PathConfig::default()
            },
            PathConfig {
                max_intersection_skew: Some(0.0),
                ..PathConfig::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(PathError::InvalidConfig(_))));
        }
    }
}
