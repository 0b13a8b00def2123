//! Parameters for mesh simplification.

use crate::{SimplifyError, SimplifyResult};

/// Parameters for [`crate::simplify_mesh`].
#[derive(Debug, Clone)]
pub struct SimplifyParams {
    /// Target number of triangles. If `None`, uses `target_ratio` instead.
    pub target_triangles: Option<usize>,

    /// Target ratio of triangles to keep, in `(0.0, 1.0]`. Default: 0.5
    pub target_ratio: f64,

    /// Exponent of the rising collapse threshold schedule. Higher values
    /// admit expensive collapses sooner. Default: 7.0
    pub aggressiveness: f64,

    /// Maximum number of threshold iterations. Default: 100
    pub max_iterations: usize,

    /// Whether border edges (referenced by a single triangle) are locked.
    /// Default: true
    pub preserve_borders: bool,

    /// Weld near-coincident border vertices within this distance before
    /// simplifying, repairing T-junctions left by earlier processing.
    /// `None` disables linking. Default: `None`
    pub vertex_link_distance: Option<f64>,

    /// Base of the threshold schedule
    /// `threshold_epsilon * (iteration + 3)^aggressiveness`. Default: 1e-9
    pub threshold_epsilon: f64,
}

impl Default for SimplifyParams {
    fn default() -> Self {
        Self {
            target_triangles: None,
            target_ratio: 0.5,
            aggressiveness: 7.0,
            max_iterations: 100,
            preserve_borders: true,
            vertex_link_distance: None,
            threshold_epsilon: 1e-9,
        }
    }
}

impl SimplifyParams {
    /// Create params targeting a specific triangle count.
    #[must_use]
    pub fn with_target_triangles(count: usize) -> Self {
        Self {
            target_triangles: Some(count),
            ..Default::default()
        }
    }

    /// Create params targeting a ratio of the original triangle count.
    #[must_use]
    pub fn with_target_ratio(ratio: f64) -> Self {
        Self {
            target_ratio: ratio,
            ..Default::default()
        }
    }

    /// Set whether border edges are locked.
    #[must_use]
    pub const fn with_preserve_borders(mut self, preserve: bool) -> Self {
        self.preserve_borders = preserve;
        self
    }

    /// Set the aggressiveness exponent.
    #[must_use]
    pub const fn with_aggressiveness(mut self, aggressiveness: f64) -> Self {
        self.aggressiveness = aggressiveness;
        self
    }

    /// Enable border-vertex linking within `distance`.
    #[must_use]
    pub const fn with_vertex_link_distance(mut self, distance: f64) -> Self {
        self.vertex_link_distance = Some(distance);
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimplifyError::InvalidTargetRatio`] or
    /// [`SimplifyError::InvalidAggressiveness`] on out-of-range values.
    pub fn validate(&self) -> SimplifyResult<()> {
        if !(self.target_ratio > 0.0 && self.target_ratio <= 1.0) {
            return Err(SimplifyError::InvalidTargetRatio {
                ratio: self.target_ratio,
            });
        }
        if self.aggressiveness <= 0.0 {
            return Err(SimplifyError::InvalidAggressiveness {
                value: self.aggressiveness,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SimplifyParams::default();
        assert!(params.validate().is_ok());
        assert!((params.target_ratio - 0.5).abs() < 0.001);
        assert!(params.preserve_borders);
        assert_eq!(params.max_iterations, 100);
    }

    #[test]
    fn test_target_triangles() {
        let params = SimplifyParams::with_target_triangles(1000);
        assert_eq!(params.target_triangles, Some(1000));
    }

    #[test]
    fn test_rejects_bad_ratio() {
        assert!(SimplifyParams::with_target_ratio(0.0).validate().is_err());
        assert!(SimplifyParams::with_target_ratio(1.5).validate().is_err());
        assert!(SimplifyParams::with_target_ratio(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_aggressiveness() {
        let params = SimplifyParams::default().with_aggressiveness(0.0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_builder() {
        let params = SimplifyParams::default()
            .with_preserve_borders(false)
            .with_vertex_link_distance(1e-4);
        assert!(!params.preserve_borders);
        assert_eq!(params.vertex_link_distance, Some(1e-4));
    }
}
