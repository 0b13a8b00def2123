//! Parameters for meshlet building.

use crate::{ClusterError, ClusterResult};

/// Parameters for meshlet building.
///
/// The limits follow the conventions of cluster-based renderers: at most
/// 255 vertices per meshlet (so local indices fit a byte with a spare
/// sentinel) and a triangle limit that is a multiple of 4 for storage
/// alignment downstream.
#[derive(Debug, Clone)]
pub struct ClusterParams {
    /// Maximum vertices per meshlet. Allowed range 3..=255. Default: 255.
    pub max_vertices: usize,

    /// Maximum triangles per meshlet. Must be a multiple of 4, at most 512.
    /// Default: 128.
    pub max_triangles: usize,

    /// Blend between spatial distance and normal-cone similarity when
    /// scoring candidate triangles, in `0.0..=1.0`. Zero scores purely by
    /// distance. Default: 0.0.
    pub cone_weight: f32,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            max_vertices: 255,
            max_triangles: 128,
            cone_weight: 0.0,
        }
    }
}

impl ClusterParams {
    /// Set the vertex limit.
    #[must_use]
    pub const fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    /// Set the triangle limit.
    #[must_use]
    pub const fn with_max_triangles(mut self, max_triangles: usize) -> Self {
        self.max_triangles = max_triangles;
        self
    }

    /// Set the cone weight.
    #[must_use]
    pub const fn with_cone_weight(mut self, cone_weight: f32) -> Self {
        self.cone_weight = cone_weight;
        self
    }

    /// Validate the limits.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError`] when a limit is outside its allowed range.
    /// Limits are never clamped.
    pub fn validate(&self) -> ClusterResult<()> {
        if self.max_vertices < 3 || self.max_vertices > 255 {
            return Err(ClusterError::InvalidMaxVertices(self.max_vertices));
        }
        if self.max_triangles == 0 || self.max_triangles > 512 || self.max_triangles % 4 != 0 {
            return Err(ClusterError::InvalidMaxTriangles(self.max_triangles));
        }
        if !(0.0..=1.0).contains(&self.cone_weight) {
            return Err(ClusterError::InvalidConeWeight(self.cone_weight));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_valid() {
        assert!(ClusterParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_limits() {
        assert!(ClusterParams::default()
            .with_max_vertices(256)
            .validate()
            .is_err());
        assert!(ClusterParams::default()
            .with_max_vertices(2)
            .validate()
            .is_err());
        assert!(ClusterParams::default()
            .with_max_triangles(130)
            .validate()
            .is_err());
        assert!(ClusterParams::default()
            .with_max_triangles(516)
            .validate()
            .is_err());
        assert!(ClusterParams::default()
            .with_cone_weight(1.5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_builder() {
        let params = ClusterParams::default()
            .with_max_vertices(64)
            .with_max_triangles(124)
            .with_cone_weight(0.5);
        assert_eq!(params.max_vertices, 64);
        assert_eq!(params.max_triangles, 124);
        assert!(params.validate().is_ok());
    }
}
