//! Error types for clusterization.

use thiserror::Error;

/// Errors that can occur while building meshlets.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// `max_vertices` outside the allowed 3..=255 range.
    #[error("max_vertices {0} outside allowed range 3..=255")]
    InvalidMaxVertices(usize),

    /// `max_triangles` not a positive multiple of 4 at most 512.
    #[error("max_triangles {0} must be a multiple of 4 in 4..=512")]
    InvalidMaxTriangles(usize),

    /// `cone_weight` outside `0.0..=1.0`.
    #[error("cone_weight {0} outside allowed range 0.0..=1.0")]
    InvalidConeWeight(f32),

    /// Input mesh failed structural validation.
    #[error(transparent)]
    Mesh(#[from] meshlet_types::MeshError),
}

/// Result type for clusterization operations.
pub type ClusterResult<T> = std::result::Result<T, ClusterError>;
