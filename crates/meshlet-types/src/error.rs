//! Error types for mesh and meshlet construction.

use thiserror::Error;

/// Errors raised by structural precondition violations.
///
/// These are fatal to the current build and reported with enough context
/// (stage, offending index) to reproduce. Degenerate geometry is *not* an
/// error anywhere in the pipeline; it is guarded in place.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Index buffer length is not a multiple of 3.
    #[error("index count {count} is not a multiple of 3")]
    IndexCountNotTriangles {
        /// Number of indices supplied.
        count: usize,
    },

    /// An index refers past the end of the vertex buffer.
    #[error("index {index} at position {position} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// The offending index value.
        index: u32,
        /// Offset of the index within the index buffer.
        position: usize,
        /// Number of vertices available.
        vertex_count: usize,
    },
}

/// Result type for mesh construction and validation.
pub type MeshResult<T> = std::result::Result<T, MeshError>;

/// Validate an index buffer against a vertex count.
///
/// # Errors
///
/// Returns [`MeshError`] if the index count is not a multiple of 3 or any
/// index is out of range. Never clamps.
pub fn validate_indices(indices: &[u32], vertex_count: usize) -> MeshResult<()> {
    if indices.len() % 3 != 0 {
        return Err(MeshError::IndexCountNotTriangles {
            count: indices.len(),
        });
    }
    for (position, &index) in indices.iter().enumerate() {
        if index as usize >= vertex_count {
            return Err(MeshError::IndexOutOfRange {
                index,
                position,
                vertex_count,
            });
        }
    }
    Ok(())
}
