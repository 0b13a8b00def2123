//! Simplification error types.

use thiserror::Error;

use meshlet_types::MeshError;

/// Errors from mesh simplification.
#[derive(Debug, Error)]
pub enum SimplifyError {
    /// Target ratio must lie in `(0.0, 1.0]`.
    #[error("target ratio must be in (0.0, 1.0], got {ratio}")]
    InvalidTargetRatio {
        /// The rejected ratio.
        ratio: f64,
    },

    /// Aggressiveness must be positive.
    #[error("aggressiveness must be positive, got {value}")]
    InvalidAggressiveness {
        /// The rejected value.
        value: f64,
    },

    /// A rebuilt mesh failed validation.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Result alias for simplification operations.
pub type SimplifyResult<T> = Result<T, SimplifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimplifyError::InvalidTargetRatio { ratio: 1.5 };
        assert!(err.to_string().contains("1.5"));
    }
}
