//! Grouping error types.

use thiserror::Error;

use meshlet_types::MeshError;

/// Errors from grouping, partitioning, or merging meshlets.
#[derive(Debug, Error)]
pub enum GroupError {
    /// Target group size must be at least 2.
    #[error("target group size must be at least 2, got {size}")]
    InvalidGroupSize {
        /// The rejected size.
        size: usize,
    },

    /// A partitioner returned an invalid result.
    ///
    /// Partition results are checked, not repaired: every node must appear
    /// in exactly one part and no part may be empty.
    #[error("graph partition failed: {reason}")]
    PartitionFailure {
        /// What the validation found.
        reason: String,
    },

    /// A merged mesh failed validation.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Result alias for grouping operations.
pub type GroupResult<T> = Result<T, GroupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GroupError::InvalidGroupSize { size: 1 };
        assert_eq!(err.to_string(), "target group size must be at least 2, got 1");

        let err = GroupError::PartitionFailure {
            reason: "node 3 unassigned".to_string(),
        };
        assert!(err.to_string().contains("node 3 unassigned"));
    }
}
