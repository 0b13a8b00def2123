//! Hierarchy construction error types.

use thiserror::Error;

use meshlet_cluster::ClusterError;
use meshlet_group::GroupError;
use meshlet_simplify::SimplifyError;

/// Errors from building a meshlet hierarchy.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// Clusterization failed.
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// Grouping or partitioning failed.
    #[error(transparent)]
    Group(#[from] GroupError),

    /// Simplification failed.
    #[error(transparent)]
    Simplify(#[from] SimplifyError),
}

/// Result alias for hierarchy operations.
pub type HierarchyResult<T> = Result<T, HierarchyError>;
