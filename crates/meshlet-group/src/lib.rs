//! Meshlet grouping for hierarchical simplification.
//!
//! Meshlets that share boundary edges are grouped into small batches
//! (default 4) so each batch can be merged into one mesh, simplified as a
//! unit, and re-clusterized. Grouping by shared edges keeps simplification
//! working on real interiors: edges interior to a group can collapse while
//! the group's outer boundary stays fixed.
//!
//! Partitioning sits behind the [`GraphPartitioner`] trait; the built-in
//! [`BfsPartitioner`] grows balanced connected parts deterministically.
//! Partition results are always validated, never repaired.
//!
//! # Example
//!
//! ```
//! use meshlet_cluster::{build_meshlets, ClusterParams};
//! use meshlet_group::{group_meshlets, BfsPartitioner, GroupParams};
//! use meshlet_types::grid_mesh;
//!
//! let mesh = grid_mesh(4, 4);
//! let params = ClusterParams::default()
//!     .with_max_triangles(4)
//!     .with_max_vertices(8);
//! let meshlets = build_meshlets(&mesh, &params).unwrap();
//!
//! let groups = group_meshlets(&meshlets, &GroupParams::default(), &BfsPartitioner).unwrap();
//! let assigned: usize = groups.iter().map(Vec::len).sum();
//! assert_eq!(assigned, meshlets.len());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod adjacency;
mod error;
mod merge;
mod params;
mod partition;

pub use adjacency::build_adjacency;
pub use error::{GroupError, GroupResult};
pub use merge::{clean_mesh, merge_group};
pub use params::GroupParams;
pub use partition::{validate_partition, BfsPartitioner, GraphPartitioner};

use meshlet_types::Meshlet;
use tracing::info;

/// Group meshlets into validated batches of member indices.
///
/// Builds the shared-boundary-edge adjacency graph and hands it to the
/// partitioner with a part count of `ceil(meshlets / target_group_size)`.
/// With fewer meshlets than the target this degenerates to a single group.
///
/// # Errors
///
/// Returns [`GroupError::InvalidGroupSize`] for a bad target and
/// [`GroupError::PartitionFailure`] when the partitioner's result does not
/// cover every meshlet exactly once.
pub fn group_meshlets(
    meshlets: &[Meshlet],
    params: &GroupParams,
    partitioner: &dyn GraphPartitioner,
) -> GroupResult<Vec<Vec<usize>>> {
    params.validate()?;

    if meshlets.is_empty() {
        return Ok(Vec::new());
    }

    let adjacency = build_adjacency(meshlets);
    let n_parts = meshlets.len().div_ceil(params.target_group_size);
    let groups = partitioner.partition(&adjacency, n_parts)?;
    validate_partition(meshlets.len(), &groups)?;

    info!(
        meshlets = meshlets.len(),
        groups = groups.len(),
        "Grouped meshlets"
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshlet_cluster::{build_meshlets, ClusterParams};
    use meshlet_types::{grid_mesh, icosphere};

    fn clusterize(mesh: &meshlet_types::TriangleMesh) -> Vec<Meshlet> {
        let params = ClusterParams::default()
            .with_max_triangles(4)
            .with_max_vertices(8);
        build_meshlets(mesh, &params).unwrap()
    }

    #[test]
    fn test_groups_cover_all_meshlets() {
        let meshlets = clusterize(&icosphere(1));
        let groups = group_meshlets(&meshlets, &GroupParams::default(), &BfsPartitioner).unwrap();

        let mut seen = vec![false; meshlets.len()];
        for group in &groups {
            for &m in group {
                assert!(!seen[m]);
                seen[m] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_group_sizes_near_target() {
        let meshlets = clusterize(&icosphere(2));
        let params = GroupParams::default();
        let groups = group_meshlets(&meshlets, &params, &BfsPartitioner).unwrap();
        for group in &groups {
            assert!(group.len() <= params.target_group_size);
        }
    }

    #[test]
    fn test_fewer_meshlets_than_target_single_group() {
        let meshlets = clusterize(&grid_mesh(1, 1));
        assert_eq!(meshlets.len(), 1);
        let groups = group_meshlets(&meshlets, &GroupParams::default(), &BfsPartitioner).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], vec![0]);
    }

    #[test]
    fn test_empty_input() {
        let groups = group_meshlets(&[], &GroupParams::default(), &BfsPartitioner).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_bad_partitioner_rejected() {
        struct DropsOne;
        impl GraphPartitioner for DropsOne {
            fn partition(
                &self,
                adjacency: &[Vec<usize>],
                _n_parts: usize,
            ) -> GroupResult<Vec<Vec<usize>>> {
                // Leaves the last node unassigned.
                Ok(vec![(0..adjacency.len().saturating_sub(1)).collect()])
            }
        }

        let meshlets = clusterize(&grid_mesh(3, 3));
        let err = group_meshlets(&meshlets, &GroupParams::default(), &DropsOne).unwrap_err();
        assert!(matches!(err, GroupError::PartitionFailure { .. }));
    }
}
