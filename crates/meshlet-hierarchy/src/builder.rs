//! Bottom-up hierarchy construction.
//!
//! Each round takes the current LOD level, groups adjacent meshlets, merges
//! every group into one mesh, simplifies it to roughly half the triangles
//! with the group boundary locked, and re-clusterizes the result into the
//! next level. Groups within a round are independent and run in parallel;
//! a round never starts before the previous one has fully finished, since
//! grouping reads the completed level.

// Arena indices and triangle counts fit the narrower types in practice
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use nalgebra::Point3;
use rayon::prelude::*;
use tracing::{debug, info};

use meshlet_cluster::{build_meshlets, ClusterParams};
use meshlet_group::{group_meshlets, merge_group, BfsPartitioner, GraphPartitioner, GroupParams};
use meshlet_simplify::{simplify_mesh, SimplifyParams};
use meshlet_types::{BoundingSphere, Meshlet, TriangleMesh};

use crate::hierarchy::MeshletHierarchy;
use crate::HierarchyResult;

/// Why hierarchy construction stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The top level holds a single meshlet.
    Root,
    /// A round failed to shrink the level; kept levels are still valid.
    NoProgress,
    /// The level budget ran out before reaching a root.
    LevelLimit,
}

/// Parameters for [`HierarchyBuilder`].
#[derive(Debug, Clone)]
pub struct HierarchyParams {
    /// Clusterization limits, applied at level 0 and after every
    /// simplification round.
    pub cluster: ClusterParams,
    /// Grouping configuration.
    pub group: GroupParams,
    /// Simplification configuration. The per-group triangle target is set
    /// by the builder (half of the merged group); border preservation must
    /// stay on for group boundaries to stitch.
    pub simplify: SimplifyParams,
    /// Maximum number of LOD levels. Default: 25
    pub max_levels: usize,
}

impl Default for HierarchyParams {
    fn default() -> Self {
        Self {
            cluster: ClusterParams::default(),
            group: GroupParams::default(),
            simplify: SimplifyParams::default(),
            max_levels: 25,
        }
    }
}

/// Result of hierarchy construction.
#[derive(Debug)]
pub struct HierarchyBuildResult {
    /// The built hierarchy.
    pub hierarchy: MeshletHierarchy,
    /// Why construction stopped.
    pub termination: Termination,
    /// Largest cluster error in the hierarchy, relative to the input
    /// mesh's bounding sphere diameter.
    pub relative_error: f32,
}

impl std::fmt::Display for HierarchyBuildResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Hierarchy: {} meshlets over {} levels ({:?}, relative error {:.3e})",
            self.hierarchy.len(),
            self.hierarchy.level_count(),
            self.termination,
            self.relative_error
        )
    }
}

/// The coarsened output of one group within a round.
struct GroupOutput {
    members: Vec<usize>,
    sphere: BoundingSphere,
    error: f32,
    meshlets: Vec<Meshlet>,
    /// Own geometric center of each new meshlet, kept before its culling
    /// sphere is widened to the shared group sphere.
    centers: Vec<Point3<f32>>,
}

/// Builds meshlet LOD hierarchies.
///
/// The graph partitioner is injected so callers can swap the built-in
/// breadth-first partitioner for an external solver or a test double.
pub struct HierarchyBuilder {
    params: HierarchyParams,
    partitioner: Box<dyn GraphPartitioner + Send + Sync>,
}

impl HierarchyBuilder {
    /// Create a builder with the default breadth-first partitioner.
    #[must_use]
    pub fn new(params: HierarchyParams) -> Self {
        Self {
            params,
            partitioner: Box::new(BfsPartitioner),
        }
    }

    /// Replace the graph partitioner.
    #[must_use]
    pub fn with_partitioner(mut self, partitioner: Box<dyn GraphPartitioner + Send + Sync>) -> Self {
        self.partitioner = partitioner;
        self
    }

    /// Build the full LOD hierarchy for `mesh`.
    ///
    /// # Errors
    ///
    /// Propagates clusterization, grouping, and simplification failures.
    /// An invalid partition result surfaces as
    /// [`meshlet_group::GroupError::PartitionFailure`].
    pub fn build(&self, mesh: &TriangleMesh) -> HierarchyResult<HierarchyBuildResult> {
        let scale = mesh.scale();
        let leaves = build_meshlets(mesh, &self.params.cluster)?;

        let mut hierarchy = MeshletHierarchy::default();
        let mut current = hierarchy.push_level(leaves);
        let mut termination = Termination::Root;

        info!(
            triangles = mesh.triangle_count(),
            leaves = current.len(),
            "Built level 0"
        );

        while current.len() > 1 {
            let level = hierarchy.level_count();
            if level >= self.params.max_levels {
                termination = Termination::LevelLimit;
                break;
            }

            let outputs = {
                let level_meshlets = &hierarchy.meshlets()[current.clone()];
                let groups =
                    group_meshlets(level_meshlets, &self.params.group, self.partitioner.as_ref())?;
                groups
                    .into_par_iter()
                    .map(|members| self.coarsen_group(level_meshlets, members, level as u32))
                    .collect::<HierarchyResult<Vec<_>>>()?
            };

            // Simplification must shrink the surface itself; meshlet counts
            // can drop while every triangle survives re-clusterization.
            let old_triangles: usize = hierarchy.meshlets()[current.clone()]
                .iter()
                .map(Meshlet::triangle_count)
                .sum();
            let new_triangles: usize = outputs
                .iter()
                .flat_map(|o| o.meshlets.iter())
                .map(Meshlet::triangle_count)
                .sum();
            if new_triangles >= old_triangles {
                termination = Termination::NoProgress;
                debug!(level, new_triangles, old_triangles, "Round stalled");
                break;
            }

            current = self.append_level(&mut hierarchy, current.start, outputs);
            info!(level, meshlets = current.len(), "Built level");
        }

        let relative_error = if scale > 0.0 {
            hierarchy
                .meshlets()
                .iter()
                .map(|m| m.cluster_error)
                .fold(0.0, f32::max)
                / scale
        } else {
            0.0
        };

        let result = HierarchyBuildResult {
            hierarchy,
            termination,
            relative_error,
        };
        info!(%result, "Hierarchy complete");
        Ok(result)
    }

    /// Merge, simplify, and re-clusterize one group.
    fn coarsen_group(
        &self,
        level_meshlets: &[Meshlet],
        members: Vec<usize>,
        lod: u32,
    ) -> HierarchyResult<GroupOutput> {
        let merged = merge_group(level_meshlets, &members)?;

        // The group sphere must enclose every member sphere, not just the
        // merged geometry: member spheres may already be widened group
        // spheres from the previous round.
        let mut sphere = BoundingSphere::ritter(merged.vertices());
        for &m in &members {
            sphere.expand_to_enclose(&level_meshlets[m].bounds);
        }

        let mut simplify = self.params.simplify.clone();
        simplify.target_triangles = Some((merged.triangle_count() / 2).max(1));
        let simplified = simplify_mesh(&merged, &simplify)?;

        // Collapse cost is a squared plane distance; the hierarchy carries
        // errors as world-space lengths.
        let pass_error = simplified.error.sqrt() as f32;
        let child_error = members
            .iter()
            .map(|&m| level_meshlets[m].cluster_error)
            .fold(0.0, f32::max);
        let error = pass_error.max(child_error);

        let mut meshlets = build_meshlets(&simplified.mesh, &self.params.cluster)?;
        let centers = meshlets.iter().map(|m| m.bounds.center).collect();
        for m in &mut meshlets {
            m.lod = lod;
            m.cluster_error = error;
            // Siblings share the group's culling sphere so that a parent
            // and its children always project the same bound.
            m.bounds = sphere;
        }

        Ok(GroupOutput {
            members,
            sphere,
            error,
            meshlets,
            centers,
        })
    }

    /// Append the round's meshlets as a new level and wire parent links.
    fn append_level(
        &self,
        hierarchy: &mut MeshletHierarchy,
        current_start: usize,
        outputs: Vec<GroupOutput>,
    ) -> std::ops::Range<usize> {
        let mut level = Vec::new();
        let mut spans = Vec::with_capacity(outputs.len());
        for mut output in outputs {
            let start = level.len();
            level.append(&mut output.meshlets);
            spans.push((start, output));
        }
        let range = hierarchy.push_level(level);

        for (start, output) in spans {
            let parent_ids: Vec<u32> = (0..output.centers.len())
                .map(|i| (range.start + start + i) as u32)
                .collect();

            for &member in &output.members {
                let child_id = (current_start + member) as u32;
                // A group can re-clusterize into several parents; each
                // child links to the nearest one so in-degree stays 1.
                let child_center = hierarchy.meshlet(child_id).aabb.center();
                let parent = parent_ids
                    .iter()
                    .zip(&output.centers)
                    .min_by(|(_, a), (_, b)| {
                        let da = (*a - child_center).norm_squared();
                        let db = (*b - child_center).norm_squared();
                        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|(&id, _)| id);

                if let Some(parent) = parent {
                    hierarchy.link(child_id, parent);
                    let child = hierarchy.meshlet_mut(child_id);
                    child.parent_error = output.error;
                    child.parent_bounds = Some(output.sphere);
                }
            }
        }
        range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshlet_types::icosphere;

    fn small_params() -> HierarchyParams {
        HierarchyParams {
            cluster: ClusterParams::default()
                .with_max_triangles(8)
                .with_max_vertices(16),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_reaches_few_meshlets() {
        let mesh = icosphere(2);
        let result = HierarchyBuilder::new(small_params()).build(&mesh).unwrap();

        assert!(result.hierarchy.level_count() > 1);
        let top = result.hierarchy.level_count() - 1;
        assert!(result.hierarchy.level_meshlets(top).len() < result.hierarchy.level_meshlets(0).len());
        assert!(result.relative_error >= 0.0);
    }

    #[test]
    fn test_level_zero_has_zero_error() {
        let mesh = icosphere(1);
        let result = HierarchyBuilder::new(small_params()).build(&mesh).unwrap();
        for m in result.hierarchy.level_meshlets(0) {
            assert_eq!(m.cluster_error, 0.0);
        }
    }

    #[test]
    fn test_locked_strip_stalls_on_triangle_count() {
        // Every vertex of a one-quad-wide strip is a border vertex, so
        // simplification cannot remove a single triangle. The round must
        // stop as a stall, not grind on to the level limit.
        let mesh = meshlet_types::grid_mesh(6, 1);
        let params = HierarchyParams {
            cluster: ClusterParams::default()
                .with_max_triangles(4)
                .with_max_vertices(8),
            ..Default::default()
        };
        let result = HierarchyBuilder::new(params).build(&mesh).unwrap();

        assert_eq!(result.termination, Termination::NoProgress);
        assert_eq!(result.hierarchy.level_count(), 1);
        let leaf_triangles: usize = result
            .hierarchy
            .level_meshlets(0)
            .iter()
            .map(Meshlet::triangle_count)
            .sum();
        assert_eq!(leaf_triangles, mesh.triangle_count());
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = TriangleMesh::new(Vec::new(), Vec::new()).unwrap();
        let result = HierarchyBuilder::new(small_params()).build(&mesh).unwrap();
        assert!(result.hierarchy.is_empty());
        assert_eq!(result.termination, Termination::Root);
    }

    #[test]
    fn test_display() {
        let mesh = icosphere(1);
        let result = HierarchyBuilder::new(small_params()).build(&mesh).unwrap();
        let text = format!("{result}");
        assert!(text.contains("levels"));
    }
}
