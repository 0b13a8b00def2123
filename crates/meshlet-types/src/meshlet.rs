//! Meshlet: a bounded, independently renderable triangle cluster.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::validate_indices;
use crate::{Aabb, BoundingSphere, Edge, MeshResult, Vertex};

/// Counter feeding [`next_meshlet_id`].
static ID_SEED: AtomicU32 = AtomicU32::new(0);

/// A stable, random-looking 32-bit id.
///
/// Ids are used for hashing and debug coloring, never for identity logic.
/// The generator is the classic `fract(sin(x * 12.9898) * 43758.5453)`
/// shader hash over a process-wide counter.
fn next_meshlet_id() -> u32 {
    let seed = ID_SEED.fetch_add(1, Ordering::Relaxed);
    #[allow(clippy::cast_precision_loss)]
    let x = ((seed + 1) as f32 * 12.9898).sin() * 43758.5453;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let id = (x.fract().abs() * 10_000_000.0) as u32;
    id
}

/// A meshlet: a small triangle cluster with its own dense vertex array.
///
/// Triangle indices are *local* to the meshlet (re-based after extraction
/// from the source mesh), so a meshlet renders without any external vertex
/// lookups. Meshlets are read-only once created; the hierarchy builder is
/// the sole writer of the parent/error fields, before the meshlet enters
/// the hierarchy.
///
/// # Example
///
/// ```
/// use meshlet_types::{Meshlet, Vertex};
///
/// let meshlet = Meshlet::new(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///     ],
///     vec![0, 1, 2],
/// )
/// .unwrap();
///
/// assert_eq!(meshlet.triangle_count(), 1);
/// // A lone triangle is all boundary.
/// assert_eq!(meshlet.boundary_edges().len(), 3);
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Meshlet {
    /// Dense local vertex array.
    pub vertices: Vec<Vertex>,
    /// Triangle list of local indices into `vertices`.
    pub indices: Vec<u32>,

    /// Bounding sphere of the meshlet's own geometry.
    pub bounds: BoundingSphere,
    /// Axis-aligned bounds of the meshlet's own geometry.
    pub aabb: Aabb,

    /// Geometric error introduced by the simplification step that produced
    /// this meshlet. Zero for leaf (L0) meshlets.
    pub cluster_error: f32,
    /// Error of this meshlet's simplification parent. Infinity until a
    /// parent exists, which makes roots always refinable by the cut rule.
    pub parent_error: f32,
    /// Bounding sphere of the pre-simplification group that produced this
    /// meshlet's parent. `None` until a parent exists.
    pub parent_bounds: Option<BoundingSphere>,

    /// LOD level index (0 = finest).
    pub lod: u32,
    /// Stable random-looking id for hashing/coloring, not identity.
    pub id: u32,

    #[cfg_attr(feature = "serde", serde(skip))]
    boundary: OnceLock<Vec<Edge>>,
}

impl Meshlet {
    /// Create a meshlet from local vertex and index buffers.
    ///
    /// Derived attributes (bounding volumes, id) are computed up front; the
    /// boundary-edge set is computed lazily on first use.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MeshError`] if the index buffer is not a triangle
    /// list or references past the local vertex array.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> MeshResult<Self> {
        validate_indices(&indices, vertices.len())?;
        let bounds = BoundingSphere::ritter(&vertices);
        let aabb = Aabb::from_vertices(&vertices);
        Ok(Self {
            vertices,
            indices,
            bounds,
            aabb,
            cluster_error: 0.0,
            parent_error: f32::INFINITY,
            parent_bounds: None,
            lod: 0,
            id: next_meshlet_id(),
            boundary: OnceLock::new(),
        })
    }

    /// Number of local vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over local index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Edges referenced by exactly one triangle of this meshlet.
    ///
    /// Computed on first call and cached; meshlet geometry is immutable so
    /// the cache never invalidates.
    #[must_use]
    pub fn boundary_edges(&self) -> &[Edge] {
        self.boundary.get_or_init(|| {
            let mut counts: HashMap<Edge, u32> =
                HashMap::with_capacity(self.indices.len());
            for tri in self.triangles() {
                for edge in Edge::triangle_edges(tri) {
                    *counts.entry(edge).or_insert(0) += 1;
                }
            }
            let mut boundary: Vec<Edge> = counts
                .into_iter()
                .filter_map(|(edge, count)| (count == 1).then_some(edge))
                .collect();
            boundary.sort_unstable();
            boundary
        })
    }

    /// Resolved endpoint positions of a local edge.
    ///
    /// # Panics
    ///
    /// Panics if the edge indices are out of range for this meshlet.
    #[must_use]
    pub fn edge_vertices(&self, edge: Edge) -> [Vertex; 2] {
        [
            self.vertices[edge.a as usize],
            self.vertices[edge.b as usize],
        ]
    }
}

impl Clone for Meshlet {
    fn clone(&self) -> Self {
        let boundary = OnceLock::new();
        if let Some(edges) = self.boundary.get() {
            let _ = boundary.set(edges.clone());
        }
        Self {
            vertices: self.vertices.clone(),
            indices: self.indices.clone(),
            bounds: self.bounds,
            aabb: self.aabb,
            cluster_error: self.cluster_error,
            parent_error: self.parent_error,
            parent_bounds: self.parent_bounds,
            lod: self.lod,
            id: self.id,
            boundary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Meshlet {
        // Two triangles sharing the 1-2 diagonal.
        Meshlet::new(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0),
                Vertex::from_coords(1.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 2, 1, 3],
        )
        .unwrap()
    }

    #[test]
    fn test_boundary_edges() {
        let meshlet = quad();
        let boundary = meshlet.boundary_edges();
        // Shared diagonal (1,2) is not a boundary edge; the outer 4 are.
        assert_eq!(boundary.len(), 4);
        assert!(!boundary.contains(&Edge::new(1, 2)));
        assert!(boundary.contains(&Edge::new(0, 1)));
    }

    #[test]
    fn test_rejects_out_of_range_local_index() {
        let result = Meshlet::new(vec![Vertex::default(); 2], vec![0, 1, 2]);
        assert!(result.is_err());
    }

    #[test]
    fn test_ids_vary() {
        let a = quad();
        let b = quad();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_clone_preserves_boundary_cache() {
        let meshlet = quad();
        let before = meshlet.boundary_edges().to_vec();
        let cloned = meshlet.clone();
        assert_eq!(cloned.boundary_edges(), before.as_slice());
    }

    #[test]
    fn test_bounds_enclose_vertices() {
        let meshlet = quad();
        for v in &meshlet.vertices {
            let d = (v.position - meshlet.bounds.center).norm();
            assert!(d <= meshlet.bounds.radius + 1e-5);
        }
    }
}
