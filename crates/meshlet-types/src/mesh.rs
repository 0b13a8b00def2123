//! Validated input triangle mesh.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::validate_indices;
use crate::{Aabb, BoundingSphere, MeshResult, Vertex};

/// An indexed triangle mesh: the pipeline's raw input.
///
/// Construction validates the index buffer (count divisible by 3, every
/// index in range) and fails fast on violations; the pipeline never clamps
/// bad input.
///
/// # Example
///
/// ```
/// use meshlet_types::{TriangleMesh, Vertex};
///
/// let mesh = TriangleMesh::new(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///     ],
///     vec![0, 1, 2],
/// )
/// .unwrap();
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create a mesh from vertex and index buffers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MeshError`] when the index count is not a multiple
    /// of 3 or an index is out of range.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> MeshResult<Self> {
        validate_indices(&indices, vertices.len())?;
        Ok(Self { vertices, indices })
    }

    /// Create a mesh from flat position triples and an index buffer.
    ///
    /// # Errors
    ///
    /// Same validation as [`TriangleMesh::new`].
    pub fn from_positions(positions: &[f32], indices: Vec<u32>) -> MeshResult<Self> {
        let vertices = positions
            .chunks_exact(3)
            .map(|p| Vertex::from_coords(p[0], p[1], p[2]))
            .collect();
        Self::new(vertices, indices)
    }

    /// Vertex buffer.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Index buffer (triangle list).
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
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

    /// Whether the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The index triple of triangle `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= triangle_count()`.
    #[inline]
    #[must_use]
    pub fn triangle(&self, i: usize) -> [u32; 3] {
        [
            self.indices[i * 3],
            self.indices[i * 3 + 1],
            self.indices[i * 3 + 2],
        ]
    }

    /// Iterate over index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Resolved corner positions of triangle `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= triangle_count()`.
    #[must_use]
    pub fn triangle_positions(&self, i: usize) -> [Point3<f32>; 3] {
        let [a, b, c] = self.triangle(i);
        [
            self.vertices[a as usize].position,
            self.vertices[b as usize].position,
            self.vertices[c as usize].position,
        ]
    }

    /// Axis-aligned bounds of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_vertices(&self.vertices)
    }

    /// Geometry extent scalar: the diameter of the mesh's bounding sphere.
    ///
    /// Used to express simplification error relative to object size.
    #[must_use]
    pub fn scale(&self) -> f32 {
        BoundingSphere::ritter(&self.vertices).radius * 2.0
    }
}
