//! Core types for the meshlet LOD pipeline.
//!
//! This crate provides the foundational types shared by every stage of the
//! virtualized-geometry pipeline:
//!
//! - [`Vertex`] - A position in 3D space
//! - [`Edge`] - A canonicalized (min, max) vertex-index pair
//! - [`TriangleMesh`] - Validated input vertex/index buffers
//! - [`Meshlet`] - A small, independently renderable triangle cluster
//! - [`Aabb`] / [`BoundingSphere`] - Bounding volumes
//!
//! # Precision
//!
//! Geometry storage is single precision (`f32`). Algorithms that need more
//! headroom (quadric error accumulation) promote to `f64` at the point of
//! use and convert back on output.
//!
//! # Coordinate System
//!
//! Right-handed. Faces use **counter-clockwise (CCW) winding** when viewed
//! from outside; winding is preserved across all pipeline transformations.
//!
//! # Example
//!
//! ```
//! use meshlet_types::{TriangleMesh, Vertex};
//!
//! let mesh = TriangleMesh::new(
//!     vec![
//!         Vertex::from_coords(0.0, 0.0, 0.0),
//!         Vertex::from_coords(1.0, 0.0, 0.0),
//!         Vertex::from_coords(0.0, 1.0, 0.0),
//!     ],
//!     vec![0, 1, 2],
//! )
//! .unwrap();
//!
//! assert_eq!(mesh.triangle_count(), 1);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod edge;
mod error;
mod fixtures;
mod mesh;
mod meshlet;
mod vertex;

pub use bounds::{Aabb, BoundingSphere};
pub use edge::Edge;
pub use error::{MeshError, MeshResult};
pub use fixtures::{grid_mesh, icosphere, unit_cube};
pub use mesh::TriangleMesh;
pub use meshlet::Meshlet;
pub use vertex::Vertex;

// Re-export the nalgebra types used throughout the public API.
pub use nalgebra::{Matrix4, Point3, Vector3};
