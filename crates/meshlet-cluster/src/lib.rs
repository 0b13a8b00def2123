//! Mesh clusterization into bounded meshlets.
//!
//! This crate partitions an indexed triangle mesh into small clusters
//! ("meshlets") where every cluster stays under configurable vertex and
//! triangle limits, every triangle lands in exactly one cluster, and
//! clusters are spatially and topologically coherent to minimize
//! cross-cluster boundary length.
//!
//! # Algorithm
//!
//! Growth is greedy: each meshlet accumulates a running cone (centroid +
//! average normal) and repeatedly appends the neighbor triangle that adds
//! the fewest new vertices, breaking ties by a cone-distance score. When a
//! meshlet hits a topological dead end, a KD-tree over triangle centroids
//! supplies the spatially nearest unemitted triangle so growth can jump
//! across disconnected components.
//!
//! # Example
//!
//! ```
//! use meshlet_cluster::{build_meshlets, ClusterParams};
//! use meshlet_types::grid_mesh;
//!
//! let mesh = grid_mesh(3, 3); // 18 triangles
//! let params = ClusterParams::default()
//!     .with_max_triangles(4)
//!     .with_max_vertices(8);
//! let meshlets = build_meshlets(&mesh, &params).unwrap();
//! assert_eq!(meshlets.len(), 5);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod builder;
mod error;
mod kdtree;
mod params;

pub use builder::{build_meshlets, meshlet_count_bound};
pub use error::{ClusterError, ClusterResult};
pub use params::ClusterParams;
