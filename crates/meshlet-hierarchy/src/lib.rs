//! Meshlet LOD hierarchy construction and runtime cut selection.
//!
//! This crate ties the pipeline together: a mesh is clusterized into
//! meshlets, adjacent meshlets are grouped, each group is merged and
//! simplified to roughly half its triangles with the group boundary locked,
//! and the result is re-clusterized into the next level. Repeating the
//! round builds a DAG whose levels cover the same surface at halving
//! detail; error bounds recorded during construction let a runtime pick a
//! crack-free cut for any viewpoint with purely local tests.
//!
//! # Example
//!
//! ```
//! use meshlet_hierarchy::{select_cut, CutParams, HierarchyBuilder, HierarchyParams};
//! use meshlet_types::{icosphere, Matrix4, Vector3};
//!
//! let mesh = icosphere(2);
//! let result = HierarchyBuilder::new(HierarchyParams::default())
//!     .build(&mesh)
//!     .unwrap();
//!
//! let view = Matrix4::new_translation(&Vector3::new(0.0, 0.0, -100.0));
//! let cut = select_cut(&result.hierarchy, &view, &CutParams::default());
//! assert!(!cut.is_empty());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod builder;
mod cut;
mod error;
mod hierarchy;

pub use builder::{HierarchyBuildResult, HierarchyBuilder, HierarchyParams, Termination};
pub use cut::{project_error, select_cut, CutParams};
pub use error::{HierarchyError, HierarchyResult};
pub use hierarchy::MeshletHierarchy;
