//! Mesh simplification by quadric-error edge collapse.
//!
//! This crate reduces triangle meshes with the threshold-scheduled variant
//! of quadric error metric (QEM) edge collapse: instead of popping a global
//! priority queue, each iteration sweeps the triangles and collapses every
//! edge cheaper than a rising cost threshold. The sweep is deterministic,
//! cache-friendly, and cheap to restart, which matters when thousands of
//! small meshes are simplified independently.
//!
//! # Features
//!
//! - **Border preservation**: edges used by a single triangle can be locked
//!   so a patch's outer boundary survives bit-exact
//! - **Flip rejection**: collapses that would invert or degenerate a
//!   neighboring triangle are refused
//! - **Border linking**: optionally weld near-coincident border vertices
//!   before collapsing, repairing T-junctions
//! - **Lossless mode**: collapse only (near) zero-cost edges until none
//!   remain
//! - **Error reporting**: the largest accepted collapse cost is returned,
//!   usable as the geometric error of the simplified mesh
//!
//! # Example
//!
//! ```
//! use meshlet_simplify::{simplify_mesh, SimplifyParams};
//! use meshlet_types::icosphere;
//!
//! let sphere = icosphere(2);
//! let result = simplify_mesh(&sphere, &SimplifyParams::with_target_ratio(0.5)).unwrap();
//! println!("{result}");
//! assert!(result.final_triangles <= sphere.triangle_count() / 2);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod params;
mod quadric;
mod result;
mod simplify;

pub use error::{SimplifyError, SimplifyResult};
pub use params::SimplifyParams;
pub use quadric::Quadric;
pub use result::Simplification;
pub use simplify::{simplify_lossless, simplify_mesh};
