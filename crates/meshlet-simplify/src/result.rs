//! Result types for simplification operations.

// Triangle counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use meshlet_types::TriangleMesh;

/// Result of mesh simplification.
#[derive(Debug, Clone)]
pub struct Simplification {
    /// The simplified mesh.
    pub mesh: TriangleMesh,

    /// Number of triangles in the original mesh.
    pub original_triangles: usize,

    /// Number of triangles in the simplified mesh.
    pub final_triangles: usize,

    /// Number of edge collapses performed.
    pub collapses_performed: usize,

    /// Largest accepted collapse cost (squared plane distance).
    ///
    /// Meaningful as the geometric error introduced by this pass; 0 when
    /// nothing collapsed.
    pub error: f64,
}

impl Simplification {
    /// Reduction ratio (final / original).
    #[must_use]
    pub fn reduction_ratio(&self) -> f64 {
        if self.original_triangles == 0 {
            1.0
        } else {
            self.final_triangles as f64 / self.original_triangles as f64
        }
    }

    /// Percentage of triangles removed.
    #[must_use]
    pub fn reduction_percent(&self) -> f64 {
        (1.0 - self.reduction_ratio()) * 100.0
    }

    /// Whether any collapse happened.
    #[must_use]
    pub const fn was_simplified(&self) -> bool {
        self.collapses_performed > 0
    }
}

impl std::fmt::Display for Simplification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Simplification: {} → {} triangles ({:.1}% reduction, {} collapses, error {:.3e})",
            self.original_triangles,
            self.final_triangles,
            self.reduction_percent(),
            self.collapses_performed,
            self.error
        )
    }
}
