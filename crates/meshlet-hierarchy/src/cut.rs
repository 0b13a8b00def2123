//! Error-bounded cut selection.
//!
//! Given a view transform, a cut walks the hierarchy from the roots and
//! picks, per surface region, the coarsest meshlet whose projected error
//! stays under the pixel threshold. The rule is purely local: a meshlet is
//! selected when its own projected error is small enough and its parent's
//! is not, so disjoint subtrees never have to coordinate and the selected
//! set covers the surface exactly once.

use nalgebra::Matrix4;

use meshlet_types::{BoundingSphere, Meshlet};

use crate::hierarchy::MeshletHierarchy;

/// Parameters for [`select_cut`].
#[derive(Debug, Clone, Copy)]
pub struct CutParams {
    /// Viewport height in pixels. Default: 1080
    pub screen_height: f32,
    /// Vertical field of view in radians. Default: π/3
    pub fov_y: f32,
    /// Maximum tolerated projected error in pixels. Default: 0.1
    pub pixel_threshold: f32,
}

impl Default for CutParams {
    fn default() -> Self {
        Self {
            screen_height: 1080.0,
            fov_y: std::f32::consts::FRAC_PI_3,
            pixel_threshold: 0.1,
        }
    }
}

impl CutParams {
    /// Set the pixel threshold.
    #[must_use]
    pub const fn with_pixel_threshold(mut self, pixels: f32) -> Self {
        self.pixel_threshold = pixels;
        self
    }
}

/// Screen-space size in pixels of a world-space error at a cluster.
///
/// The error is treated as a sphere of radius `error` at the cluster's
/// bounding sphere center and projected through a perspective camera.
/// Returns infinity when the error sphere contains the camera origin, which
/// forces refinement for geometry the camera is inside of.
#[must_use]
pub fn project_error(sphere: &BoundingSphere, error: f32, view: &Matrix4<f32>, params: &CutParams) -> f32 {
    if error <= 0.0 {
        return 0.0;
    }
    if !error.is_finite() {
        return f32::INFINITY;
    }
    let center = view.transform_point(&sphere.center);
    let d2 = error.mul_add(-error, center.coords.norm_squared());
    if d2 <= 0.0 {
        return f32::INFINITY;
    }
    let cot_half_fov = 1.0 / (params.fov_y * 0.5).tan();
    params.screen_height * 0.5 * cot_half_fov * error / d2.sqrt()
}

fn own_error(meshlet: &Meshlet, view: &Matrix4<f32>, params: &CutParams) -> f32 {
    project_error(&meshlet.bounds, meshlet.cluster_error, view, params)
}

fn parent_error(meshlet: &Meshlet, view: &Matrix4<f32>, params: &CutParams) -> f32 {
    meshlet.parent_bounds.as_ref().map_or(f32::INFINITY, |sphere| {
        project_error(sphere, meshlet.parent_error, view, params)
    })
}

/// Select the LOD cut for one view.
///
/// Returns arena indices of the selected meshlets, in traversal order. The
/// function is pure: the same hierarchy, view, and params always produce
/// the same cut.
#[must_use]
pub fn select_cut(
    hierarchy: &MeshletHierarchy,
    view: &Matrix4<f32>,
    params: &CutParams,
) -> Vec<u32> {
    let mut selected = Vec::new();
    let mut visited = vec![0u64; hierarchy.len().div_ceil(64)];
    let mut stack: Vec<u32> = hierarchy.roots().collect();

    while let Some(id) = stack.pop() {
        let (word, bit) = (id as usize / 64, id as usize % 64);
        if visited[word] & (1 << bit) != 0 {
            continue;
        }
        visited[word] |= 1 << bit;

        let meshlet = hierarchy.meshlet(id);
        let own = own_error(meshlet, view, params);
        let parent = parent_error(meshlet, view, params);

        if own <= params.pixel_threshold {
            // Coarse enough here; render unless an ancestor already was.
            if parent > params.pixel_threshold {
                selected.push(id);
            }
        } else {
            stack.extend_from_slice(hierarchy.children(id));
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    fn sphere_at(z: f32) -> BoundingSphere {
        BoundingSphere {
            center: Point3::new(0.0, 0.0, z),
            radius: 1.0,
        }
    }

    #[test]
    fn test_zero_error_projects_to_zero() {
        let view = Matrix4::identity();
        let p = project_error(&sphere_at(-10.0), 0.0, &view, &CutParams::default());
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_error_shrinks_with_distance() {
        let view = Matrix4::identity();
        let params = CutParams::default();
        let near = project_error(&sphere_at(-5.0), 0.1, &view, &params);
        let far = project_error(&sphere_at(-50.0), 0.1, &view, &params);
        assert!(near > far);
        assert!(far > 0.0);

        // At 10x the distance the projection is ~10x smaller.
        assert_relative_eq!(near / far, 10.0, epsilon = 0.05);
    }

    #[test]
    fn test_origin_inside_error_sphere() {
        let view = Matrix4::identity();
        let sphere = sphere_at(-0.5);
        let p = project_error(&sphere, 2.0, &view, &CutParams::default());
        assert_eq!(p, f32::INFINITY);
    }

    #[test]
    fn test_infinite_error_projects_infinite() {
        let view = Matrix4::identity();
        let p = project_error(&sphere_at(-10.0), f32::INFINITY, &view, &CutParams::default());
        assert_eq!(p, f32::INFINITY);
    }

    #[test]
    fn test_view_translation_matters() {
        let params = CutParams::default();
        let near_view = Matrix4::new_translation(&Vector3::new(0.0, 0.0, -5.0));
        let far_view = Matrix4::new_translation(&Vector3::new(0.0, 0.0, -100.0));
        let sphere = sphere_at(0.0);
        let near = project_error(&sphere, 0.05, &near_view, &params);
        let far = project_error(&sphere, 0.05, &far_view, &params);
        assert!(near > far);
    }
}
