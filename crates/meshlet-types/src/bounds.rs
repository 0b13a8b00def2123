//! Bounding volumes: axis-aligned boxes and bounding spheres.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Vertex;

/// An axis-aligned bounding box.
///
/// # Example
///
/// ```
/// use meshlet_types::{Aabb, Point3};
///
/// let mut aabb = Aabb::empty();
/// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
/// aabb.expand_to_include(&Point3::new(-1.0, 0.0, 0.0));
/// assert_eq!(aabb.min, Point3::new(-1.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f32>,
    /// Maximum corner.
    pub max: Point3<f32>,
}

impl Aabb {
    /// An empty (inverted) box, useful as a starting point for expansion.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Whether the box contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Grow the box to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Compute the box of a vertex slice. Empty input yields [`Aabb::empty`].
    #[must_use]
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let mut aabb = Self::empty();
        for v in vertices {
            aabb.expand_to_include(&v.position);
        }
        aabb
    }

    /// Extent along each axis. Empty boxes report zero.
    #[must_use]
    pub fn size(&self) -> [f32; 3] {
        if self.is_empty() {
            return [0.0; 3];
        }
        [
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        ]
    }

    /// Box center. Empty boxes report the origin.
    #[must_use]
    pub fn center(&self) -> Point3<f32> {
        if self.is_empty() {
            return Point3::origin();
        }
        Point3::new(
            f32::midpoint(self.min.x, self.max.x),
            f32::midpoint(self.min.y, self.max.y),
            f32::midpoint(self.min.z, self.max.z),
        )
    }

    /// The axis (0, 1 or 2) with the largest extent.
    #[must_use]
    pub fn dominant_axis(&self) -> usize {
        let size = self.size();
        if size[0] >= size[1] && size[0] >= size[2] {
            0
        } else if size[1] >= size[2] {
            1
        } else {
            2
        }
    }
}

/// A bounding sphere: center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingSphere {
    /// Sphere center.
    pub center: Point3<f32>,
    /// Sphere radius.
    pub radius: f32,
}

impl BoundingSphere {
    /// A zero-radius sphere at the origin.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            center: Point3::origin(),
            radius: 0.0,
        }
    }

    /// Compute a near-minimal enclosing sphere with Ritter's algorithm.
    ///
    /// Seeds from the pair of extreme points along the axis of maximum
    /// spread, then expands to enclose outliers one point at a time.
    /// Empty input yields [`BoundingSphere::zero`].
    #[must_use]
    pub fn ritter(vertices: &[Vertex]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::zero();
        };

        // Extreme points per axis.
        let mut lo = [first.position; 3];
        let mut hi = [first.position; 3];
        for v in vertices {
            let p = v.position;
            for axis in 0..3 {
                if p[axis] < lo[axis][axis] {
                    lo[axis] = p;
                }
                if p[axis] > hi[axis][axis] {
                    hi[axis] = p;
                }
            }
        }

        // Seed from the widest pair.
        let mut best_axis = 0;
        let mut best_spread = 0.0f32;
        for axis in 0..3 {
            let spread = hi[axis][axis] - lo[axis][axis];
            if spread > best_spread {
                best_spread = spread;
                best_axis = axis;
            }
        }
        let (a, b) = (lo[best_axis], hi[best_axis]);
        let mut center = nalgebra::center(&a, &b);
        let mut radius = (b - a).norm() * 0.5;

        // One pass of expansion to swallow outliers.
        for v in vertices {
            let d = (v.position - center).norm();
            if d > radius {
                let shift = (d - radius) * 0.5;
                radius += shift;
                center += (v.position - center) * (shift / d);
            }
        }

        Self { center, radius }
    }

    /// Grow this sphere (if needed) so it fully encloses `other`.
    pub fn expand_to_enclose(&mut self, other: &Self) {
        let d = (other.center - self.center).norm();
        self.radius = self.radius.max(d + other.radius);
    }

    /// Whether this sphere fully contains `other`, within `tolerance`.
    #[must_use]
    pub fn contains_sphere(&self, other: &Self, tolerance: f32) -> bool {
        let d = (other.center - self.center).norm();
        d + other.radius <= self.radius + tolerance
    }
}
