//! Quadric error metric.
//!
//! A quadric accumulates the squared distances from a point to a set of
//! planes. Each vertex carries the quadric of its incident triangle planes;
//! the cost of collapsing an edge is the combined quadric evaluated at the
//! merged position.

use std::ops::AddAssign;

use nalgebra::{Point3, Vector3};

/// Symmetric 4x4 quadric matrix stored as its upper triangle.
///
/// Geometry is stored in `f32`, but quadric arithmetic runs in `f64`:
/// accumulated plane quadrics are ill-conditioned and single precision
/// visibly degrades collapse placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quadric {
    // [a b c d]
    // [  e f g]
    // [    h i]
    // [      j]
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    g: f64,
    h: f64,
    i: f64,
    j: f64,
}

impl Quadric {
    /// Quadric of the plane through `point` with unit `normal`.
    #[must_use]
    pub fn from_plane(normal: &Vector3<f64>, point: &Point3<f64>) -> Self {
        let (a, b, c) = (normal.x, normal.y, normal.z);
        let d = -normal.dot(&point.coords);
        Self {
            a: a * a,
            b: a * b,
            c: a * c,
            d: a * d,
            e: b * b,
            f: b * c,
            g: b * d,
            h: c * c,
            i: c * d,
            j: d * d,
        }
    }

    /// Evaluate `v^T Q v` for `v = [x, y, z, 1]`.
    ///
    /// The sum of squared distances from the point to every plane folded
    /// into this quadric; never negative up to rounding.
    #[must_use]
    pub fn evaluate(&self, p: &Point3<f64>) -> f64 {
        let (x, y, z) = (p.x, p.y, p.z);
        x.mul_add(
            x.mul_add(self.a, 2.0 * y.mul_add(self.b, z.mul_add(self.c, self.d))),
            y.mul_add(
                y.mul_add(self.e, 2.0 * z.mul_add(self.f, self.g)),
                z.mul_add(z.mul_add(self.h, 2.0 * self.i), self.j),
            ),
        )
    }

    /// The point minimizing this quadric, or `None` when the 3x3 block is
    /// singular (planar or linear neighborhoods).
    #[must_use]
    pub fn optimal_point(&self) -> Option<Point3<f64>> {
        // [a b c] [x]   [-d]
        // [b e f] [y] = [-g]
        // [c f h] [z]   [-i]
        let det = self.a.mul_add(
            self.f.mul_add(-self.f, self.e * self.h),
            self.b.mul_add(
                self.c.mul_add(self.f, -self.b * self.h),
                self.c * self.e.mul_add(-self.c, self.b * self.f),
            ),
        );
        if det.abs() < 1e-12 {
            return None;
        }
        let inv_det = 1.0 / det;

        let m00 = self.f.mul_add(-self.f, self.e * self.h) * inv_det;
        let m01 = self.c.mul_add(self.f, -self.b * self.h) * inv_det;
        let m02 = self.c.mul_add(-self.e, self.b * self.f) * inv_det;
        let m11 = self.c.mul_add(-self.c, self.a * self.h) * inv_det;
        let m12 = self.b.mul_add(self.c, -self.a * self.f) * inv_det;
        let m22 = self.b.mul_add(-self.b, self.a * self.e) * inv_det;

        Some(Point3::new(
            m00.mul_add(-self.d, m01.mul_add(-self.g, m02 * -self.i)),
            m01.mul_add(-self.d, m11.mul_add(-self.g, m12 * -self.i)),
            m02.mul_add(-self.d, m12.mul_add(-self.g, m22 * -self.i)),
        ))
    }
}

impl AddAssign for Quadric {
    fn add_assign(&mut self, other: Self) {
        self.a += other.a;
        self.b += other.b;
        self.c += other.c;
        self.d += other.d;
        self.e += other.e;
        self.f += other.f;
        self.g += other.g;
        self.h += other.h;
        self.i += other.i;
        self.j += other.j;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_quadric() {
        let q = Quadric::default();
        assert_abs_diff_eq!(q.evaluate(&Point3::new(1.0, 2.0, 3.0)), 0.0);
    }

    #[test]
    fn test_plane_distance() {
        // Plane z = 0.
        let q = Quadric::from_plane(&Vector3::z(), &Point3::origin());
        assert_abs_diff_eq!(q.evaluate(&Point3::new(1.0, 2.0, 0.0)), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(q.evaluate(&Point3::new(0.0, 0.0, 2.0)), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_offset_plane() {
        // Plane z = 3.
        let q = Quadric::from_plane(&Vector3::z(), &Point3::new(0.0, 0.0, 3.0));
        assert_abs_diff_eq!(q.evaluate(&Point3::new(5.0, -2.0, 3.0)), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(q.evaluate(&Point3::new(0.0, 0.0, 4.0)), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_combined_minimum_at_corner() {
        // Three axis planes meet at the origin.
        let mut q = Quadric::from_plane(&Vector3::x(), &Point3::origin());
        q += Quadric::from_plane(&Vector3::y(), &Point3::origin());
        q += Quadric::from_plane(&Vector3::z(), &Point3::origin());

        let p = q.optimal_point().unwrap();
        assert!(p.coords.norm() < 1e-10);
    }

    #[test]
    fn test_singular_for_single_plane() {
        let q = Quadric::from_plane(&Vector3::z(), &Point3::origin());
        assert!(q.optimal_point().is_none());
    }
}
