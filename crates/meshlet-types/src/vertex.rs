//! Vertex type.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh vertex: a position in 3D space.
///
/// Vertices are array-indexed and carry no identity beyond their index in
/// the owning buffer. Once a meshlet snapshot is taken they are immutable.
///
/// # Example
///
/// ```
/// use meshlet_types::Vertex;
///
/// let v = Vertex::from_coords(1.0, 2.0, 3.0);
/// assert_eq!(v.position.y, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in model space.
    pub position: Point3<f32>,
}

impl Vertex {
    /// Create a vertex from a position.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f32>) -> Self {
        Self { position }
    }

    /// Create a vertex from coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use meshlet_types::Vertex;
    ///
    /// let v = Vertex::from_coords(0.0, 1.0, 0.0);
    /// assert_eq!(v.position.y, 1.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_coords(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }

    /// Position promoted to double precision, for error-metric arithmetic.
    #[inline]
    #[must_use]
    pub fn position_f64(&self) -> Point3<f64> {
        Point3::new(
            f64::from(self.position.x),
            f64::from(self.position.y),
            f64::from(self.position.z),
        )
    }

    /// The raw bit patterns of the three coordinates.
    ///
    /// Used to key vertices by exact position (e.g. welding duplicated
    /// boundary vertices between meshlets) without relying on float `Eq`.
    #[inline]
    #[must_use]
    pub fn position_bits(&self) -> [u32; 3] {
        [
            self.position.x.to_bits(),
            self.position.y.to_bits(),
            self.position.z.to_bits(),
        ]
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::from_coords(0.0, 0.0, 0.0)
    }
}

impl From<Point3<f32>> for Vertex {
    fn from(position: Point3<f32>) -> Self {
        Self { position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_coords() {
        let v = Vertex::from_coords(1.0, 2.0, 3.0);
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_position_f64() {
        let v = Vertex::from_coords(0.5, -1.5, 2.0);
        let p = v.position_f64();
        assert_relative_eq!(p.x, 0.5);
        assert_relative_eq!(p.y, -1.5);
    }

    #[test]
    fn test_position_bits_stable() {
        let a = Vertex::from_coords(0.1, 0.2, 0.3);
        let b = Vertex::from_coords(0.1, 0.2, 0.3);
        assert_eq!(a.position_bits(), b.position_bits());
    }
}
