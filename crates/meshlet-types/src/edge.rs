//! Canonicalized mesh edges.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An undirected edge between two vertex indices.
///
/// The pair is canonicalized on construction so that `(a, b)` and `(b, a)`
/// compare and hash identically. Edges carry no orientation semantics; they
/// exist only for adjacency counting.
///
/// # Example
///
/// ```
/// use meshlet_types::Edge;
///
/// assert_eq!(Edge::new(5, 3), Edge::new(3, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Smaller vertex index.
    pub a: u32,
    /// Larger vertex index.
    pub b: u32,
}

impl Edge {
    /// Create a canonicalized edge from two vertex indices.
    #[inline]
    #[must_use]
    pub const fn new(from: u32, to: u32) -> Self {
        if from < to {
            Self { a: from, b: to }
        } else {
            Self { a: to, b: from }
        }
    }

    /// The three edges of a triangle, canonicalized.
    #[inline]
    #[must_use]
    pub const fn triangle_edges(tri: [u32; 3]) -> [Self; 3] {
        [
            Self::new(tri[0], tri[1]),
            Self::new(tri[1], tri[2]),
            Self::new(tri[2], tri[0]),
        ]
    }

    /// Whether the edge touches the given vertex index.
    #[inline]
    #[must_use]
    pub const fn contains(&self, index: u32) -> bool {
        self.a == index || self.b == index
    }
}
