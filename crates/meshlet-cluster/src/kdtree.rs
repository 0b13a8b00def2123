//! Median-split KD-tree over triangle centroids.
//!
//! Used by the clusterizer as a spatial fallback: when greedy growth hits a
//! topological dead end, the tree answers "nearest not-yet-emitted triangle
//! to this point". Emitted triangles stay in the tree and are skipped at
//! query time, so the tree is built once per mesh.

use nalgebra::Point3;

const LEAF_SIZE: usize = 8;

enum Node {
    /// Range into the `order` array.
    Leaf { start: usize, end: usize },
    Split {
        axis: usize,
        value: f32,
        left: Box<Node>,
        right: Box<Node>,
    },
}

pub(crate) struct CentroidKdTree {
    root: Node,
    /// Triangle ids, partitioned to match the tree structure.
    order: Vec<u32>,
    points: Vec<Point3<f32>>,
}

impl CentroidKdTree {
    pub(crate) fn build(points: Vec<Point3<f32>>) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let mut order: Vec<u32> = (0..points.len() as u32).collect();
        let len = order.len();
        let root = build_node(&points, &mut order, 0, len);
        Self {
            root,
            order,
            points,
        }
    }

    /// Index of the unemitted triangle whose centroid is nearest `target`,
    /// or `None` when every triangle has been emitted.
    pub(crate) fn nearest(&self, target: &Point3<f32>, emitted: &[bool]) -> Option<u32> {
        let mut best: Option<(f32, u32)> = None;
        self.search(&self.root, target, emitted, &mut best);
        best.map(|(_, index)| index)
    }

    fn search(
        &self,
        node: &Node,
        target: &Point3<f32>,
        emitted: &[bool],
        best: &mut Option<(f32, u32)>,
    ) {
        match node {
            Node::Leaf { start, end } => {
                for &index in &self.order[*start..*end] {
                    if emitted[index as usize] {
                        continue;
                    }
                    let d2 = (self.points[index as usize] - target).norm_squared();
                    if best.is_none_or(|(bd, _)| d2 < bd) {
                        *best = Some((d2, index));
                    }
                }
            }
            Node::Split {
                axis,
                value,
                left,
                right,
            } => {
                let delta = target[*axis] - value;
                let (near, far) = if delta <= 0.0 {
                    (left, right)
                } else {
                    (right, left)
                };
                self.search(near, target, emitted, best);
                // Only cross the split plane when the far side can still win.
                if best.is_none_or(|(bd, _)| delta * delta < bd) {
                    self.search(far, target, emitted, best);
                }
            }
        }
    }
}

fn build_node(points: &[Point3<f32>], order: &mut [u32], start: usize, end: usize) -> Node {
    let count = end - start;
    if count <= LEAF_SIZE {
        return Node::Leaf { start, end };
    }

    // Split along the axis of maximum spread.
    let mut lo = [f32::INFINITY; 3];
    let mut hi = [f32::NEG_INFINITY; 3];
    for &index in &order[start..end] {
        let p = points[index as usize];
        for axis in 0..3 {
            lo[axis] = lo[axis].min(p[axis]);
            hi[axis] = hi[axis].max(p[axis]);
        }
    }
    let mut axis = 0;
    for candidate in 1..3 {
        if hi[candidate] - lo[candidate] > hi[axis] - lo[axis] {
            axis = candidate;
        }
    }

    let mid = count / 2;
    order[start..end].select_nth_unstable_by(mid, |&a, &b| {
        points[a as usize][axis].total_cmp(&points[b as usize][axis])
    });
    let value = points[order[start + mid] as usize][axis];

    // All centroids coincident along every axis; no useful split exists.
    if hi[axis] - lo[axis] <= 0.0 {
        return Node::Leaf { start, end };
    }

    let left = Box::new(build_node(points, order, start, start + mid));
    let right = Box::new(build_node(points, order, start + mid, end));
    Node::Split {
        axis,
        value,
        left,
        right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_points(n: i32) -> Vec<Point3<f32>> {
        let mut points = Vec::new();
        for x in 0..n {
            for y in 0..n {
                #[allow(clippy::cast_precision_loss)]
                points.push(Point3::new(x as f32, y as f32, 0.0));
            }
        }
        points
    }

    #[test]
    fn test_nearest_matches_linear_scan() {
        let points = grid_points(7);
        let tree = CentroidKdTree::build(points.clone());
        let emitted = vec![false; points.len()];

        let target = Point3::new(3.2, 4.9, 0.0);
        let found = tree.nearest(&target, &emitted).unwrap();

        let expected = points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (*a - target)
                    .norm_squared()
                    .total_cmp(&(*b - target).norm_squared())
            })
            .map(|(i, _)| i as u32)
            .unwrap();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_nearest_skips_emitted() {
        let points = grid_points(3);
        let tree = CentroidKdTree::build(points.clone());
        let mut emitted = vec![false; points.len()];

        let target = Point3::new(0.0, 0.0, 0.0);
        let first = tree.nearest(&target, &emitted).unwrap();
        emitted[first as usize] = true;
        let second = tree.nearest(&target, &emitted).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_all_emitted_returns_none() {
        let points = grid_points(2);
        let tree = CentroidKdTree::build(points.clone());
        let emitted = vec![true; points.len()];
        assert!(tree.nearest(&Point3::origin(), &emitted).is_none());
    }

    #[test]
    fn test_coincident_points() {
        let points = vec![Point3::new(1.0, 1.0, 1.0); 20];
        let tree = CentroidKdTree::build(points);
        let emitted = vec![false; 20];
        assert!(tree.nearest(&Point3::origin(), &emitted).is_some());
    }
}
