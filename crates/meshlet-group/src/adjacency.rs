//! Meshlet adjacency from shared boundary edges.

use hashbrown::HashMap;
use tracing::debug;

use meshlet_types::Meshlet;

/// Bit-exact key for an edge, independent of any local vertex namespace.
///
/// Meshlets index into private vertex arrays, so edge identity across
/// meshlets has to go through positions. The endpoint position bits are
/// ordered so both sides of a shared edge produce the same key.
type EdgeKey = [[u32; 3]; 2];

fn edge_key(a: [u32; 3], b: [u32; 3]) -> EdgeKey {
    if a <= b {
        [a, b]
    } else {
        [b, a]
    }
}

/// Build adjacency lists over a set of meshlets.
///
/// Two meshlets are adjacent iff they share at least one boundary edge.
/// Lists are sorted, deduplicated, and symmetric.
#[must_use]
pub fn build_adjacency(meshlets: &[Meshlet]) -> Vec<Vec<usize>> {
    let mut by_edge: HashMap<EdgeKey, Vec<usize>> = HashMap::new();

    for (i, meshlet) in meshlets.iter().enumerate() {
        for &edge in meshlet.boundary_edges() {
            let [va, vb] = meshlet.edge_vertices(edge);
            let key = edge_key(va.position_bits(), vb.position_bits());
            by_edge.entry(key).or_default().push(i);
        }
    }

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); meshlets.len()];
    for owners in by_edge.values() {
        for (k, &a) in owners.iter().enumerate() {
            for &b in &owners[k + 1..] {
                if a != b {
                    adjacency[a].push(b);
                    adjacency[b].push(a);
                }
            }
        }
    }

    for list in &mut adjacency {
        list.sort_unstable();
        list.dedup();
    }

    debug!(
        meshlets = meshlets.len(),
        edges = by_edge.len(),
        "Built meshlet adjacency"
    );
    adjacency
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshlet_cluster::{build_meshlets, ClusterParams};
    use meshlet_types::grid_mesh;

    #[test]
    fn test_adjacency_symmetric() {
        let mesh = grid_mesh(3, 3);
        let params = ClusterParams::default()
            .with_max_triangles(4)
            .with_max_vertices(8);
        let meshlets = build_meshlets(&mesh, &params).unwrap();
        let adjacency = build_adjacency(&meshlets);

        assert_eq!(adjacency.len(), meshlets.len());
        for (i, list) in adjacency.iter().enumerate() {
            for &j in list {
                assert!(adjacency[j].contains(&i), "{j} missing back-edge to {i}");
                assert_ne!(i, j);
            }
        }
    }

    #[test]
    fn test_grid_clusters_connected() {
        // On a connected grid every cluster touches at least one other.
        let mesh = grid_mesh(4, 4);
        let params = ClusterParams::default()
            .with_max_triangles(8)
            .with_max_vertices(16);
        let meshlets = build_meshlets(&mesh, &params).unwrap();
        let adjacency = build_adjacency(&meshlets);

        assert!(meshlets.len() > 1);
        for list in &adjacency {
            assert!(!list.is_empty());
        }
    }

    #[test]
    fn test_disjoint_meshlets_not_adjacent() {
        let left = grid_mesh(1, 1);
        let far = meshlet_types::TriangleMesh::from_positions(
            &[100.0, 0.0, 0.0, 101.0, 0.0, 0.0, 100.0, 1.0, 0.0],
            vec![0, 1, 2],
        )
        .unwrap();
        let params = ClusterParams::default();
        let mut meshlets = build_meshlets(&left, &params).unwrap();
        meshlets.extend(build_meshlets(&far, &params).unwrap());
        assert_eq!(meshlets.len(), 2);

        let adjacency = build_adjacency(&meshlets);
        assert!(adjacency[0].is_empty());
        assert!(adjacency[1].is_empty());
    }
}
