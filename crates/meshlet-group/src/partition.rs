//! Balanced graph partitioning behind a trait seam.
//!
//! The hierarchy builder takes the partitioner as an injected dependency so
//! alternative implementations (external solvers, test doubles) can slot in
//! without touching the grouping pipeline.

use tracing::debug;

use crate::{GroupError, GroupResult};

/// Splits an undirected graph into balanced parts.
///
/// `adjacency` is one sorted neighbor list per node. Implementations should
/// treat `n_parts` as a target: a disconnected graph may force more parts.
/// Every returned part must be non-empty and every node must appear in
/// exactly one part; results are checked by [`validate_partition`] and bad
/// ones are surfaced as [`GroupError::PartitionFailure`], never repaired.
pub trait GraphPartitioner {
    /// Partition the graph into roughly `n_parts` balanced parts.
    ///
    /// # Errors
    ///
    /// Implementations return [`GroupError::PartitionFailure`] when they
    /// cannot produce a partition at all.
    fn partition(&self, adjacency: &[Vec<usize>], n_parts: usize) -> GroupResult<Vec<Vec<usize>>>;
}

/// Deterministic breadth-first partitioner.
///
/// Seeds parts from the lowest unassigned node index and grows each part
/// breadth-first over unassigned neighbors until it reaches the balanced
/// target size. Connected inputs yield connected parts; disconnected
/// components each start their own part.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsPartitioner;

impl GraphPartitioner for BfsPartitioner {
    fn partition(&self, adjacency: &[Vec<usize>], n_parts: usize) -> GroupResult<Vec<Vec<usize>>> {
        let node_count = adjacency.len();
        if node_count == 0 || n_parts == 0 {
            return Ok(Vec::new());
        }

        let target = node_count.div_ceil(n_parts);
        let mut assigned = vec![false; node_count];
        let mut parts: Vec<Vec<usize>> = Vec::with_capacity(n_parts);
        let mut queue = std::collections::VecDeque::new();

        for seed in 0..node_count {
            if assigned[seed] {
                continue;
            }

            let mut part = Vec::with_capacity(target);
            queue.clear();
            queue.push_back(seed);
            assigned[seed] = true;

            while let Some(node) = queue.pop_front() {
                part.push(node);
                if part.len() + queue.len() >= target {
                    break;
                }
                for &next in &adjacency[node] {
                    if !assigned[next] && part.len() + queue.len() < target {
                        assigned[next] = true;
                        queue.push_back(next);
                    }
                }
            }
            // Drain anything still queued into this part.
            part.extend(queue.drain(..));
            parts.push(part);
        }

        debug!(
            nodes = node_count,
            requested = n_parts,
            produced = parts.len(),
            "Partitioned meshlet graph"
        );
        Ok(parts)
    }
}

/// Check that a partition covers every node exactly once with no empty part.
///
/// # Errors
///
/// Returns [`GroupError::PartitionFailure`] naming the first violation.
pub fn validate_partition(node_count: usize, parts: &[Vec<usize>]) -> GroupResult<()> {
    let mut seen = vec![false; node_count];
    for (p, part) in parts.iter().enumerate() {
        if part.is_empty() {
            return Err(GroupError::PartitionFailure {
                reason: format!("part {p} is empty"),
            });
        }
        for &node in part {
            if node >= node_count {
                return Err(GroupError::PartitionFailure {
                    reason: format!("part {p} names node {node} out of {node_count}"),
                });
            }
            if seen[node] {
                return Err(GroupError::PartitionFailure {
                    reason: format!("node {node} assigned twice"),
                });
            }
            seen[node] = true;
        }
    }
    if let Some(missing) = seen.iter().position(|&s| !s) {
        return Err(GroupError::PartitionFailure {
            reason: format!("node {missing} unassigned"),
        });
    }
    Ok(())
}
