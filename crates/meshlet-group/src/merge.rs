//! Group merging and orphan cleaning.

use hashbrown::HashMap;
use tracing::debug;

use meshlet_types::{Meshlet, TriangleMesh, Vertex};

use crate::GroupResult;

/// Merge the member meshlets of a group into one shared-namespace mesh.
///
/// Member buffers are concatenated with index offsets, then cleaned:
/// bit-identical positions weld into one vertex and unreferenced vertices
/// are dropped, so edges that were split across meshlet boundaries become
/// real shared edges again.
///
/// # Errors
///
/// Propagates mesh validation failures from the rebuilt buffers.
pub fn merge_group(meshlets: &[Meshlet], members: &[usize]) -> GroupResult<TriangleMesh> {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for &m in members {
        let meshlet = &meshlets[m];
        let offset = vertices.len() as u32;
        vertices.extend_from_slice(&meshlet.vertices);
        indices.extend(meshlet.indices.iter().map(|&i| offset + i));
    }

    let merged = TriangleMesh::new(vertices, indices)?;
    clean_mesh(&merged)
}

/// Weld bit-identical positions and drop unreferenced vertices.
///
/// Vertices keep first-seen order, so the operation is idempotent: cleaning
/// a cleaned mesh returns identical buffers.
///
/// # Errors
///
/// Propagates mesh validation failures from the rebuilt buffers.
pub fn clean_mesh(mesh: &TriangleMesh) -> GroupResult<TriangleMesh> {
    let mut slot_by_position: HashMap<[u32; 3], u32> = HashMap::new();
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut indices = Vec::with_capacity(mesh.indices().len());

    for &index in mesh.indices() {
        let vertex = mesh.vertices()[index as usize];
        let slot = *slot_by_position
            .entry(vertex.position_bits())
            .or_insert_with(|| {
                vertices.push(vertex);
                vertices.len() as u32 - 1
            });
        indices.push(slot);
    }

    debug!(
        before = mesh.vertex_count(),
        after = vertices.len(),
        "Cleaned mesh"
    );
    Ok(TriangleMesh::new(vertices, indices)?)
}
