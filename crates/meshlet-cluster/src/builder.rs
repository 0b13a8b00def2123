//! Greedy meshlet growth.

// Mesh indices and counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use nalgebra::{Point3, Vector3};
use tracing::{debug, info};

use meshlet_types::{Meshlet, TriangleMesh, Vertex};

use crate::kdtree::CentroidKdTree;
use crate::{ClusterParams, ClusterResult};

/// Per-triangle cone: centroid plus unit normal.
///
/// Degenerate (zero-area) triangles contribute a zero direction; the
/// division by area is guarded so they still occupy cluster slots without
/// skewing the running cone.
#[derive(Debug, Clone, Copy)]
struct Cone {
    centroid: Point3<f32>,
    normal: Vector3<f32>,
}

/// Running accumulation of appended triangle cones.
#[derive(Debug, Clone, Copy, Default)]
struct ConeAcc {
    centroid_sum: Vector3<f32>,
    normal_sum: Vector3<f32>,
    count: u32,
}

impl ConeAcc {
    fn push(&mut self, cone: &Cone) {
        self.centroid_sum += cone.centroid.coords;
        self.normal_sum += cone.normal;
        self.count += 1;
    }

    /// Mean centroid and normalized average normal (guarded).
    fn resolve(&self) -> Cone {
        if self.count == 0 {
            return Cone {
                centroid: Point3::origin(),
                normal: Vector3::zeros(),
            };
        }
        let centroid = Point3::from(self.centroid_sum / self.count as f32);
        let len = self.normal_sum.norm();
        let normal = if len > 0.0 {
            self.normal_sum / len
        } else {
            Vector3::zeros()
        };
        Cone { centroid, normal }
    }
}

/// Per-vertex triangle adjacency, built with counting-sort bucketing.
struct Adjacency {
    counts: Vec<u32>,
    offsets: Vec<u32>,
    data: Vec<u32>,
}

impl Adjacency {
    fn build(mesh: &TriangleMesh) -> Self {
        let vertex_count = mesh.vertex_count();
        let mut counts = vec![0u32; vertex_count];
        for &index in mesh.indices() {
            counts[index as usize] += 1;
        }

        let mut offsets = vec![0u32; vertex_count];
        let mut offset = 0u32;
        for (slot, &count) in offsets.iter_mut().zip(&counts) {
            *slot = offset;
            offset += count;
        }

        let mut data = vec![0u32; mesh.indices().len()];
        let mut cursor = offsets.clone();
        for (tri, triangle) in mesh.triangles().enumerate() {
            for index in triangle {
                data[cursor[index as usize] as usize] = tri as u32;
                cursor[index as usize] += 1;
            }
        }

        Self {
            counts,
            offsets,
            data,
        }
    }

    fn neighbors(&self, vertex: u32) -> &[u32] {
        let start = self.offsets[vertex as usize] as usize;
        let end = start + self.counts[vertex as usize] as usize;
        &self.data[start..end]
    }

    /// Drop an emitted triangle from a vertex's live list (swap-remove).
    fn remove(&mut self, vertex: u32, triangle: u32) {
        let start = self.offsets[vertex as usize] as usize;
        let count = self.counts[vertex as usize] as usize;
        for i in start..start + count {
            if self.data[i] == triangle {
                self.data.swap(i, start + count - 1);
                self.counts[vertex as usize] -= 1;
                return;
            }
        }
    }
}

/// Upper bound on the number of meshlets produced for a given index count.
///
/// `max(ceil(index_count / (max_vertices - 2)), ceil(triangles / max_triangles))`.
#[must_use]
pub fn meshlet_count_bound(index_count: usize, params: &ClusterParams) -> usize {
    let by_vertices = index_count.div_ceil(params.max_vertices - 2);
    let by_triangles = (index_count / 3).div_ceil(params.max_triangles);
    by_vertices.max(by_triangles)
}

/// Candidate score: spatial distance blended with normal-cone spread.
///
/// Lower is better. The formula and its constants are empirically tuned;
/// treat them as configuration, not invariants.
fn meshlet_score(distance2: f32, spread: f32, cone_weight: f32, expected_radius: f32) -> f32 {
    let cone = spread.mul_add(-cone_weight, 1.0);
    let cone_clamped = cone.max(1e-3);
    (1.0 + distance2.sqrt() / expected_radius * (1.0 - cone_weight)) * cone_clamped
}

/// In-progress meshlet buffers, recycled between seals.
#[derive(Default)]
struct Growth {
    /// Global indices of the vertices claimed so far, in local order.
    vertex_globals: Vec<u32>,
    /// Local index triples.
    triangles: Vec<[u32; 3]>,
    cone: ConeAcc,
}

/// Partition a mesh into meshlets.
///
/// Every triangle of the input lands in exactly one meshlet, no meshlet
/// exceeds the configured limits, and the meshlet count stays within
/// [`meshlet_count_bound`]. A mesh with fewer than 3 triangles yields a
/// single meshlet; an empty mesh yields none.
///
/// # Errors
///
/// Returns [`crate::ClusterError`] when the limits are invalid. Degenerate
/// triangles are not errors; they are carried with a zero cone direction.
pub fn build_meshlets(mesh: &TriangleMesh, params: &ClusterParams) -> ClusterResult<Vec<Meshlet>> {
    params.validate()?;

    if mesh.is_empty() {
        return Ok(Vec::new());
    }

    let triangle_count = mesh.triangle_count();
    let (cones, total_area) = compute_cones(mesh);

    // Expected cluster radius from mean triangle area, used to normalize
    // the distance term of the score.
    let triangle_area_avg = total_area / triangle_count as f32 * 0.5;
    let expected_radius = (triangle_area_avg * params.max_triangles as f32).sqrt() * 0.5;
    let expected_radius = if expected_radius > 0.0 {
        expected_radius
    } else {
        1.0
    };

    let mut adjacency = Adjacency::build(mesh);
    let kdtree = CentroidKdTree::build(cones.iter().map(|c| c.centroid).collect());

    // Cluster-local slot per vertex; `None` is the "unused" sentinel.
    let mut used: Vec<Option<u8>> = vec![None; mesh.vertex_count()];
    let mut emitted = vec![false; triangle_count];
    let mut emitted_count = 0usize;

    let mut growth = Growth::default();
    let mut meshlets = Vec::new();

    while emitted_count < triangle_count {
        let cone = growth.cone.resolve();

        let mut best = best_neighbor(
            &growth,
            &adjacency,
            mesh,
            &used,
            &cones,
            &cone,
            params.cone_weight,
            expected_radius,
        );
        if best.is_none() {
            // Topological dead end (or a fresh meshlet): jump to the
            // spatially nearest live triangle.
            best = kdtree.nearest(&cone.centroid, &emitted);
        }
        let Some(tri) = best else {
            break;
        };

        let triangle = mesh.triangle(tri as usize);
        let extra = triangle
            .iter()
            .filter(|&&v| used[v as usize].is_none())
            .count();

        // Seal before overflow, then append to the fresh meshlet.
        if growth.vertex_globals.len() + extra > params.max_vertices
            || growth.triangles.len() + 1 > params.max_triangles
        {
            seal(&mut growth, &mut used, mesh, &mut meshlets)?;
        }

        for &v in &triangle {
            if used[v as usize].is_none() {
                used[v as usize] = Some(growth.vertex_globals.len() as u8);
                growth.vertex_globals.push(v);
            }
        }
        growth.triangles.push(triangle.map(|v| {
            u32::from(used[v as usize].unwrap_or_default())
        }));
        growth.cone.push(&cones[tri as usize]);

        emitted[tri as usize] = true;
        emitted_count += 1;
        for &v in &triangle {
            adjacency.remove(v, tri);
        }
    }

    if !growth.triangles.is_empty() {
        seal(&mut growth, &mut used, mesh, &mut meshlets)?;
    }

    debug_assert!(meshlets.len() <= meshlet_count_bound(mesh.indices().len(), params));

    info!(
        triangles = triangle_count,
        meshlets = meshlets.len(),
        "Clusterized mesh"
    );
    Ok(meshlets)
}

/// Scan neighbor triangles of the growth's claimed vertices.
///
/// The extra-vertex count is the primary filter (strictly fewer new
/// vertices wins outright); the cone score breaks ties.
#[allow(clippy::too_many_arguments)]
fn best_neighbor(
    growth: &Growth,
    adjacency: &Adjacency,
    mesh: &TriangleMesh,
    used: &[Option<u8>],
    cones: &[Cone],
    meshlet_cone: &Cone,
    cone_weight: f32,
    expected_radius: f32,
) -> Option<u32> {
    let mut best: Option<(u32, usize, f32)> = None;

    for &vertex in &growth.vertex_globals {
        for &tri in adjacency.neighbors(vertex) {
            let triangle = mesh.triangle(tri as usize);
            let extra = triangle
                .iter()
                .filter(|&&v| used[v as usize].is_none())
                .count();

            if let Some((_, best_extra, _)) = best {
                if extra > best_extra {
                    continue;
                }
            }

            let tri_cone = &cones[tri as usize];
            let distance2 = (tri_cone.centroid - meshlet_cone.centroid).norm_squared();
            let spread = tri_cone.normal.dot(&meshlet_cone.normal);
            let score = meshlet_score(distance2, spread, cone_weight, expected_radius);

            let better = match best {
                None => true,
                Some((_, best_extra, best_score)) => {
                    extra < best_extra || (extra == best_extra && score < best_score)
                }
            };
            if better {
                best = Some((tri, extra, score));
            }
        }
    }

    best.map(|(tri, _, _)| tri)
}

/// Emit the grown meshlet and release its vertex slots for re-use.
fn seal(
    growth: &mut Growth,
    used: &mut [Option<u8>],
    mesh: &TriangleMesh,
    meshlets: &mut Vec<Meshlet>,
) -> ClusterResult<()> {
    let vertices: Vec<Vertex> = growth
        .vertex_globals
        .iter()
        .map(|&g| mesh.vertices()[g as usize])
        .collect();
    let indices: Vec<u32> = growth.triangles.iter().flatten().copied().collect();

    debug!(
        vertices = vertices.len(),
        triangles = growth.triangles.len(),
        "Sealed meshlet"
    );

    for &g in &growth.vertex_globals {
        used[g as usize] = None;
    }
    growth.vertex_globals.clear();
    growth.triangles.clear();
    growth.cone = ConeAcc::default();

    meshlets.push(Meshlet::new(vertices, indices)?);
    Ok(())
}

fn compute_cones(mesh: &TriangleMesh) -> (Vec<Cone>, f32) {
    let mut cones = Vec::with_capacity(mesh.triangle_count());
    let mut total_area = 0.0f32;

    for i in 0..mesh.triangle_count() {
        let [p0, p1, p2] = mesh.triangle_positions(i);
        let cross = (p1 - p0).cross(&(p2 - p0));
        let area = cross.norm() * 0.5;
        total_area += area;

        // Guarded: zero-area triangles get a zero direction.
        let normal = if area > 0.0 {
            cross / (area * 2.0)
        } else {
            Vector3::zeros()
        };
        let centroid = Point3::from((p0.coords + p1.coords + p2.coords) / 3.0);
        cones.push(Cone { centroid, normal });
    }

    (cones, total_area)
}
