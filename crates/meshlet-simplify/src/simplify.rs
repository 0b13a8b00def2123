//! Threshold-scheduled edge collapse.
//!
//! Instead of a global priority queue, collapses are admitted by a rising
//! per-iteration cost threshold: each sweep over the triangles collapses
//! every edge whose quadric cost is under the current threshold, and the
//! threshold grows polynomially with the iteration count. Sweeps touch each
//! triangle at most once per iteration (dirty marking), which keeps the
//! working set compact and the result deterministic.

// Mesh indices and counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
// Algorithm uses standard mathematical variable names
#![allow(clippy::many_single_char_names)]

use nalgebra::{Point3, Vector3};
use tracing::{debug, info};

use meshlet_types::{TriangleMesh, Vertex};

use crate::params::SimplifyParams;
use crate::quadric::Quadric;
use crate::result::Simplification;
use crate::SimplifyResult;

#[derive(Debug, Clone, Copy)]
struct SimVertex {
    p: Point3<f64>,
    tstart: usize,
    tcount: usize,
    q: Quadric,
    border: bool,
}

#[derive(Debug, Clone, Copy)]
struct SimTriangle {
    v: [usize; 3],
    /// Collapse cost per edge (`v[j]` to `v[j+1]`), plus the minimum in
    /// slot 3 for the cheap triangle-level threshold test.
    err: [f64; 4],
    deleted: bool,
    dirty: bool,
    n: Vector3<f64>,
}

/// One (triangle, corner slot) incidence of a vertex.
#[derive(Debug, Clone, Copy)]
struct TriRef {
    tri: usize,
    slot: usize,
}

struct Simplifier {
    vertices: Vec<SimVertex>,
    triangles: Vec<SimTriangle>,
    refs: Vec<TriRef>,
    preserve_borders: bool,
    collapses: usize,
    max_cost: f64,
}

/// Simplify a mesh by quadric-error edge collapse.
///
/// Stops when the triangle count reaches the configured target, the
/// iteration budget runs out, or no further collapse passes the threshold
/// and flip tests. With `preserve_borders` (the default) border vertices
/// never move, so the outer boundary of the input survives bit-exact.
///
/// # Errors
///
/// Returns parameter validation failures and propagates mesh validation
/// errors from the rebuilt buffers.
///
/// # Example
///
/// ```
/// use meshlet_simplify::{simplify_mesh, SimplifyParams};
/// use meshlet_types::icosphere;
///
/// let sphere = icosphere(2); // 320 triangles
/// let result = simplify_mesh(&sphere, &SimplifyParams::with_target_ratio(0.5)).unwrap();
/// assert!(result.final_triangles <= 160);
/// ```
pub fn simplify_mesh(
    mesh: &TriangleMesh,
    params: &SimplifyParams,
) -> SimplifyResult<Simplification> {
    params.validate()?;

    let original_triangles = mesh.triangle_count();
    let target = params
        .target_triangles
        .unwrap_or_else(|| ((original_triangles as f64) * params.target_ratio).ceil() as usize);

    if original_triangles == 0 || original_triangles <= target {
        return Ok(Simplification {
            mesh: mesh.clone(),
            original_triangles,
            final_triangles: original_triangles,
            collapses_performed: 0,
            error: 0.0,
        });
    }

    info!(
        original = original_triangles,
        target = target,
        "Starting simplification"
    );

    let mut s = Simplifier::from_mesh(mesh, params.preserve_borders);
    s.init_topology();
    if let Some(distance) = params.vertex_link_distance {
        s.link_border_vertices(distance);
        s.compact_triangles();
        s.init_topology();
    }

    let mut deleted_triangles = 0usize;
    let triangle_count = s.triangles.len();

    for iteration in 0..params.max_iterations {
        if triangle_count - deleted_triangles <= target {
            break;
        }

        // Periodic compaction keeps the sweep from re-visiting carcasses.
        if iteration > 0 && iteration % 5 == 0 {
            s.compact_triangles();
            s.rebuild_refs();
        }

        for t in &mut s.triangles {
            t.dirty = false;
        }

        let threshold =
            params.threshold_epsilon * f64::from(iteration as u32 + 3).powf(params.aggressiveness);
        let before = deleted_triangles;
        s.sweep(threshold, target, triangle_count, &mut deleted_triangles);

        debug!(
            iteration,
            threshold,
            deleted = deleted_triangles - before,
            live = triangle_count - deleted_triangles,
            "Collapse iteration"
        );
    }

    let mesh = s.build_mesh()?;
    let final_triangles = mesh.triangle_count();
    let result = Simplification {
        mesh,
        original_triangles,
        final_triangles,
        collapses_performed: s.collapses,
        error: s.max_cost,
    };
    info!(%result, "Simplification complete");
    Ok(result)
}

/// Collapse every edge that costs (near) nothing, repeatedly, until no
/// collapse qualifies.
///
/// Removes redundant geometry (coplanar fans, slivers from welding)
/// without moving the surface. The fixed threshold is
/// `params.threshold_epsilon`; targets and iteration budgets are ignored.
///
/// # Errors
///
/// Returns parameter validation failures and propagates mesh validation
/// errors from the rebuilt buffers.
pub fn simplify_lossless(
    mesh: &TriangleMesh,
    params: &SimplifyParams,
) -> SimplifyResult<Simplification> {
    params.validate()?;

    let original_triangles = mesh.triangle_count();
    if original_triangles == 0 {
        return Ok(Simplification {
            mesh: mesh.clone(),
            original_triangles: 0,
            final_triangles: 0,
            collapses_performed: 0,
            error: 0.0,
        });
    }

    let mut s = Simplifier::from_mesh(mesh, params.preserve_borders);
    s.init_topology();
    if let Some(distance) = params.vertex_link_distance {
        s.link_border_vertices(distance);
        s.compact_triangles();
        s.init_topology();
    }

    loop {
        for t in &mut s.triangles {
            t.dirty = false;
        }

        let live = s.triangles.len();
        let mut deleted = 0usize;
        s.sweep(params.threshold_epsilon, 0, live, &mut deleted);
        if deleted == 0 {
            break;
        }

        // Re-derive borders and quadrics from the surviving topology so a
        // pass never reasons from stale planes.
        s.compact_triangles();
        s.init_topology();
    }

    // Count from the output so weld-deleted triangles are included.
    let mesh = s.build_mesh()?;
    let final_triangles = mesh.triangle_count();
    Ok(Simplification {
        mesh,
        original_triangles,
        final_triangles,
        collapses_performed: s.collapses,
        error: s.max_cost,
    })
}

impl Simplifier {
    fn from_mesh(mesh: &TriangleMesh, preserve_borders: bool) -> Self {
        let vertices = mesh
            .vertices()
            .iter()
            .map(|v| SimVertex {
                p: v.position_f64(),
                tstart: 0,
                tcount: 0,
                q: Quadric::default(),
                border: false,
            })
            .collect();
        let triangles = mesh
            .triangles()
            .map(|t| SimTriangle {
                v: [t[0] as usize, t[1] as usize, t[2] as usize],
                err: [0.0; 4],
                deleted: false,
                dirty: false,
                n: Vector3::zeros(),
            })
            .collect();
        Self {
            vertices,
            triangles,
            refs: Vec::new(),
            preserve_borders,
            collapses: 0,
            max_cost: 0.0,
        }
    }

    /// Rebuild refs, border flags, quadrics, and per-edge errors.
    fn init_topology(&mut self) {
        self.rebuild_refs();
        self.mark_borders();
        self.init_quadrics();
    }

    fn rebuild_refs(&mut self) {
        for v in &mut self.vertices {
            v.tstart = 0;
            v.tcount = 0;
        }
        for t in &self.triangles {
            if t.deleted {
                continue;
            }
            for &vi in &t.v {
                self.vertices[vi].tcount += 1;
            }
        }
        let mut offset = 0;
        for v in &mut self.vertices {
            v.tstart = offset;
            offset += v.tcount;
            v.tcount = 0;
        }
        self.refs.clear();
        self.refs.resize(offset, TriRef { tri: 0, slot: 0 });
        for (i, t) in self.triangles.iter().enumerate() {
            if t.deleted {
                continue;
            }
            for (slot, &vi) in t.v.iter().enumerate() {
                let v = &mut self.vertices[vi];
                self.refs[v.tstart + v.tcount] = TriRef { tri: i, slot };
                v.tcount += 1;
            }
        }
    }

    /// A vertex is a border vertex when one of its incident edges is
    /// referenced by exactly one triangle.
    fn mark_borders(&mut self) {
        for v in &mut self.vertices {
            v.border = false;
        }
        let mut neighbor_counts: Vec<(usize, usize)> = Vec::new();
        for vi in 0..self.vertices.len() {
            neighbor_counts.clear();
            let (tstart, tcount) = (self.vertices[vi].tstart, self.vertices[vi].tcount);
            for k in 0..tcount {
                let t = &self.triangles[self.refs[tstart + k].tri];
                for &other in &t.v {
                    if other == vi {
                        continue;
                    }
                    match neighbor_counts.iter_mut().find(|(id, _)| *id == other) {
                        Some((_, count)) => *count += 1,
                        None => neighbor_counts.push((other, 1)),
                    }
                }
            }
            for &(other, count) in &neighbor_counts {
                if count == 1 {
                    self.vertices[vi].border = true;
                    self.vertices[other].border = true;
                }
            }
        }
    }

    fn init_quadrics(&mut self) {
        for v in &mut self.vertices {
            v.q = Quadric::default();
        }
        for i in 0..self.triangles.len() {
            if self.triangles[i].deleted {
                continue;
            }
            let [v0, v1, v2] = self.triangles[i].v;
            let p0 = self.vertices[v0].p;
            let p1 = self.vertices[v1].p;
            let p2 = self.vertices[v2].p;
            let n = (p1 - p0).cross(&(p2 - p0));
            let Some(n) = n.try_normalize(1e-12) else {
                // Degenerate triangle: no plane to contribute.
                self.triangles[i].n = Vector3::zeros();
                continue;
            };
            self.triangles[i].n = n;
            let q = Quadric::from_plane(&n, &p0);
            for vi in [v0, v1, v2] {
                self.vertices[vi].q += q;
            }
        }
        for i in 0..self.triangles.len() {
            if self.triangles[i].deleted {
                continue;
            }
            let v = self.triangles[i].v;
            let e0 = self.edge_cost(v[0], v[1]).0;
            let e1 = self.edge_cost(v[1], v[2]).0;
            let e2 = self.edge_cost(v[2], v[0]).0;
            self.triangles[i].err = [e0, e1, e2, e0.min(e1).min(e2)];
        }
    }

    /// Cost of collapsing `id1` and `id2` into one vertex, with the
    /// placement that achieves it.
    ///
    /// Uses the combined quadric's minimizer when it exists and neither
    /// endpoint is a border vertex, otherwise the cheapest of the endpoints
    /// and the midpoint.
    fn edge_cost(&self, id1: usize, id2: usize) -> (f64, Point3<f64>) {
        let mut q = self.vertices[id1].q;
        q += self.vertices[id2].q;

        let border = self.vertices[id1].border && self.vertices[id2].border;
        if !border {
            if let Some(p) = q.optimal_point() {
                return (q.evaluate(&p), p);
            }
        }

        let p1 = self.vertices[id1].p;
        let p2 = self.vertices[id2].p;
        let mid = Point3::from((p1.coords + p2.coords) * 0.5);
        let mut best = (q.evaluate(&p1), p1);
        for p in [p2, mid] {
            let e = q.evaluate(&p);
            if e < best.0 {
                best = (e, p);
            }
        }
        best
    }

    /// Would moving `i0` to `p` flip or degenerate any triangle around it?
    ///
    /// Triangles that also reference `i1` disappear in the collapse; those
    /// are recorded in `deleted` rather than tested.
    fn collapse_flips(
        &self,
        p: &Point3<f64>,
        i0: usize,
        i1: usize,
        deleted: &mut [bool],
    ) -> bool {
        let p = *p;
        let (tstart, tcount) = (self.vertices[i0].tstart, self.vertices[i0].tcount);
        for k in 0..tcount {
            let r = self.refs[tstart + k];
            let t = &self.triangles[r.tri];
            if t.deleted {
                continue;
            }
            let id1 = t.v[(r.slot + 1) % 3];
            let id2 = t.v[(r.slot + 2) % 3];
            if id1 == i1 || id2 == i1 {
                deleted[k] = true;
                continue;
            }
            let Some(d1) = (self.vertices[id1].p - p).try_normalize(1e-12) else {
                return true;
            };
            let Some(d2) = (self.vertices[id2].p - p).try_normalize(1e-12) else {
                return true;
            };
            // Near-parallel edges collapse the triangle to a sliver.
            if d1.dot(&d2).abs() > 0.999 {
                return true;
            }
            let Some(n) = d1.cross(&d2).try_normalize(1e-12) else {
                return true;
            };
            if n.dot(&t.n) < 0.2 {
                return true;
            }
        }
        false
    }

    /// Re-point the surviving triangles of `source`'s ref list at `i0`,
    /// marking the ones scheduled for deletion.
    fn update_triangles(
        &mut self,
        i0: usize,
        source: usize,
        deleted: &[bool],
        deleted_triangles: &mut usize,
    ) {
        let (tstart, tcount) = (self.vertices[source].tstart, self.vertices[source].tcount);
        for k in 0..tcount {
            let r = self.refs[tstart + k];
            if self.triangles[r.tri].deleted {
                continue;
            }
            if deleted[k] {
                self.triangles[r.tri].deleted = true;
                *deleted_triangles += 1;
                continue;
            }
            self.triangles[r.tri].v[r.slot] = i0;
            self.triangles[r.tri].dirty = true;
            let v = self.triangles[r.tri].v;
            let e0 = self.edge_cost(v[0], v[1]).0;
            let e1 = self.edge_cost(v[1], v[2]).0;
            let e2 = self.edge_cost(v[2], v[0]).0;
            self.triangles[r.tri].err = [e0, e1, e2, e0.min(e1).min(e2)];
            self.refs.push(r);
        }
    }

    /// One threshold sweep over all triangles.
    #[allow(clippy::needless_range_loop)]
    fn sweep(
        &mut self,
        threshold: f64,
        target: usize,
        triangle_count: usize,
        deleted_triangles: &mut usize,
    ) {
        let mut deleted0: Vec<bool> = Vec::new();
        let mut deleted1: Vec<bool> = Vec::new();

        for i in 0..self.triangles.len() {
            {
                let t = &self.triangles[i];
                if t.err[3] > threshold || t.deleted || t.dirty {
                    continue;
                }
            }

            for j in 0..3 {
                if self.triangles[i].err[j] > threshold || self.triangles[i].deleted {
                    continue;
                }
                let i0 = self.triangles[i].v[j];
                let i1 = self.triangles[i].v[(j + 1) % 3];

                let b0 = self.vertices[i0].border;
                let b1 = self.vertices[i1].border;
                if self.preserve_borders && (b0 || b1) {
                    continue;
                }
                // A border vertex must not be dragged into the interior.
                if b0 != b1 {
                    continue;
                }

                let (cost, p) = self.edge_cost(i0, i1);

                deleted0.clear();
                deleted0.resize(self.vertices[i0].tcount, false);
                deleted1.clear();
                deleted1.resize(self.vertices[i1].tcount, false);
                if self.collapse_flips(&p, i0, i1, &mut deleted0)
                    || self.collapse_flips(&p, i1, i0, &mut deleted1)
                {
                    continue;
                }

                // Merge i1 into i0 at the optimal position.
                self.vertices[i0].p = p;
                let q1 = self.vertices[i1].q;
                self.vertices[i0].q += q1;

                let tstart = self.refs.len();
                self.update_triangles(i0, i0, &deleted0, deleted_triangles);
                self.update_triangles(i0, i1, &deleted1, deleted_triangles);
                let tcount = self.refs.len() - tstart;

                if tcount <= self.vertices[i0].tcount {
                    // Reuse the old ref slots instead of growing the pool.
                    let old_start = self.vertices[i0].tstart;
                    self.refs.copy_within(tstart..tstart + tcount, old_start);
                    self.refs.truncate(tstart);
                } else {
                    self.vertices[i0].tstart = tstart;
                }
                self.vertices[i0].tcount = tcount;

                self.collapses += 1;
                if cost > self.max_cost {
                    self.max_cost = cost;
                }
                break;
            }

            if triangle_count - *deleted_triangles <= target {
                return;
            }
        }
    }

    fn compact_triangles(&mut self) {
        self.triangles.retain(|t| !t.deleted);
    }

    /// Weld border vertices closer than `distance`, sweeping along the
    /// dominant spatial axis so only nearby candidates are compared.
    fn link_border_vertices(&mut self, distance: f64) {
        let mut border: Vec<usize> = (0..self.vertices.len())
            .filter(|&i| self.vertices[i].border && self.vertices[i].tcount > 0)
            .collect();
        if border.len() < 2 {
            return;
        }

        let mut min = Vector3::repeat(f64::INFINITY);
        let mut max = Vector3::repeat(f64::NEG_INFINITY);
        for &i in &border {
            let p = self.vertices[i].p.coords;
            min = min.inf(&p);
            max = max.sup(&p);
        }
        let extent = max - min;
        let axis = extent.imax();

        border.sort_by(|&a, &b| {
            self.vertices[a].p[axis]
                .partial_cmp(&self.vertices[b].p[axis])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut remap: Vec<usize> = (0..self.vertices.len()).collect();
        let mut welds = 0usize;
        for i in 0..border.len() {
            let vi = border[i];
            if remap[vi] != vi {
                continue;
            }
            for &vj in &border[i + 1..] {
                if self.vertices[vj].p[axis] - self.vertices[vi].p[axis] > distance {
                    break;
                }
                if remap[vj] != vj {
                    continue;
                }
                if (self.vertices[vj].p - self.vertices[vi].p).norm() <= distance {
                    remap[vj] = vi;
                    welds += 1;
                }
            }
        }
        if welds == 0 {
            return;
        }

        for t in &mut self.triangles {
            if t.deleted {
                continue;
            }
            for vi in &mut t.v {
                *vi = remap[*vi];
            }
            if t.v[0] == t.v[1] || t.v[1] == t.v[2] || t.v[0] == t.v[2] {
                t.deleted = true;
            }
        }
        debug!(welds, "Linked border vertices");
    }

    /// Emit the surviving triangles as a compact `f32` mesh.
    fn build_mesh(&self) -> SimplifyResult<TriangleMesh> {
        let mut slot: Vec<Option<u32>> = vec![None; self.vertices.len()];
        let mut vertices: Vec<Vertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();

        for t in &self.triangles {
            if t.deleted {
                continue;
            }
            for &vi in &t.v {
                let index = match slot[vi] {
                    Some(index) => index,
                    None => {
                        let p = self.vertices[vi].p;
                        let index = vertices.len() as u32;
                        vertices.push(Vertex::from_coords(p.x as f32, p.y as f32, p.z as f32));
                        slot[vi] = Some(index);
                        index
                    }
                };
                indices.push(index);
            }
        }

        debug!(
            vertices = vertices.len(),
            triangles = indices.len() / 3,
            "Built simplified mesh"
        );
        Ok(TriangleMesh::new(vertices, indices)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use meshlet_types::{grid_mesh, icosphere, unit_cube};
    use std::collections::HashSet;

    #[test]
    fn test_simplify_empty_mesh() {
        let mesh = TriangleMesh::new(Vec::new(), Vec::new()).unwrap();
        let result = simplify_mesh(&mesh, &SimplifyParams::default()).unwrap();
        assert_eq!(result.original_triangles, 0);
        assert_eq!(result.final_triangles, 0);
        assert!(!result.was_simplified());
    }

    #[test]
    fn test_already_at_target() {
        let cube = unit_cube();
        let result = simplify_mesh(&cube, &SimplifyParams::with_target_triangles(12)).unwrap();
        assert_eq!(result.final_triangles, 12);
        assert_eq!(result.collapses_performed, 0);
    }

    #[test]
    fn test_icosphere_halved() {
        let sphere = icosphere(2); // 320 triangles, closed surface
        let result = simplify_mesh(&sphere, &SimplifyParams::with_target_ratio(0.5)).unwrap();

        assert_eq!(result.original_triangles, 320);
        assert!(result.final_triangles <= 160);
        assert!(result.final_triangles >= 4, "collapsed past a closed surface");
        assert!(result.was_simplified());
        assert!(result.error.is_finite());
        assert!(result.error >= 0.0);
        assert_eq!(result.mesh.triangle_count(), result.final_triangles);
    }

    #[test]
    fn test_icosahedron_to_ten_triangles() {
        // A collapse on a closed surface removes exactly two triangles, so
        // the target of 10 is hit exactly from 20.
        let sphere = icosphere(0);
        let result =
            simplify_mesh(&sphere, &SimplifyParams::with_target_triangles(10)).unwrap();
        assert_eq!(result.original_triangles, 20);
        assert_eq!(result.final_triangles, 10);
        assert!(result.error.is_finite());

        // Vertices stay within the reported error of the unit surface.
        let bound = result.error.sqrt() + 0.05;
        for v in result.mesh.vertices() {
            let r = f64::from(v.position.coords.norm());
            assert!((r - 1.0).abs() <= bound, "radius {r} outside bound {bound}");
        }
    }

    #[test]
    fn test_simplified_sphere_normals_stay_outward() {
        // Flip rejection keeps winding intact, so every surviving triangle
        // of a collapsed sphere still faces away from the center.
        let sphere = icosphere(2);
        let result = simplify_mesh(&sphere, &SimplifyParams::with_target_ratio(0.25)).unwrap();
        assert!(result.was_simplified());
        for i in 0..result.mesh.triangle_count() {
            let [a, b, c] = result.mesh.triangle_positions(i);
            let n = (b - a).cross(&(c - a));
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(n.dot(&centroid) > 0.0, "triangle {i} flipped inward");
        }
    }

    #[test]
    fn test_simplified_sphere_stays_near_unit_radius() {
        // Collapsing a unit sphere keeps vertices near the surface; the
        // slack bounds how far a coarse LOD may drift.
        let sphere = icosphere(3);
        let result = simplify_mesh(&sphere, &SimplifyParams::with_target_ratio(0.25)).unwrap();
        for v in result.mesh.vertices() {
            let r = v.position.coords.norm();
            assert!((0.8..=1.05).contains(&r), "vertex drifted to radius {r}");
        }
    }

    #[test]
    fn test_borders_preserved_bit_exact() {
        // The outer ring of an open grid must survive untouched so
        // neighboring patches still stitch.
        let mesh = grid_mesh(4, 4);
        let originals: HashSet<[u32; 3]> =
            mesh.vertices().iter().map(Vertex::position_bits).collect();

        let result = simplify_mesh(&mesh, &SimplifyParams::with_target_ratio(0.5)).unwrap();
        for v in result.mesh.vertices() {
            let on_edge = v.position.x.abs() < 1e-6
                || v.position.y.abs() < 1e-6
                || (v.position.x - 4.0).abs() < 1e-6
                || (v.position.y - 4.0).abs() < 1e-6;
            if on_edge {
                assert!(
                    originals.contains(&v.position_bits()),
                    "border vertex moved: {:?}",
                    v.position
                );
            }
        }
    }

    #[test]
    fn test_unlocked_borders_reduce_further() {
        let mesh = grid_mesh(6, 6);
        let locked =
            simplify_mesh(&mesh, &SimplifyParams::with_target_ratio(0.1)).unwrap();
        let unlocked = simplify_mesh(
            &mesh,
            &SimplifyParams::with_target_ratio(0.1).with_preserve_borders(false),
        )
        .unwrap();
        assert!(unlocked.final_triangles <= locked.final_triangles);
    }

    #[test]
    fn test_lossless_keeps_coplanar_shape() {
        // A flat grid is fully coplanar; lossless collapse may only remove
        // interior vertices, never change the footprint.
        let mesh = grid_mesh(3, 3);
        let result = simplify_lossless(&mesh, &SimplifyParams::default()).unwrap();
        assert!(result.final_triangles <= result.original_triangles);
        let bounds = result.mesh.bounds();
        let size = bounds.size();
        assert_abs_diff_eq!(size[0], 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(size[1], 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(size[2], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_lossless_terminates_on_sphere() {
        // Nothing on a curved closed surface collapses at near-zero cost.
        let sphere = icosphere(1);
        let result = simplify_lossless(&sphere, &SimplifyParams::default()).unwrap();
        assert_eq!(result.final_triangles, result.original_triangles);
    }

    #[test]
    fn test_lossless_counts_weld_deleted_triangles() {
        // A sliver whose corners all weld into one vertex disappears
        // during linking; the report must match the returned mesh.
        let mesh = TriangleMesh::from_positions(
            &[
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                5.0, 0.0, 0.0, // sliver, corners within 1e-8
                5.0, 1e-8, 0.0, //
                5.0, 0.0, 1e-8, //
            ],
            vec![0, 1, 2, 3, 4, 5],
        )
        .unwrap();

        let params = SimplifyParams::default().with_vertex_link_distance(1e-5);
        let result = simplify_lossless(&mesh, &params).unwrap();
        assert_eq!(result.original_triangles, 2);
        assert_eq!(result.final_triangles, 1);
        assert_eq!(result.final_triangles, result.mesh.triangle_count());
    }

    #[test]
    fn test_vertex_link_welds_t_junction() {
        // Two quads sharing a seam through duplicated (not shared)
        // vertices; linking welds the seam so collapse sees one surface.
        let mesh = TriangleMesh::from_positions(
            &[
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                1.0, 1.0, 0.0, //
                1.0, 0.0, 1e-7, // dup of 1, nudged
                2.0, 0.0, 0.0, //
                1.0, 1.0, 1e-7, // dup of 3, nudged
                2.0, 1.0, 0.0, //
            ],
            vec![0, 1, 3, 0, 3, 2, 4, 5, 7, 4, 7, 6],
        )
        .unwrap();

        let params = SimplifyParams::with_target_triangles(2).with_vertex_link_distance(1e-5);
        let result = simplify_mesh(&mesh, &params).unwrap();
        // Welding the two seam pairs leaves 6 distinct vertices.
        assert!(result.mesh.vertex_count() <= 6);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mesh = unit_cube();
        assert!(simplify_mesh(&mesh, &SimplifyParams::with_target_ratio(0.0)).is_err());
    }

    #[test]
    fn test_deterministic() {
        let sphere = icosphere(2);
        let params = SimplifyParams::with_target_ratio(0.5);
        let a = simplify_mesh(&sphere, &params).unwrap();
        let b = simplify_mesh(&sphere, &params).unwrap();
        assert_eq!(a.mesh.indices(), b.mesh.indices());
        assert_eq!(a.final_triangles, b.final_triangles);
    }
}
