//! Test-fixture mesh generators.
//!
//! Small procedural meshes used by doctests, unit tests and benchmarks
//! across the workspace.

use hashbrown::HashMap;

use crate::{TriangleMesh, Vertex};

/// A unit cube centered at the origin (8 vertices, 12 triangles, CCW).
#[must_use]
pub fn unit_cube() -> TriangleMesh {
    let h = 0.5;
    let vertices = vec![
        Vertex::from_coords(-h, -h, -h),
        Vertex::from_coords(h, -h, -h),
        Vertex::from_coords(h, h, -h),
        Vertex::from_coords(-h, h, -h),
        Vertex::from_coords(-h, -h, h),
        Vertex::from_coords(h, -h, h),
        Vertex::from_coords(h, h, h),
        Vertex::from_coords(-h, h, h),
    ];
    let indices = vec![
        0, 2, 1, 0, 3, 2, // -z
        4, 5, 6, 4, 6, 7, // +z
        0, 1, 5, 0, 5, 4, // -y
        2, 3, 7, 2, 7, 6, // +y
        1, 2, 6, 1, 6, 5, // +x
        3, 0, 4, 3, 4, 7, // -x
    ];
    #[allow(clippy::unwrap_used)]
    TriangleMesh::new(vertices, indices).unwrap()
}

/// A flat grid of `quads_x` by `quads_y` unit quads in the XY plane,
/// triangulated into `2 * quads_x * quads_y` triangles.
///
/// # Example
///
/// ```
/// use meshlet_types::grid_mesh;
///
/// let grid = grid_mesh(3, 3);
/// assert_eq!(grid.triangle_count(), 18);
/// ```
#[must_use]
pub fn grid_mesh(quads_x: u32, quads_y: u32) -> TriangleMesh {
    let mut vertices = Vec::with_capacity(((quads_x + 1) * (quads_y + 1)) as usize);
    for y in 0..=quads_y {
        for x in 0..=quads_x {
            #[allow(clippy::cast_precision_loss)]
            vertices.push(Vertex::from_coords(x as f32, y as f32, 0.0));
        }
    }

    let stride = quads_x + 1;
    let mut indices = Vec::with_capacity((quads_x * quads_y * 6) as usize);
    for y in 0..quads_y {
        for x in 0..quads_x {
            let v0 = y * stride + x;
            let v1 = v0 + 1;
            let v2 = v0 + stride;
            let v3 = v2 + 1;
            indices.extend_from_slice(&[v0, v1, v2, v2, v1, v3]);
        }
    }
    #[allow(clippy::unwrap_used)]
    TriangleMesh::new(vertices, indices).unwrap()
}

/// A unit icosphere: an icosahedron (20 triangles) subdivided `subdivisions`
/// times, with every vertex normalized onto the unit sphere.
///
/// Triangle count is `20 * 4^subdivisions`.
///
/// # Example
///
/// ```
/// use meshlet_types::icosphere;
///
/// assert_eq!(icosphere(0).triangle_count(), 20);
/// assert_eq!(icosphere(2).triangle_count(), 320);
/// ```
#[must_use]
pub fn icosphere(subdivisions: u32) -> TriangleMesh {
    let phi = f32::midpoint(1.0, 5.0_f32.sqrt());
    let a = 1.0;
    let b = 1.0 / phi;

    let mut vertices: Vec<Vertex> = [
        [0.0, b, -a],
        [b, a, 0.0],
        [-b, a, 0.0],
        [0.0, b, a],
        [0.0, -b, a],
        [-a, 0.0, b],
        [0.0, -b, -a],
        [a, 0.0, -b],
        [a, 0.0, b],
        [-a, 0.0, -b],
        [b, -a, 0.0],
        [-b, -a, 0.0],
    ]
    .iter()
    .map(|v| {
        let len = v[2].mul_add(v[2], v[0].mul_add(v[0], v[1] * v[1])).sqrt();
        Vertex::from_coords(v[0] / len, v[1] / len, v[2] / len)
    })
    .collect();

    // CCW when viewed from outside the sphere.
    let mut faces: Vec<[u32; 3]> = vec![
        [0, 2, 1],
        [3, 1, 2],
        [3, 5, 4],
        [3, 4, 8],
        [0, 7, 6],
        [0, 6, 9],
        [4, 11, 10],
        [6, 10, 11],
        [2, 9, 5],
        [11, 5, 9],
        [1, 8, 7],
        [10, 7, 8],
        [3, 2, 5],
        [3, 8, 1],
        [0, 9, 2],
        [0, 1, 7],
        [6, 11, 9],
        [6, 7, 10],
        [4, 5, 11],
        [4, 10, 8],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next = Vec::with_capacity(faces.len() * 4);

        let mut midpoint = |a: u32, b: u32, vertices: &mut Vec<Vertex>| -> u32 {
            let key = if a < b { (a, b) } else { (b, a) };
            *midpoints.entry(key).or_insert_with(|| {
                let pa = vertices[a as usize].position;
                let pb = vertices[b as usize].position;
                let mid = nalgebra::center(&pa, &pb);
                let len = mid.coords.norm();
                #[allow(clippy::cast_possible_truncation)]
                let index = vertices.len() as u32;
                vertices.push(Vertex::new(mid / len));
                index
            })
        };

        for &[v0, v1, v2] in &faces {
            let m01 = midpoint(v0, v1, &mut vertices);
            let m12 = midpoint(v1, v2, &mut vertices);
            let m20 = midpoint(v2, v0, &mut vertices);
            next.push([v0, m01, m20]);
            next.push([v1, m12, m01]);
            next.push([v2, m20, m12]);
            next.push([m01, m12, m20]);
        }
        faces = next;
    }

    let indices = faces.iter().flatten().copied().collect();
    #[allow(clippy::unwrap_used)]
    TriangleMesh::new(vertices, indices).unwrap()
}
