//! CPU-side geometry builders consumed by the renderer as plain vertex and
//! index buffers.

use fnv::FnvHashMap;
use glam::Vec3;

use crate::geo;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed geometry; whether `indices` form triangles or line segments is up
/// to the builder that produced it.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Latitude/longitude sphere with equirectangular UVs, triangle list.
///
/// Grid points are placed with the same projection used for city markers, so
/// the texture seam and marker longitudes agree by construction.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Mesh {
    let mut mesh = Mesh::default();
    for row in 0..=rings {
        let v = row as f32 / rings as f32;
        let lat = 90.0 - 180.0 * v;
        for col in 0..=segments {
            let u = col as f32 / segments as f32;
            let lng = -180.0 + 360.0 * u;
            let position = geo::project(lat, lng, radius);
            mesh.vertices.push(Vertex {
                position: position.into(),
                normal: (position / radius.max(1e-6)).into(),
                uv: [u, v],
            });
        }
    }
    let stride = segments + 1;
    for row in 0..rings {
        for col in 0..segments {
            let a = row * stride + col;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    mesh
}

/// Latitude/longitude sphere wireframe, line list.
pub fn uv_sphere_lines(radius: f32, segments: u32, rings: u32) -> Mesh {
    let mut mesh = uv_sphere(radius, segments, rings);
    mesh.indices.clear();
    let stride = segments + 1;
    for row in 0..=rings {
        for col in 0..=segments {
            let a = row * stride + col;
            if col < segments {
                mesh.indices.extend_from_slice(&[a, a + 1]);
            }
            if row < rings {
                mesh.indices.extend_from_slice(&[a, a + stride]);
            }
        }
    }
    mesh
}

/// Subdivided icosahedron edge wireframe, line list.
pub fn icosahedron_lines(radius: f32, detail: u32) -> Mesh {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut positions: Vec<Vec3> = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .iter()
    .map(|p| Vec3::from_slice(p).normalize())
    .collect();
    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for _ in 0..detail {
        let mut midpoints: FnvHashMap<(u32, u32), u32> = FnvHashMap::default();
        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(&mut positions, &mut midpoints, a, b);
            let bc = midpoint(&mut positions, &mut midpoints, b, c);
            let ca = midpoint(&mut positions, &mut midpoints, c, a);
            next.extend_from_slice(&[[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }
        faces = next;
    }

    let mut mesh = Mesh::default();
    for p in &positions {
        let scaled = *p * radius;
        mesh.vertices.push(Vertex {
            position: scaled.into(),
            normal: (*p).into(),
            uv: [0.0, 0.0],
        });
    }
    let mut seen: FnvHashMap<(u32, u32), ()> = FnvHashMap::default();
    for [a, b, c] in faces {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            let key = (u.min(v), u.max(v));
            if seen.insert(key, ()).is_none() {
                mesh.indices.extend_from_slice(&[key.0, key.1]);
            }
        }
    }
    mesh
}

fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut FnvHashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = (a.min(b), a.max(b));
    if let Some(&idx) = cache.get(&key) {
        return idx;
    }
    let mid = ((positions[a as usize] + positions[b as usize]) * 0.5).normalize();
    let idx = positions.len() as u32;
    positions.push(mid);
    cache.insert(key, idx);
    idx
}

/// Append a thin cylinder spanning `from`..`to` into `mesh`, triangle list.
pub fn append_cylinder(mesh: &mut Mesh, from: Vec3, to: Vec3, radius: f32, segments: u32) {
    let axis = to - from;
    let len = axis.length();
    if len <= 1e-8 {
        return;
    }
    let dir = axis / len;
    // Any stable basis perpendicular to the axis
    let helper = if dir.y.abs() < 0.9 { Vec3::Y } else { Vec3::X };
    let side = dir.cross(helper).normalize();
    let up = dir.cross(side);

    let base = mesh.vertices.len() as u32;
    for seg in 0..=segments {
        let angle = seg as f32 / segments as f32 * std::f32::consts::TAU;
        let offset = (side * angle.cos() + up * angle.sin()) * radius;
        for end in [from, to] {
            mesh.vertices.push(Vertex {
                position: (end + offset).into(),
                normal: offset.normalize_or_zero().into(),
                uv: [0.0, 0.0],
            });
        }
    }
    for seg in 0..segments {
        let a = base + seg * 2;
        let b = a + 1;
        let c = a + 2;
        let d = a + 3;
        mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
    }
}
