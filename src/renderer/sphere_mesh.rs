//! UV-sphere geometry shared by every orb.

use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};

/// Longitude segments of the shared orb mesh.
pub const SPHERE_SEGMENTS: u32 = 96;
/// Latitude rings of the shared orb mesh.
pub const SPHERE_RINGS: u32 = 64;

/// Vertex of the orb mesh; matches `VertexInput` in `orbis::orb_common`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct OrbVertex {
    /// Position on the unit sphere.
    pub position: [f32; 3],
    /// Outward normal (equal to the position).
    pub normal: [f32; 3],
    /// Texture coordinate, u around, v pole to pole.
    pub uv: [f32; 2],
}

impl OrbVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    /// Vertex buffer layout for locations 0..=2.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct SphereMesh {
    /// Vertices.
    pub vertices: Vec<OrbVertex>,
    /// Counter-clockwise triangles.
    pub indices: Vec<u32>,
}

/// Unit UV sphere with `segments` around and `rings` pole to pole.
///
/// The seam column is duplicated so `uv.x` runs 0 → 1 without wrapping.
pub fn uv_sphere(segments: u32, rings: u32) -> SphereMesh {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let theta = v * PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let (sin_p, cos_p) = (u * TAU).sin_cos();
            let p = [sin_t * cos_p, cos_t, sin_t * sin_p];
            vertices.push(OrbVertex {
                position: p,
                normal: p,
                uv: [u, v],
            });
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    SphereMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn counts() {
        let mesh = uv_sphere(8, 4);
        assert_eq!(mesh.vertices.len(), 9 * 5);
        assert_eq!(mesh.indices.len(), 8 * 4 * 6);
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn vertices_lie_on_unit_sphere() {
        let mesh = uv_sphere(12, 6);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert_eq!(v.position, v.normal);
        }
    }

    #[test]
    fn triangles_face_outward() {
        let mesh = uv_sphere(16, 8);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
            let n = (b - a).cross(c - a);
            if n.length_squared() < 1e-12 {
                continue; // collapsed at a pole
            }
            assert!(n.dot(a + b + c) > 0.0);
        }
    }

    #[test]
    fn degenerate_resolution_is_clamped() {
        let mesh = uv_sphere(0, 0);
        assert_eq!(mesh.vertices.len(), 4 * 3);
    }

    #[test]
    fn vertex_is_32_bytes() {
        assert_eq!(size_of::<OrbVertex>(), 32);
    }
}
