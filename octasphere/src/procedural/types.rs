//! Procedural mesh types
//!
//! Builders the octasphere generator writes into.

use bytemuck::{cast_slice, pod_collect_to_vec};
use glam::Vec3;

use crate::packing::{
    POSITION_STRIDE, POSITION_STRIDE_COMPACT, TANGENT_STRIDE, TANGENT_STRIDE_COMPACT,
    TRIANGLE_STRIDE, pack_position_f16, pack_position_f32, pack_tangent_quat_f32,
    pack_tangent_quat_snorm16, pack_triangle_u16, tangent_frame_quat,
};

/// Trait for mesh construction - enables generic geometry generation
///
/// This trait allows the generator to work with:
/// - `OctasphereMesh`: raw f32 buffers for upload
/// - `OctasphereMeshCompact`: f16 / snorm16 buffers for upload
/// - `UnpackedMesh`: plain arrays for OBJ export and inspection
pub trait MeshBuilder: Default {
    /// Pre-size storage for the final vertex and triangle counts
    fn reserve(&mut self, _vertices: usize, _triangles: usize) {}

    /// Add a vertex with position and unit normal, returning its index
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u16;

    /// Add a triangle using three vertex indices
    fn add_triangle(&mut self, i0: u16, i1: u16, i2: u16);

    /// Number of vertices added so far
    fn vertex_count(&self) -> usize;

    /// Number of triangles added so far
    fn triangle_count(&self) -> usize;
}

/// Generated octasphere (f32 layout)
///
/// Positions are Float32x3, tangents are Float32x4 quaternions and triangles are
/// Uint16x3, all in host byte order so the buffers can be handed to a renderer as-is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OctasphereMesh {
    pub num_vertices: u32,
    /// Three per triangle
    pub num_indices: u32,
    pub positions: Vec<u8>,
    pub tangents: Vec<u8>,
    pub triangles: Vec<u8>,
}

impl OctasphereMesh {
    /// Decode the position buffer
    pub fn position_data(&self) -> Vec<[f32; 3]> {
        pod_collect_to_vec(self.positions.as_slice())
    }

    /// Decode the tangent buffer as `[x, y, z, w]` quaternions
    pub fn tangent_data(&self) -> Vec<[f32; 4]> {
        pod_collect_to_vec(self.tangents.as_slice())
    }

    /// Decode the triangle buffer
    pub fn triangle_data(&self) -> Vec<[u16; 3]> {
        pod_collect_to_vec(self.triangles.as_slice())
    }
}

impl MeshBuilder for OctasphereMesh {
    fn reserve(&mut self, vertices: usize, triangles: usize) {
        self.positions.reserve_exact(vertices * POSITION_STRIDE);
        self.tangents.reserve_exact(vertices * TANGENT_STRIDE);
        self.triangles.reserve_exact(triangles * TRIANGLE_STRIDE);
    }

    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u16 {
        let index = self.num_vertices as u16;

        let pos_packed = pack_position_f32(position);
        self.positions.extend_from_slice(cast_slice(&pos_packed)); // [f32; 3] → &[u8]

        let tangent_packed = pack_tangent_quat_f32(tangent_frame_quat(normal));
        self.tangents.extend_from_slice(cast_slice(&tangent_packed)); // [f32; 4] → &[u8]

        self.num_vertices += 1;
        index
    }

    fn add_triangle(&mut self, i0: u16, i1: u16, i2: u16) {
        let tri = pack_triangle_u16(i0, i1, i2);
        self.triangles.extend_from_slice(cast_slice(&tri)); // [u16; 3] → &[u8]
        self.num_indices += 3;
    }

    fn vertex_count(&self) -> usize {
        self.num_vertices as usize
    }

    fn triangle_count(&self) -> usize {
        self.num_indices as usize / 3
    }
}

/// Generated octasphere (compact layout)
///
/// Positions are Float16x4 (w = 1.0), tangents are Snorm16x4 quaternions and
/// triangles are Uint16x3.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OctasphereMeshCompact {
    pub num_vertices: u32,
    pub num_indices: u32,
    pub positions: Vec<u8>,
    pub tangents: Vec<u8>,
    pub triangles: Vec<u8>,
}

impl MeshBuilder for OctasphereMeshCompact {
    fn reserve(&mut self, vertices: usize, triangles: usize) {
        self.positions.reserve_exact(vertices * POSITION_STRIDE_COMPACT);
        self.tangents.reserve_exact(vertices * TANGENT_STRIDE_COMPACT);
        self.triangles.reserve_exact(triangles * TRIANGLE_STRIDE);
    }

    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u16 {
        let index = self.num_vertices as u16;

        let pos_packed = pack_position_f16(position.x, position.y, position.z);
        self.positions.extend_from_slice(cast_slice(&pos_packed)); // [f16; 4] → &[u8]

        let tangent_packed = pack_tangent_quat_snorm16(tangent_frame_quat(normal));
        self.tangents.extend_from_slice(cast_slice(&tangent_packed)); // [i16; 4] → &[u8]

        self.num_vertices += 1;
        index
    }

    fn add_triangle(&mut self, i0: u16, i1: u16, i2: u16) {
        let tri = pack_triangle_u16(i0, i1, i2);
        self.triangles.extend_from_slice(cast_slice(&tri));
        self.num_indices += 3;
    }

    fn vertex_count(&self) -> usize {
        self.num_vertices as usize
    }

    fn triangle_count(&self) -> usize {
        self.num_indices as usize / 3
    }
}

/// Unpacked mesh data (f32 format) for export and inspection
///
/// Unlike the packed meshes this keeps the normals alongside the tangent
/// quaternions, which OBJ export and geometry checks need.
#[derive(Clone, Debug, Default)]
pub struct UnpackedMesh {
    /// Vertex positions as [x, y, z]
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals as [x, y, z]
    pub normals: Vec<[f32; 3]>,
    /// Tangent frames as [x, y, z, w] quaternions
    pub tangents: Vec<[f32; 4]>,
    /// Triangle indices (u16 for GPU compatibility)
    pub indices: Vec<u16>,
}

impl UnpackedMesh {
    /// Create empty unpacked mesh
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeshBuilder for UnpackedMesh {
    fn reserve(&mut self, vertices: usize, triangles: usize) {
        self.positions.reserve_exact(vertices);
        self.normals.reserve_exact(vertices);
        self.tangents.reserve_exact(vertices);
        self.indices.reserve_exact(triangles * 3);
    }

    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u16 {
        let index = self.positions.len() as u16;
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        self.tangents.push(tangent_frame_quat(normal).to_array());
        index
    }

    fn add_triangle(&mut self, i0: u16, i1: u16, i2: u16) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
