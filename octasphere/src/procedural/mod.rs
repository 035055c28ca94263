//! Procedural mesh generation
//!
//! Generates octasphere meshes into any [`MeshBuilder`]:
//! - [`OctasphereMesh`]: f32x3 positions, f32x4 tangent quaternions, u16x3 triangles
//! - [`OctasphereMeshCompact`]: f16x4 positions, snorm16x4 tangent quaternions
//! - [`UnpackedMesh`]: plain f32 arrays for export and inspection

mod export;
mod octasphere;
mod types;

#[cfg(test)]
mod tests;

pub use types::{MeshBuilder, OctasphereMesh, OctasphereMeshCompact, UnpackedMesh};

// Re-export OBJ export
pub use export::{write_obj, write_obj_to};

pub use octasphere::generate_octasphere;
