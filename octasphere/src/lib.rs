//! Procedural octasphere meshes
//!
//! One generator covers four shapes, selected purely by its parameters:
//! - Sphere: non-zero radius, dimensions `(0, 0, 0)`
//! - Capsule: non-zero radius, two dimension components zero
//! - Cuboid: zero radius, non-zero dimensions
//! - Rounded cuboid: non-zero radius and non-zero dimensions
//!
//! Output is three raw buffers ready for a renderer's mesh upload path:
//! positions (`f32x3`), tangent-frame quaternions (`f32x4`) and triangles
//! (`u16x3`), all in host byte order.
//!
//! # Modules
//!
//! - [`params`] - Shape request, validation and classification
//! - [`procedural`] - Octasphere tessellation and mesh builders
//! - [`packing`] - Vertex data packing utilities (f32 / f16 / snorm16)
//! - [`error`] - Error type for rejected requests
//!
//! # Example
//! ```
//! use glam::Vec3;
//!
//! let mesh = octasphere::octasphere(Vec3::new(2.0, 1.0, 1.0), 0.25, 3)?;
//! assert_eq!(mesh.positions.len(), mesh.num_vertices as usize * 12);
//! assert_eq!(mesh.triangles.len(), mesh.num_indices as usize * 2);
//! # Ok::<(), octasphere::OctasphereError>(())
//! ```

pub mod error;
pub mod packing;
pub mod params;
pub mod procedural;

pub use error::OctasphereError;
pub use params::{MAX_SUBDIVISIONS, MeshCounts, OctasphereParams, ShapeKind};
pub use procedural::{
    MeshBuilder, OctasphereMesh, OctasphereMeshCompact, UnpackedMesh, generate_octasphere,
    write_obj, write_obj_to,
};

// Re-export commonly used packing items
pub use packing::{
    POSITION_STRIDE, POSITION_STRIDE_COMPACT, TANGENT_STRIDE, TANGENT_STRIDE_COMPACT,
    TRIANGLE_STRIDE, tangent_frame_quat,
};

use glam::Vec3;

/// Generate an octasphere mesh in the `f32` buffer layout.
///
/// Shorthand for [`generate_octasphere`] with [`OctasphereMesh`] as the builder.
pub fn octasphere(
    dimensions: Vec3,
    radius: f32,
    subdivisions: u32,
) -> Result<OctasphereMesh, OctasphereError> {
    generate_octasphere(&OctasphereParams::new(dimensions, radius, subdivisions))
}
