//! Buffer export: raw `.bin` buffers, JSON sidecar and optional OBJ preview

use anyhow::{Context, Result, bail};
use octasphere::{
    OctasphereError, OctasphereMesh, OctasphereMeshCompact, OctasphereParams, ShapeKind,
    UnpackedMesh, generate_octasphere, write_obj,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Vertex buffer layout to export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BufferLayout {
    /// f32x3 positions, f32x4 tangent quaternions
    #[default]
    F32,
    /// f16x4 positions, snorm16x4 tangent quaternions
    Compact,
}

/// Layout-independent view of a generated mesh
pub struct GeneratedBuffers {
    pub num_vertices: u32,
    pub num_indices: u32,
    pub positions: Vec<u8>,
    pub tangents: Vec<u8>,
    pub triangles: Vec<u8>,
}

impl From<OctasphereMesh> for GeneratedBuffers {
    fn from(mesh: OctasphereMesh) -> Self {
        Self {
            num_vertices: mesh.num_vertices,
            num_indices: mesh.num_indices,
            positions: mesh.positions,
            tangents: mesh.tangents,
            triangles: mesh.triangles,
        }
    }
}

impl From<OctasphereMeshCompact> for GeneratedBuffers {
    fn from(mesh: OctasphereMeshCompact) -> Self {
        Self {
            num_vertices: mesh.num_vertices,
            num_indices: mesh.num_indices,
            positions: mesh.positions,
            tangents: mesh.tangents,
            triangles: mesh.triangles,
        }
    }
}

impl GeneratedBuffers {
    /// Generate a mesh in the requested layout
    pub fn generate(params: &OctasphereParams, layout: BufferLayout) -> Result<Self, OctasphereError> {
        Ok(match layout {
            BufferLayout::F32 => generate_octasphere::<OctasphereMesh>(params)?.into(),
            BufferLayout::Compact => generate_octasphere::<OctasphereMeshCompact>(params)?.into(),
        })
    }
}

/// Metadata written next to the raw buffers (`<name>.mesh.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshSidecar {
    pub name: String,
    pub kind: ShapeKind,
    pub layout: BufferLayout,
    pub dimensions: [f32; 3],
    pub radius: f32,
    pub subdivisions: u32,
    pub num_vertices: u32,
    pub num_indices: u32,
    pub positions_bytes: usize,
    pub tangents_bytes: usize,
    pub triangles_bytes: usize,
    /// Byte order of the host that wrote the buffers ("little" or "big")
    pub byte_order: String,
}

fn host_byte_order() -> &'static str {
    if cfg!(target_endian = "little") {
        "little"
    } else {
        "big"
    }
}

/// Check that `name` is usable as a file stem inside the output directory
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        bail!("Invalid shape name: {:?}", name);
    }
    Ok(())
}

/// Generate one shape and write its buffers into `dir`
///
/// Writes `<name>.positions.bin`, `<name>.tangents.bin`, `<name>.triangles.bin`
/// and `<name>.mesh.json`, plus `<name>.obj` when `obj` is set. Every mesh is
/// generated before the first write; the sidecar is written last.
pub fn write_shape(
    dir: &Path,
    name: &str,
    params: &OctasphereParams,
    layout: BufferLayout,
    obj: bool,
) -> Result<MeshSidecar> {
    validate_name(name)?;
    let kind = params
        .kind()
        .with_context(|| format!("Invalid shape '{}'", name))?;
    let buffers = GeneratedBuffers::generate(params, layout)
        .with_context(|| format!("Failed to generate shape '{}'", name))?;
    let preview = if obj {
        let mesh: UnpackedMesh = generate_octasphere(params)
            .with_context(|| format!("Failed to generate shape '{}'", name))?;
        Some(mesh)
    } else {
        None
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;

    let file = |suffix: &str| dir.join(format!("{}.{}", name, suffix));

    if let Some(mesh) = &preview {
        let obj_path = file("obj");
        write_obj(mesh, &obj_path, name)
            .with_context(|| format!("Failed to write OBJ: {:?}", obj_path))?;
    }

    for (suffix, data) in [
        ("positions.bin", &buffers.positions),
        ("tangents.bin", &buffers.tangents),
        ("triangles.bin", &buffers.triangles),
    ] {
        let path = file(suffix);
        fs::write(&path, data).with_context(|| format!("Failed to write {:?}", path))?;
    }

    let sidecar = MeshSidecar {
        name: name.to_string(),
        kind,
        layout,
        dimensions: params.dimensions.to_array(),
        radius: params.radius,
        subdivisions: params.subdivisions,
        num_vertices: buffers.num_vertices,
        num_indices: buffers.num_indices,
        positions_bytes: buffers.positions.len(),
        tangents_bytes: buffers.tangents.len(),
        triangles_bytes: buffers.triangles.len(),
        byte_order: host_byte_order().to_string(),
    };

    let sidecar_path = file("mesh.json");
    let json = serde_json::to_string_pretty(&sidecar)?;
    fs::write(&sidecar_path, json)
        .with_context(|| format!("Failed to write {:?}", sidecar_path))?;

    tracing::info!(
        "{}: {:?} ({} verts, {} indices, {:?})",
        name,
        kind,
        sidecar.num_vertices,
        sidecar.num_indices,
        layout
    );

    Ok(sidecar)
}
