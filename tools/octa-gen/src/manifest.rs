//! octa-gen.toml manifest parsing
//!
//! A manifest lists shapes to generate in one batch:
//!
//! ```toml
//! [output]
//! dir = "meshes"
//! layout = "compact"
//! obj = true
//!
//! [[shapes]]
//! id = "ball"
//! radius = 1.0
//! subdivisions = 3
//!
//! [[shapes]]
//! id = "crate"
//! dimensions = [1.0, 1.0, 1.0]
//! radius = 0.1
//! subdivisions = 2
//! obj = false
//! ```

use anyhow::{Context, Result, bail};
use glam::Vec3;
use octasphere::OctasphereParams;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::output::{BufferLayout, MeshSidecar, validate_name, write_shape};

/// octa-gen.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct OctaManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub shapes: Vec<ShapeEntry>,
}

/// Output configuration section
#[derive(Debug, Deserialize)]
pub struct OutputSection {
    /// Output directory, relative to the manifest file.
    /// Default: "meshes"
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Buffer layout for every shape unless overridden.
    /// Default: f32
    #[serde(default)]
    pub layout: BufferLayout,

    /// Also write an OBJ preview for every shape unless overridden.
    /// Default: false
    #[serde(default)]
    pub obj: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("meshes")
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            layout: BufferLayout::default(),
            obj: false,
        }
    }
}

/// Single shape entry
#[derive(Debug, Deserialize)]
pub struct ShapeEntry {
    /// File name stem for the generated buffers
    pub id: String,

    /// Full bounding box; zero components collapse to 2 * radius
    #[serde(default)]
    pub dimensions: [f32; 3],

    #[serde(default)]
    pub radius: f32,

    #[serde(default)]
    pub subdivisions: u32,

    /// Per-shape override of `output.layout`
    #[serde(default)]
    pub layout: Option<BufferLayout>,

    /// Per-shape override of `output.obj`
    #[serde(default)]
    pub obj: Option<bool>,
}

impl ShapeEntry {
    pub fn params(&self) -> OctasphereParams {
        OctasphereParams::new(Vec3::from(self.dimensions), self.radius, self.subdivisions)
    }
}

/// Parse manifest text
pub fn parse_manifest(text: &str) -> Result<OctaManifest> {
    toml::from_str(text).context("Failed to parse manifest")
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<OctaManifest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    parse_manifest(&text).with_context(|| format!("Invalid manifest: {:?}", path))
}

/// Check ids and shape parameters without generating anything
pub fn validate(manifest: &OctaManifest) -> Result<()> {
    if manifest.shapes.is_empty() {
        bail!("Manifest declares no shapes");
    }

    let mut seen = HashSet::new();
    for shape in &manifest.shapes {
        validate_name(&shape.id).context("Invalid shape id")?;
        if !seen.insert(shape.id.as_str()) {
            bail!("Duplicate shape id: {:?}", shape.id);
        }
        shape
            .params()
            .validate()
            .with_context(|| format!("Invalid shape '{}'", shape.id))?;
    }

    Ok(())
}

/// Generate every shape in the manifest
///
/// `base_dir` is the directory relative output paths resolve against (normally
/// the manifest's directory); `output_override` replaces `output.dir` entirely.
pub fn build_all(
    manifest: &OctaManifest,
    base_dir: &Path,
    output_override: Option<&Path>,
) -> Result<Vec<MeshSidecar>> {
    validate(manifest)?;

    let out_dir = match output_override {
        Some(dir) => dir.to_path_buf(),
        None => base_dir.join(&manifest.output.dir),
    };

    manifest
        .shapes
        .iter()
        .map(|shape| {
            write_shape(
                &out_dir,
                &shape.id,
                &shape.params(),
                shape.layout.unwrap_or(manifest.output.layout),
                shape.obj.unwrap_or(manifest.output.obj),
            )
        })
        .collect()
}
