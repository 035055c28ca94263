//! octa-gen library
//!
//! Manifest parsing and buffer export shared by the `octa-gen` binary and tests.

pub mod manifest;
pub mod output;

pub use manifest::{OctaManifest, OutputSection, ShapeEntry};
pub use output::{BufferLayout, GeneratedBuffers, MeshSidecar, validate_name, write_shape};
