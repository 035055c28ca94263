//! octa-gen - Octasphere mesh generator
//!
//! Writes spheres, capsules, cuboids and rounded cuboids as raw GPU buffers
//! (positions, tangent quaternions, u16 triangles) with a JSON sidecar.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec3;
use octasphere::OctasphereParams;
use std::path::{Path, PathBuf};

use octa_gen::{BufferLayout, manifest, write_shape};

#[derive(Parser)]
#[command(name = "octa-gen")]
#[command(about = "Octasphere mesh generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single shape
    Shape {
        /// Bounding box as x,y,z (components below 2 * radius are raised to it)
        #[arg(short, long, value_parser = parse_dimensions, default_value = "0,0,0")]
        dimensions: [f32; 3],

        /// Corner radius
        #[arg(short, long, default_value_t = 1.0)]
        radius: f32,

        /// Subdivision level (0-6)
        #[arg(short, long, default_value_t = 3)]
        subdivisions: u32,

        /// Output file name stem
        #[arg(short, long, default_value = "octasphere")]
        name: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Buffer layout
        #[arg(long, value_enum, default_value_t = BufferLayout::F32)]
        layout: BufferLayout,

        /// Also write an OBJ preview
        #[arg(long)]
        obj: bool,
    },

    /// Generate every shape in a manifest file
    Build {
        /// Path to octa-gen.toml manifest
        #[arg(default_value = "octa-gen.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without generating
    Check {
        /// Path to octa-gen.toml manifest
        #[arg(default_value = "octa-gen.toml")]
        manifest: PathBuf,
    },
}

fn parse_dimensions(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got {:?}", s));
    }

    let mut dims = [0.0; 3];
    for (dim, part) in dims.iter_mut().zip(parts) {
        *dim = part
            .parse()
            .map_err(|e| format!("invalid component {:?}: {}", part, e))?;
    }
    Ok(dims)
}

fn manifest_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new("."))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Shape {
            dimensions,
            radius,
            subdivisions,
            name,
            output,
            layout,
            obj,
        } => {
            let params = OctasphereParams::new(Vec3::from(dimensions), radius, subdivisions);
            write_shape(&output, &name, &params, layout, obj)?;
            tracing::info!("Done!");
        }

        Commands::Build { manifest, output } => {
            tracing::info!("Building shapes from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let sidecars =
                manifest::build_all(&config, manifest_dir(&manifest), output.as_deref())
                    .context("Build failed")?;
            tracing::info!("Build complete! ({} shapes)", sidecars.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }
    }

    Ok(())
}
