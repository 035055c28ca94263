//! Wavefront OBJ export for previewing generated meshes

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::types::UnpackedMesh;

/// Write an unpacked mesh as an OBJ file with positions, normals and faces
pub fn write_obj(mesh: &UnpackedMesh, path: &Path, name: &str) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj_to(mesh, &mut writer, name)?;
    writer.flush()
}

/// Write OBJ text to any writer
pub fn write_obj_to<W: Write>(mesh: &UnpackedMesh, writer: &mut W, name: &str) -> io::Result<()> {
    writeln!(writer, "# octasphere mesh")?;
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        mesh.positions.len(),
        mesh.indices.len() / 3
    )?;
    writeln!(writer, "o {}", name)?;

    for [x, y, z] in &mesh.positions {
        writeln!(writer, "v {:.6} {:.6} {:.6}", x, y, z)?;
    }
    for [x, y, z] in &mesh.normals {
        writeln!(writer, "vn {:.6} {:.6} {:.6}", x, y, z)?;
    }

    // OBJ indices are 1-based; normals share the vertex index
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as u32 + 1, tri[1] as u32 + 1, tri[2] as u32 + 1);
        writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }

    Ok(())
}
