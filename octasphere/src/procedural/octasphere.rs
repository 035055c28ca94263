//! Octasphere tessellation
//!
//! One octant patch of a subdivided octahedron is projected onto the unit sphere,
//! then mirrored into all eight octants around an inner box. Quad strips bridge
//! the patches along the box edges and flat quads cover the box faces. Spheres,
//! capsules and cuboids fall out of the same construction when parts of the box
//! or the radius are zero.

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;
use tracing::debug;

use super::types::MeshBuilder;
use crate::error::OctasphereError;
use crate::params::{Layout, OctasphereParams};

/// Generate an octasphere into any mesh builder
///
/// # Arguments
/// * `params` - Bounding box, corner radius and subdivision level
///
/// # Returns
/// Mesh with exactly `params.counts()` vertices and triangles, CCW winding
/// when viewed from outside.
///
/// # Errors
/// Rejects non-finite or negative inputs, subdivisions above
/// [`MAX_SUBDIVISIONS`](crate::MAX_SUBDIVISIONS), and requests with no area.
pub fn generate_octasphere<M: MeshBuilder>(params: &OctasphereParams) -> Result<M, OctasphereError> {
    let layout = params.layout()?;
    let kind = layout.kind()?;
    let counts = layout.counts();

    let patch = Patch::new(layout.segments);
    let mut mesh = M::default();
    mesh.reserve(counts.vertices, counts.triangles);

    // Vertices: the same patch placed in every octant
    for octant in 0..8 {
        let sign = octant_sign(octant);
        for &point in &patch.points {
            mesh.add_vertex(
                sign * (point * layout.radius + layout.half_extent),
                sign * point,
            );
        }
    }

    if layout.has_radius() {
        add_patches(&mut mesh, &patch);
        add_connectors(&mut mesh, &patch, &layout);
    }
    add_faces(&mut mesh, &patch, &layout);

    debug!(
        "octasphere: {:?} ({} verts, {} triangles, {} segments per edge)",
        kind,
        mesh.vertex_count(),
        mesh.triangle_count(),
        layout.segments
    );

    Ok(mesh)
}

/// Sign vector of an octant; bit 0/1/2 set means negative X/Y/Z
fn octant_sign(octant: usize) -> Vec3 {
    let axis_sign = |axis: usize| {
        if octant & (1 << axis) != 0 { -1.0 } else { 1.0 }
    };
    Vec3::new(axis_sign(0), axis_sign(1), axis_sign(2))
}

/// Mirroring through an odd number of planes flips triangle winding
fn is_mirrored(octant: usize) -> bool {
    (octant as u32).count_ones() % 2 == 1
}

fn push_triangle<M: MeshBuilder>(mesh: &mut M, [a, b, c]: [usize; 3], flip: bool) {
    let (a, b, c) = (a as u16, b as u16, c as u16);
    if flip {
        mesh.add_triangle(a, c, b);
    } else {
        mesh.add_triangle(a, b, c);
    }
}

/// Geodesic triangle covering the positive octant of the unit sphere
///
/// Row `i` runs from `(0, sin θ, cos θ)` to `(cos θ, sin θ, 0)` with
/// `θ = π/2 · i / segments` and holds `segments + 1 - i` points, so row 0 is the
/// Z→X arc on the equator and the last row is the +Y pole alone.
struct Patch {
    points: Vec<Vec3>,
    segments: usize,
}

impl Patch {
    fn new(segments: usize) -> Self {
        let n = segments + 1;
        let mut points = Vec::with_capacity(n * (n + 1) / 2);

        for row in 0..n {
            if row == segments {
                points.push(Vec3::Y);
                break;
            }
            let theta = FRAC_PI_2 * row as f32 / segments as f32;
            let (sin, cos) = theta.sin_cos();
            let a = Vec3::new(0.0, sin, cos);
            let b = Vec3::new(cos, sin, 0.0);
            push_geodesic(&mut points, a, b, segments - row);
        }

        Self { points, segments }
    }

    /// Index of column `col` in row `row`
    fn index(&self, row: usize, col: usize) -> usize {
        let n = self.segments + 1;
        row * (2 * n + 1 - row) / 2 + col
    }

    /// Patch triangles, CCW from outside in the positive octant
    fn triangles(&self) -> Vec<[usize; 3]> {
        let segments = self.segments;
        let mut triangles = Vec::with_capacity(segments * segments);

        for row in 0..segments {
            let row_len = segments - row;
            for col in 0..row_len {
                let a = self.index(row, col);
                let b = self.index(row, col + 1);
                let c = self.index(row + 1, col);
                triangles.push([a, b, c]);

                if col + 1 < row_len {
                    let d = self.index(row + 1, col + 1);
                    triangles.push([b, d, c]);
                }
            }
        }

        triangles
    }

    /// Index of the point on the positive end of `axis`
    fn pole(&self, axis: usize) -> usize {
        match axis {
            0 => self.index(0, self.segments),
            1 => self.index(self.segments, 0),
            _ => self.index(0, 0),
        }
    }

    /// Boundary arc lying in the plane where `axis` is zero
    ///
    /// X: Z→Y, Y: Z→X, Z: X→Y.
    fn arc(&self, axis: usize) -> Vec<usize> {
        let steps = 0..=self.segments;
        match axis {
            0 => steps.map(|i| self.index(i, 0)).collect(),
            1 => steps.map(|j| self.index(0, j)).collect(),
            _ => steps.map(|i| self.index(i, self.segments - i)).collect(),
        }
    }
}

/// Append `segments + 1` points along the great arc from `a` to `b`
fn push_geodesic(points: &mut Vec<Vec3>, a: Vec3, b: Vec3, segments: usize) {
    let angle = a.dot(b).clamp(-1.0, 1.0).acos();
    let sin_angle = angle.sin();

    for i in 0..=segments {
        let point = if i == 0 {
            a
        } else if i == segments {
            b
        } else {
            let t = i as f32 / segments as f32;
            if sin_angle < 1e-6 {
                a.lerp(b, t)
            } else {
                (a * ((1.0 - t) * angle).sin() + b * (t * angle).sin()) / sin_angle
            }
        };
        points.push(point.normalize());
    }
}

fn add_patches<M: MeshBuilder>(mesh: &mut M, patch: &Patch) {
    let triangles = patch.triangles();
    let patch_len = patch.points.len();

    for octant in 0..8 {
        let base = octant * patch_len;
        let flip = is_mirrored(octant);
        for [a, b, c] in &triangles {
            push_triangle(mesh, [base + a, base + b, base + c], flip);
        }
    }
}

/// Quad strips along the inner box edges parallel to each axis with extent
fn add_connectors<M: MeshBuilder>(mesh: &mut M, patch: &Patch, layout: &Layout) {
    let patch_len = patch.points.len();

    for axis in 0..3 {
        if !layout.has_extent(axis) {
            continue;
        }

        let arc = patch.arc(axis);
        // The X arc runs Z→Y; the Y and Z arcs run the other way round their axis
        let reversed = axis != 0;

        for octant in (0..8).filter(|octant| octant & (1 << axis) == 0) {
            let near = octant * patch_len;
            let far = (octant | (1 << axis)) * patch_len;
            let flip = is_mirrored(octant) ^ reversed;

            for pair in arc.windows(2) {
                let (p0, p1) = (near + pair[0], near + pair[1]);
                let (q0, q1) = (far + pair[0], far + pair[1]);
                push_triangle(mesh, [p0, p1, q0], flip);
                push_triangle(mesh, [q0, p1, q1], flip);
            }
        }
    }
}

/// Flat quads on the box faces perpendicular to each axis
fn add_faces<M: MeshBuilder>(mesh: &mut M, patch: &Patch, layout: &Layout) {
    let patch_len = patch.points.len();

    for axis in 0..3 {
        if !layout.has_face(axis) {
            continue;
        }

        let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
        let pole = patch.pole(axis);

        for negative in [false, true] {
            let side = if negative { 1 << axis } else { 0 };
            // Corners in (u, v) sign order: (+,+), (-,+), (-,-), (+,-)
            let corner = |u_neg: usize, v_neg: usize| {
                (side | (u_neg << u) | (v_neg << v)) * patch_len + pole
            };
            let quad = [corner(0, 0), corner(1, 0), corner(1, 1), corner(0, 1)];

            push_triangle(mesh, [quad[0], quad[1], quad[2]], negative);
            push_triangle(mesh, [quad[0], quad[2], quad[3]], negative);
        }
    }
}
