//! Tests for octasphere generation

use glam::{Quat, Vec3};
use std::f32::consts::PI;

use super::*;
use crate::packing::{
    POSITION_STRIDE, POSITION_STRIDE_COMPACT, TANGENT_STRIDE, TANGENT_STRIDE_COMPACT,
    TRIANGLE_STRIDE,
};
use crate::{OctasphereError, OctasphereParams, octasphere};

fn sample_params() -> Vec<OctasphereParams> {
    let mut params = Vec::new();
    for subdivisions in 0..=3 {
        params.push(OctasphereParams::sphere(1.5, subdivisions));
        params.push(OctasphereParams::capsule(3.0, 0.5, subdivisions));
        params.push(OctasphereParams::rounded_cuboid(
            Vec3::new(2.0, 1.0, 3.0),
            0.25,
            subdivisions,
        ));
        params.push(OctasphereParams::rounded_cuboid(
            Vec3::new(2.0, 0.0, 3.0),
            0.25,
            subdivisions,
        ));
    }
    params.push(OctasphereParams::cuboid(Vec3::new(1.0, 2.0, 3.0)));
    params.push(OctasphereParams::cuboid(Vec3::new(1.0, 0.0, 3.0)));
    params
}

fn unpacked(params: &OctasphereParams) -> UnpackedMesh {
    generate_octasphere(params).expect("generation failed")
}

fn triangles(mesh: &UnpackedMesh) -> impl Iterator<Item = [Vec3; 3]> + '_ {
    mesh.indices.chunks_exact(3).map(|tri| {
        [
            Vec3::from(mesh.positions[tri[0] as usize]),
            Vec3::from(mesh.positions[tri[1] as usize]),
            Vec3::from(mesh.positions[tri[2] as usize]),
        ]
    })
}

/// Signed volume via the divergence theorem; positive for outward winding
fn signed_volume(mesh: &UnpackedMesh) -> f32 {
    triangles(mesh).map(|[a, b, c]| a.dot(b.cross(c)) / 6.0).sum()
}

#[test]
fn test_buffer_sizes_match_counts() {
    for params in sample_params() {
        let counts = params.counts().unwrap();
        let mesh: OctasphereMesh = generate_octasphere(&params).unwrap();

        assert_eq!(mesh.num_vertices as usize, counts.vertices, "{:?}", params);
        assert_eq!(mesh.num_indices as usize, counts.indices(), "{:?}", params);
        assert_eq!(mesh.positions.len(), counts.vertices * POSITION_STRIDE);
        assert_eq!(mesh.tangents.len(), counts.vertices * TANGENT_STRIDE);
        assert_eq!(mesh.triangles.len(), counts.triangles * TRIANGLE_STRIDE);
        assert_eq!(mesh.triangles.len(), mesh.num_indices as usize * 2);
    }
}

#[test]
fn test_compact_buffer_sizes_match_counts() {
    for params in sample_params() {
        let counts = params.counts().unwrap();
        let mesh: OctasphereMeshCompact = generate_octasphere(&params).unwrap();

        assert_eq!(mesh.num_vertices as usize, counts.vertices);
        assert_eq!(mesh.num_indices as usize, counts.indices());
        assert_eq!(mesh.positions.len(), counts.vertices * POSITION_STRIDE_COMPACT);
        assert_eq!(mesh.tangents.len(), counts.vertices * TANGENT_STRIDE_COMPACT);
        assert_eq!(mesh.triangles.len(), counts.triangles * TRIANGLE_STRIDE);
    }
}

#[test]
fn test_builders_agree() {
    for params in sample_params() {
        let full: OctasphereMesh = generate_octasphere(&params).unwrap();
        let compact: OctasphereMeshCompact = generate_octasphere(&params).unwrap();
        let plain = unpacked(&params);

        assert_eq!(full.triangles, compact.triangles);
        assert_eq!(full.triangle_data().concat(), plain.indices);
        assert_eq!(full.position_data(), plain.positions);
        assert_eq!(full.tangent_data(), plain.tangents);
    }
}

#[test]
fn test_indices_in_range() {
    for params in sample_params() {
        let mesh = unpacked(&params);
        let vertex_count = mesh.positions.len();
        assert!(
            mesh.indices.iter().all(|&i| (i as usize) < vertex_count),
            "index out of range for {:?}",
            params
        );
    }
}

#[test]
fn test_buffers_are_host_byte_order() {
    let mesh = octasphere(Vec3::new(4.0, 0.0, 0.0), 1.0, 1).unwrap();

    let x = f32::from_ne_bytes(mesh.positions[0..4].try_into().unwrap());
    let w = f32::from_ne_bytes(mesh.tangents[12..16].try_into().unwrap());
    let i = u16::from_ne_bytes(mesh.triangles[0..2].try_into().unwrap());

    assert_eq!(x, mesh.position_data()[0][0]);
    assert_eq!(w, mesh.tangent_data()[0][3]);
    assert_eq!(i, mesh.triangle_data()[0][0]);
}

#[test]
fn test_triangles_face_outward() {
    // A flat rectangle's faces pass through the origin
    let solids = sample_params()
        .into_iter()
        .filter(|p| p.radius > 0.0 || p.dimensions.min_element() > 0.0);

    for params in solids {
        let mesh = unpacked(&params);
        for [a, b, c] in triangles(&mesh) {
            let normal = (b - a).cross(c - a);
            if normal.length() < 1e-7 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(
                normal.dot(centroid) > 0.0,
                "inward triangle {:?} in {:?}",
                [a, b, c],
                params
            );
        }
    }
}

#[test]
fn test_shapes_are_closed() {
    // The area vectors of a closed surface cancel out
    for params in sample_params() {
        let mesh = unpacked(&params);
        let sum: Vec3 = triangles(&mesh)
            .map(|[a, b, c]| (b - a).cross(c - a))
            .sum();
        assert!(sum.length() < 1e-3, "open surface ({:?}) for {:?}", sum, params);
    }
}

#[test]
fn test_sphere_vertices_on_surface() {
    let radius = 2.5;
    let mesh = unpacked(&OctasphereParams::sphere(radius, 3));

    for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
        let position = Vec3::from(*position);
        let normal = Vec3::from(*normal);
        assert!((position.length() - radius).abs() < 1e-5);
        assert!(normal.is_normalized());
        assert!((position / radius - normal).length() < 1e-5);
    }
}

#[test]
fn test_tangent_quaternions_match_normals() {
    for params in sample_params() {
        let mesh = unpacked(&params);
        for (tangent, normal) in mesh.tangents.iter().zip(&mesh.normals) {
            let q = Quat::from_array(*tangent);
            assert!(q.is_normalized());
            assert!(q.w >= 0.0);
            assert!((q * Vec3::Z - Vec3::from(*normal)).length() < 1e-4);
        }
    }
}

#[test]
fn test_octahedron_at_level_zero() {
    let mesh = unpacked(&OctasphereParams::sphere(1.0, 0));
    assert_eq!(mesh.positions.len(), 24);
    assert_eq!(mesh.indices.len(), 8 * 3);

    // Every vertex is one of the six axis points
    for position in &mesh.positions {
        let p = Vec3::from(*position);
        assert_eq!(p.abs().max_element(), 1.0);
        assert!((p.length() - 1.0).abs() < 1e-6);
    }
}

#[test]
fn test_cuboid() {
    let dimensions = Vec3::new(1.0, 2.0, 3.0);
    let mesh = unpacked(&OctasphereParams::cuboid(dimensions));

    assert_eq!(mesh.positions.len(), 24);
    assert_eq!(mesh.indices.len(), 12 * 3);
    assert!((signed_volume(&mesh) - 6.0).abs() < 1e-5);

    // Face triangles carry flat axis normals
    for tri in mesh.indices.chunks_exact(3) {
        let normals: Vec<Vec3> = tri
            .iter()
            .map(|&i| Vec3::from(mesh.normals[i as usize]))
            .collect();
        assert_eq!(normals[0], normals[1]);
        assert_eq!(normals[1], normals[2]);
        assert_eq!(normals[0].abs().max_element(), 1.0);
    }
}

#[test]
fn test_bounding_box() {
    for params in sample_params() {
        let mesh = unpacked(&params);
        let (min, max) = mesh.positions.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(min, max), p| (min.min(Vec3::from(*p)), max.max(Vec3::from(*p))),
        );
        let expected = params.dimensions.max(Vec3::splat(2.0 * params.radius));
        assert!((max - min - expected).abs().max_element() < 1e-5, "{:?}", params);
        assert!((max + min).abs().max_element() < 1e-5, "not centred: {:?}", params);
    }
}

#[test]
fn test_volume_approaches_analytic() {
    let (w, h, d, r) = (2.0, 1.5, 3.0, 0.4);
    let (a, b, c) = (w - 2.0 * r, h - 2.0 * r, d - 2.0 * r);
    let exact = a * b * c
        + 2.0 * r * (a * b + b * c + c * a)
        + PI * r * r * (a + b + c)
        + 4.0 / 3.0 * PI * r * r * r;

    let mesh = unpacked(&OctasphereParams::rounded_cuboid(Vec3::new(w, h, d), r, 4));
    let volume = signed_volume(&mesh);

    // Chords lie inside the true surface
    assert!(volume <= exact + 1e-4);
    assert!(volume > exact * 0.99, "volume {} vs exact {}", volume, exact);
}

#[test]
fn test_capsule_axis() {
    let mesh = unpacked(&OctasphereParams::capsule(4.0, 0.5, 2));
    for position in &mesh.positions {
        let p = Vec3::from(*position);
        let nearest_on_axis = Vec3::new(0.0, p.y.clamp(-1.5, 1.5), 0.0);
        assert!(((p - nearest_on_axis).length() - 0.5).abs() < 1e-5);
    }
}

#[test]
fn test_compact_positions_close_to_full() {
    let params = OctasphereParams::rounded_cuboid(Vec3::new(1.0, 2.0, 1.0), 0.3, 2);
    let full: OctasphereMesh = generate_octasphere(&params).unwrap();
    let compact: OctasphereMeshCompact = generate_octasphere(&params).unwrap();

    let halves: Vec<half::f16> = bytemuck::pod_collect_to_vec(compact.positions.as_slice());
    for (packed, position) in halves.chunks_exact(4).zip(full.position_data()) {
        for axis in 0..3 {
            assert!((packed[axis].to_f32() - position[axis]).abs() < 2e-3);
        }
        assert_eq!(packed[3].to_f32(), 1.0);
    }
}

#[test]
fn test_errors_propagate() {
    assert_eq!(
        octasphere(Vec3::ZERO, 0.0, 2),
        Err(OctasphereError::Degenerate)
    );
    assert!(matches!(
        generate_octasphere::<UnpackedMesh>(&OctasphereParams::sphere(f32::INFINITY, 1)),
        Err(OctasphereError::NonFinite { field: "radius" })
    ));
    assert!(matches!(
        generate_octasphere::<UnpackedMesh>(&OctasphereParams::sphere(f32::MAX / 1.5, 1)),
        Err(OctasphereError::TooLarge { field: "radius", .. })
    ));
}

#[test]
fn test_each_call_returns_fresh_buffers() {
    let a = octasphere(Vec3::ONE, 0.2, 2).unwrap();
    let b = octasphere(Vec3::ONE, 0.2, 2).unwrap();
    assert_eq!(a, b);
    assert_ne!(a.positions.as_ptr(), b.positions.as_ptr());
}
