//! Vertex data packing utilities
//!
//! Converts generated vertex attributes into the raw layouts a renderer uploads:
//! - positions: f32x3 (full) or f16x4 with w=1.0 (compact)
//! - tangent frames: quaternion as f32x4 (full) or snorm16x4 (compact)
//! - triangles: u16x3
//!
//! All byte conversion goes through `bytemuck`, so buffers are in host byte order.

use glam::{Mat3, Quat, Vec3};
use half::f16;

// ============================================================================
// Stride Constants
// ============================================================================

/// Bytes per vertex in the position buffer (Float32x3)
pub const POSITION_STRIDE: usize = 12;
/// Bytes per vertex in the tangent buffer (Float32x4 quaternion)
pub const TANGENT_STRIDE: usize = 16;
/// Bytes per triangle in the index buffer (Uint16x3)
pub const TRIANGLE_STRIDE: usize = 6;
/// Bytes per vertex in the compact position buffer (Float16x4)
pub const POSITION_STRIDE_COMPACT: usize = 8;
/// Bytes per vertex in the compact tangent buffer (Snorm16x4 quaternion)
pub const TANGENT_STRIDE_COMPACT: usize = 8;

// ============================================================================
// Basic Conversion Functions
// ============================================================================

/// Convert f32 to signed normalized 16-bit integer (snorm16)
///
/// Maps f32 range [-1.0, 1.0] to i16 range [-32767, 32767].
#[inline]
pub fn f32_to_snorm16(value: f32) -> i16 {
    let clamped = value.clamp(-1.0, 1.0);
    (clamped * 32767.0).round() as i16
}

/// Convert a snorm16 back to f32 in [-1.0, 1.0]
#[inline]
pub fn snorm16_to_f32(value: i16) -> f32 {
    (value as f32 / 32767.0).max(-1.0)
}

// ============================================================================
// Position Packing
// ============================================================================

/// Pack a 3D position to Float32x3
#[inline]
pub fn pack_position_f32(position: Vec3) -> [f32; 3] {
    position.to_array()
}

/// Pack a 3D position (f32x3) to Float16x4 format (with w=1.0 padding)
#[inline]
pub fn pack_position_f16(x: f32, y: f32, z: f32) -> [f16; 4] {
    [
        f16::from_f32(x),
        f16::from_f32(y),
        f16::from_f32(z),
        f16::from_f32(1.0),
    ]
}

// ============================================================================
// Tangent Frame Packing
// ============================================================================

/// Build the tangent-space quaternion for a surface normal
///
/// The returned rotation maps the basis (X, Y, Z) onto (tangent, bitangent, normal),
/// so rotating +Z yields the normal. The tangent follows lines of latitude around
/// the Y axis; near the poles X is used as the reference instead. The frame is
/// always right-handed and the quaternion is canonicalised to `w >= 0`.
pub fn tangent_frame_quat(normal: Vec3) -> Quat {
    let n = normal.normalize_or_zero();
    if n == Vec3::ZERO {
        return Quat::IDENTITY;
    }

    let reference = if n.y.abs() > 0.999 { Vec3::X } else { Vec3::Y };
    let t = reference.cross(n).normalize();
    let b = n.cross(t);

    let q = Quat::from_mat3(&Mat3::from_cols(t, b, n)).normalize();
    if q.w < 0.0 { -q } else { q }
}

/// Pack a tangent-frame quaternion to Float32x4 as `[x, y, z, w]`
#[inline]
pub fn pack_tangent_quat_f32(q: Quat) -> [f32; 4] {
    q.to_array()
}

/// Pack a tangent-frame quaternion to Snorm16x4 as `[x, y, z, w]`
///
/// `w` is kept strictly positive after quantization so shaders that read the
/// bitangent sign from `w` never see zero.
pub fn pack_tangent_quat_snorm16(q: Quat) -> [i16; 4] {
    const BIAS: f32 = 1.0 / 32767.0;

    let q = if q.w < 0.0 { -q } else { q };
    let [mut x, mut y, mut z, mut w] = q.to_array();
    if w < BIAS {
        w = BIAS;
        let factor = (1.0 - BIAS * BIAS).sqrt();
        x *= factor;
        y *= factor;
        z *= factor;
    }

    [
        f32_to_snorm16(x),
        f32_to_snorm16(y),
        f32_to_snorm16(z),
        f32_to_snorm16(w),
    ]
}

/// Unpack a Snorm16x4 tangent quaternion
#[inline]
pub fn unpack_tangent_quat_snorm16(packed: [i16; 4]) -> Quat {
    Quat::from_xyzw(
        snorm16_to_f32(packed[0]),
        snorm16_to_f32(packed[1]),
        snorm16_to_f32(packed[2]),
        snorm16_to_f32(packed[3]),
    )
    .normalize()
}

// ============================================================================
// Index Packing
// ============================================================================

/// Pack a triangle to Uint16x3
#[inline]
pub fn pack_triangle_u16(i0: u16, i1: u16, i2: u16) -> [u16; 3] {
    [i0, i1, i2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_position_f16() {
        let packed = pack_position_f16(1.0, 2.0, 3.0);
        assert_eq!(packed[0], f16::from_f32(1.0));
        assert_eq!(packed[1], f16::from_f32(2.0));
        assert_eq!(packed[2], f16::from_f32(3.0));
        assert_eq!(packed[3], f16::from_f32(1.0));
    }

    #[test]
    fn test_f32_to_snorm16_range() {
        assert_eq!(f32_to_snorm16(-1.0), -32767);
        assert_eq!(f32_to_snorm16(0.0), 0);
        assert_eq!(f32_to_snorm16(1.0), 32767);
        assert_eq!(f32_to_snorm16(2.0), 32767);
    }

    #[test]
    fn test_tangent_frame_rotates_z_onto_normal() {
        let normals = [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
            Vec3::new(0.577, 0.577, 0.577),
            Vec3::new(-0.2, 0.9, 0.1),
            Vec3::new(0.01, -0.9999, 0.0),
        ];

        for normal in normals {
            let normal = normal.normalize();
            let q = tangent_frame_quat(normal);
            assert!(q.is_normalized(), "not unit for {:?}", normal);
            assert!(q.w >= 0.0, "w negative for {:?}", normal);

            let rotated = q * Vec3::Z;
            assert!(
                (rotated - normal).length() < 1e-4,
                "expected {:?}, got {:?}",
                normal,
                rotated
            );

            let tangent = q * Vec3::X;
            assert!(tangent.dot(normal).abs() < 1e-4);
        }
    }

    #[test]
    fn test_tangent_frame_zero_normal_is_identity() {
        assert_eq!(tangent_frame_quat(Vec3::ZERO), Quat::IDENTITY);
    }

    #[test]
    fn test_snorm16_quat_keeps_w_positive() {
        // Frame for -Z is a half turn about Y, so w is zero before biasing
        let q = tangent_frame_quat(Vec3::NEG_Z);
        let packed = pack_tangent_quat_snorm16(q);
        assert!(packed[3] > 0);

        let decoded = unpack_tangent_quat_snorm16(packed);
        let error = (decoded * Vec3::Z - Vec3::NEG_Z).length();
        assert!(error < 1e-3, "decoded normal off by {}", error);
    }

    #[test]
    fn test_snorm16_quat_negates_negative_w() {
        let q = Quat::from_xyzw(0.0, 0.0, 0.6, -0.8);
        let packed = pack_tangent_quat_snorm16(q);
        assert_eq!(packed[2], f32_to_snorm16(-0.6));
        assert_eq!(packed[3], f32_to_snorm16(0.8));
    }
}
