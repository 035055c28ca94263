//! Shape request, validation and classification

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::OctasphereError;

/// Highest accepted subdivision level.
///
/// Level 6 needs 17160 vertices; level 7 would need 67080, past what u16
/// indices can address.
pub const MAX_SUBDIVISIONS: u32 = 6;

/// The four shapes one octasphere request can describe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Inner box collapsed to a point
    Sphere,
    /// Inner box collapsed to a segment
    Capsule,
    /// Zero radius; sharp edges and flat faces only
    Cuboid,
    /// Non-zero radius around an inner box with at least two extents
    RoundedCuboid,
}

/// Parameters of one octasphere mesh
///
/// `dimensions` is the full bounding box of the shape. Any component smaller than
/// `2 * radius` is raised to `2 * radius`, so zero components are the usual way to
/// ask for spheres and capsules.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OctasphereParams {
    pub dimensions: Vec3,
    pub radius: f32,
    pub subdivisions: u32,
}

/// Vertex and triangle counts a request will produce
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshCounts {
    pub vertices: usize,
    pub triangles: usize,
}

impl MeshCounts {
    /// Number of u16 indices (three per triangle)
    pub fn indices(&self) -> usize {
        self.triangles * 3
    }
}

/// Validated geometry layout shared by counting and generation
#[derive(Clone, Copy, Debug)]
pub(crate) struct Layout {
    pub radius: f32,
    /// Half extents of the box spanned by the eight corner centres
    pub half_extent: Vec3,
    /// Segments along each patch edge (`2^subdivisions`, or 1 for zero radius)
    pub segments: usize,
}

impl Layout {
    pub fn has_extent(&self, axis: usize) -> bool {
        self.half_extent[axis] > 0.0
    }

    pub fn has_radius(&self) -> bool {
        self.radius > 0.0
    }

    /// Whether the flat faces perpendicular to `axis` have any area
    pub fn has_face(&self, axis: usize) -> bool {
        self.has_extent((axis + 1) % 3) && self.has_extent((axis + 2) % 3)
    }

    pub fn patch_vertices(&self) -> usize {
        let n = self.segments + 1;
        n * (n + 1) / 2
    }

    pub fn counts(&self) -> MeshCounts {
        let segments = self.segments;
        let mut triangles = 0;

        if self.has_radius() {
            triangles += 8 * segments * segments;
            for axis in 0..3 {
                if self.has_extent(axis) {
                    triangles += 8 * segments;
                }
            }
        }

        for axis in 0..3 {
            if self.has_face(axis) {
                triangles += 4;
            }
        }

        MeshCounts {
            vertices: 8 * self.patch_vertices(),
            triangles,
        }
    }

    pub fn kind(&self) -> Result<ShapeKind, OctasphereError> {
        let extents = (0..3).filter(|&axis| self.has_extent(axis)).count();
        match (self.has_radius(), extents) {
            (true, 0) => Ok(ShapeKind::Sphere),
            (true, 1) => Ok(ShapeKind::Capsule),
            (true, _) => Ok(ShapeKind::RoundedCuboid),
            (false, 2..) => Ok(ShapeKind::Cuboid),
            (false, _) => Err(OctasphereError::Degenerate),
        }
    }
}

impl OctasphereParams {
    /// Create a request from raw parameters
    pub fn new(dimensions: Vec3, radius: f32, subdivisions: u32) -> Self {
        Self {
            dimensions,
            radius,
            subdivisions,
        }
    }

    /// Sphere of the given radius
    pub fn sphere(radius: f32, subdivisions: u32) -> Self {
        Self::new(Vec3::ZERO, radius, subdivisions)
    }

    /// Capsule along Y with total height `height` (end caps included)
    pub fn capsule(height: f32, radius: f32, subdivisions: u32) -> Self {
        Self::new(Vec3::new(0.0, height, 0.0), radius, subdivisions)
    }

    /// Sharp-edged box with the given full size
    pub fn cuboid(dimensions: Vec3) -> Self {
        Self::new(dimensions, 0.0, 0)
    }

    /// Box with the given full size and rounded edges and corners
    pub fn rounded_cuboid(dimensions: Vec3, radius: f32, subdivisions: u32) -> Self {
        Self::new(dimensions, radius, subdivisions)
    }

    /// Check the request without building anything
    pub fn validate(&self) -> Result<(), OctasphereError> {
        let layout = self.layout()?;
        layout.kind()?;
        Ok(())
    }

    /// Classify the shape these parameters describe
    pub fn kind(&self) -> Result<ShapeKind, OctasphereError> {
        self.layout()?.kind()
    }

    /// Exact vertex and triangle counts of the mesh
    pub fn counts(&self) -> Result<MeshCounts, OctasphereError> {
        let layout = self.layout()?;
        layout.kind()?;
        Ok(layout.counts())
    }

    pub(crate) fn layout(&self) -> Result<Layout, OctasphereError> {
        const AXES: [&str; 3] = ["dimensions.x", "dimensions.y", "dimensions.z"];

        for (field, value) in AXES
            .iter()
            .copied()
            .zip(self.dimensions.to_array())
            .chain(std::iter::once(("radius", self.radius)))
        {
            if !value.is_finite() {
                return Err(OctasphereError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(OctasphereError::Negative { field, value });
            }
        }

        if self.subdivisions > MAX_SUBDIVISIONS {
            return Err(OctasphereError::TooManySubdivisions {
                requested: self.subdivisions,
                max: MAX_SUBDIVISIONS,
            });
        }

        // 2 * radius must stay finite for the inner box to be well defined
        let diameter = 2.0 * self.radius;
        if !diameter.is_finite() {
            return Err(OctasphereError::TooLarge {
                field: "radius",
                value: self.radius,
            });
        }
        for (field, value) in AXES.iter().zip(self.dimensions.to_array()) {
            if value > 0.0 && value < diameter {
                warn!(
                    "octasphere: {} = {} is smaller than 2 * radius, raising to {}",
                    field, value, diameter
                );
            }
        }

        let segments = if self.radius > 0.0 {
            1usize << self.subdivisions
        } else {
            if self.subdivisions > 0 {
                debug!("octasphere: zero radius, ignoring subdivisions {}", self.subdivisions);
            }
            1
        };

        Ok(Layout {
            radius: self.radius,
            half_extent: (self.dimensions.max(Vec3::splat(diameter)) - diameter) * 0.5,
            segments,
        })
    }
}
