//! Error type for octasphere generation

/// Reasons a shape request is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OctasphereError {
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("{field} must be >= 0.0 (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} is too large (got {value})")]
    TooLarge { field: &'static str, value: f32 },

    #[error("subdivisions {requested} exceeds the maximum of {max}")]
    TooManySubdivisions { requested: u32, max: u32 },

    #[error("parameters describe a degenerate shape with no triangles")]
    Degenerate,
}
