//! Error types.
//!
//! Only construction-time operations fail with an error. The per-frame
//! pipeline never returns one: faulty faces are dropped instead.

use thiserror::Error;

/// Rejection of a shape or face at mesh-build time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveDimension { name: &'static str, value: f32 },

    #[error("a prism needs at least 3 segments, got {0}")]
    TooFewSegments(u32),

    #[error("a prism takes at most {max} segments, got {segments}")]
    TooManySegments { segments: u32, max: u32 },

    #[error("a mesh holds at most u32::MAX vertices")]
    TooManyVertices,

    #[error("a face needs at least 3 vertices, got {0}")]
    TooFewIndices(usize),

    #[error("vertex index {index} is out of range for a mesh with {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("vertex index {0} appears more than once in the face")]
    DuplicateIndex(u32),

    #[error("the first three vertices of the face are collinear")]
    DegenerateFace,
}

/// Failure to load or validate a [`RenderConfig`](crate::config::RenderConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
