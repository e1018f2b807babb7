//! Error types for rendering and mesh validation.

use thiserror::Error;

/// Errors surfaced by mesh construction and the render entry points.
///
/// Degenerate geometry (zero-area triangles) is deliberately *not* an error:
/// the rasterizer recovers by skipping the triangle locally.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The offscreen surface could not be created. Zero-sized or
    /// overflowing dimensions are rejected before any rendering begins.
    #[error("invalid framebuffer dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A face or edge references a vertex the mesh does not have.
    #[error("{kind} {primitive} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        kind: &'static str,
        primitive: usize,
        index: u32,
        vertex_count: usize,
    },

    /// More primitives than the 24-bit color channel can identify.
    #[error("mesh has {count} primitives, exceeding the 24-bit ID space")]
    IdSpaceExhausted { count: usize },

    /// A flat input array's length is not a multiple of its element arity.
    #[error("{name} array length {len} is not a multiple of {arity}")]
    MalformedBuffer {
        name: &'static str,
        len: usize,
        arity: usize,
    },

    /// OBJ parsing failure.
    #[error("failed to load OBJ: {0}")]
    ObjLoad(#[from] tobj::LoadError),
}

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
