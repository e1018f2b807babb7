//! Minimal double-precision linear algebra for the rendering pipeline.
//!
//! Vertex positions arrive as f64 and stay f64 all the way through the
//! camera transform, so depth comparisons between nearly coplanar
//! primitives don't lose precision before the rasterizer sees them.

pub mod mat4;
pub mod vec3;
pub mod vec4;
