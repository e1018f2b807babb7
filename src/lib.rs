//! Offscreen depth-buffered mesh rendering for visibility testing.
//!
//! This crate renders a triangulated mesh from a calibrated camera viewpoint
//! into an offscreen buffer, in one of two modes:
//!
//! - **ID-map mode**: every pixel's RGB value encodes the 1-based index of the
//!   mesh primitive (face, edge, or vertex) visible at that pixel, with black
//!   meaning background. The resulting map is intended for occlusion testing
//!   in image-based modeling pipelines: decode a pixel, and you know exactly
//!   which primitive the camera sees there.
//! - **Shaded mode**: a flat-shaded preview of the mesh under a fixed
//!   three-point-light rig, for visual inspection.
//!
//! All rendering is done on the CPU with a per-pixel depth test, so the
//! nearest primitive wins regardless of draw order.
//!
//! # Quick Start
//!
//! ```
//! use rastermap::prelude::*;
//!
//! let mesh = Mesh::cube();
//! let camera = Camera::look_at(
//!     Vec3::new(3.0, 2.0, 4.0),
//!     Vec3::ZERO,
//!     Vec3::new(0.0, 1.0, 0.0),
//!     Mat4::perspective(45f64.to_radians(), 1.0, 0.1, 100.0),
//! );
//! let pixels = render_id_map(&camera, &mesh, 256, 256, &RenderConfig::default())?;
//! assert_eq!(pixels.len(), 3 * 256 * 256);
//! # Ok::<(), rastermap::RenderError>(())
//! ```

pub mod camera;
pub mod error;
pub mod id;
pub mod math;
pub mod mesh;
pub mod render;

// Re-export the primary API at the crate root.
pub use camera::Camera;
pub use error::{RenderError, Result};
pub use id::{decode, encode, Primitive, MAX_ID};
pub use mesh::Mesh;
pub use render::{render_id_map, render_shaded, RenderConfig};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use rastermap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::error::{RenderError, Result};
    pub use crate::id::{decode, encode, Primitive};
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::mesh::Mesh;
    pub use crate::render::{render_id_map, render_shaded, RenderConfig};
}
