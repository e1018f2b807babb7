//! Camera and projection setup.
//!
//! The camera is a pair of opaque 4x4 matrices supplied by the caller: a
//! view (model-view) matrix and a projection matrix, applied left-to-right
//! as `clip = projection * view * vertex`. Nothing here computes the
//! matrices from intrinsics; a calibration pipeline already did that.
//! Convenience constructors exist for tests and demos.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// A calibrated camera: view and projection transforms.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    view: Mat4,
    projection: Mat4,
}

/// A vertex projected to the screen, carrying its depth for the z-buffer.
///
/// `x`/`y` are continuous pixel coordinates with the origin at the top-left
/// corner and y growing downward; `depth` is NDC z, which grows away from
/// the camera, so smaller means nearer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

impl Camera {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self { view, projection }
    }

    /// Builds a camera from flat column-major 16-element matrix arrays, the
    /// layout a host numeric environment hands over.
    pub fn from_col_major(view: &[f64; 16], projection: &[f64; 16]) -> Self {
        Self::new(Mat4::from_col_major(view), Mat4::from_col_major(projection))
    }

    /// Places the camera at `eye` looking toward `target`, with the given
    /// projection.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3, projection: Mat4) -> Self {
        Self::new(Mat4::look_at(eye, target, up), projection)
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// Transforms a world-space point into eye space. Lighting is evaluated
    /// there, with the viewer fixed at the origin.
    pub(crate) fn to_eye(&self, p: Vec3) -> Vec3 {
        (self.view * Vec4::from_point(p)).xyz()
    }

    /// Rotates a world-space direction into eye space.
    pub(crate) fn direction_to_eye(&self, d: Vec3) -> Vec3 {
        self.view.transform_direction(d)
    }

    /// Projects a world-space point to screen coordinates.
    ///
    /// Returns `None` when the point is on or behind the eye plane
    /// (clip w <= 0); primitives touching such points are skipped rather
    /// than clipped.
    pub(crate) fn project(&self, p: Vec3, width: u32, height: u32) -> Option<ScreenPoint> {
        let clip = self.projection * (self.view * Vec4::from_point(p));
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = Vec3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
        Some(ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * width as f64,
            y: (1.0 - ndc.y) * 0.5 * height as f64,
            depth: ndc.z,
        })
    }
}
