//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `clip = projection * view * vertex`
//!
//! Callers hand in view and projection matrices as flat 16-element arrays in
//! column-major element order, the layout a fixed-function graphics API
//! consumes directly. The convenience constructors below follow the standard
//! right-handed OpenGL conventions (camera looks down -Z in eye space, NDC z
//! grows with distance), so matrices built here and matrices imported from a
//! calibration pipeline behave identically.

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]` with column-major convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f64; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f64; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Builds a matrix from a flat array in column-major element order,
    /// i.e. `m[col * 4 + row]`.
    pub fn from_col_major(m: &[f64; 16]) -> Self {
        let mut data = [[0.0; 4]; 4];
        for (col, chunk) in m.chunks_exact(4).enumerate() {
            for (row, &value) in chunk.iter().enumerate() {
                data[row][col] = value;
            }
        }
        Mat4::new(data)
    }

    /// Creates a right-handed view matrix looking from `eye` toward `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let side = forward.cross(up).normalize();
        let up = side.cross(forward);

        Mat4::new([
            [side.x, side.y, side.z, -side.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [-forward.x, -forward.y, -forward.z, forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed orthographic projection matrix.
    ///
    /// Maps the box `[left, right] x [bottom, top] x [-near, -far]` (eye
    /// space) onto the `[-1, 1]` NDC cube, with NDC z increasing away from
    /// the camera.
    pub fn orthographic(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        Mat4::new([
            [2.0 / (right - left), 0.0, 0.0, -(right + left) / (right - left)],
            [0.0, 2.0 / (top - bottom), 0.0, -(top + bottom) / (top - bottom)],
            [0.0, 0.0, -2.0 / (far - near), -(far + near) / (far - near)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed perspective projection matrix.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `near`, `far` - Positive clip plane distances
    pub fn perspective(fov_y: f64, aspect_ratio: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        Mat4::new([
            [f / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [
                0.0,
                0.0,
                (far + near) / (near - far),
                2.0 * far * near / (near - far),
            ],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Transforms a direction by the upper-left 3x3 part of the matrix,
    /// ignoring translation.
    ///
    /// Used to carry normals into eye space. View matrices are rigid, so the
    /// 3x3 part is a pure rotation and no inverse-transpose is needed.
    pub fn transform_direction(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0][0] * v.x + self.data[0][1] * v.y + self.data[0][2] * v.z,
            self.data[1][0] * v.x + self.data[1][1] * v.y + self.data[1][2] * v.z,
            self.data[2][0] * v.x + self.data[2][1] * v.y + self.data[2][2] * v.z,
        )
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f64; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        Vec4::new(
            self.data[0][0] * v.x
                + self.data[0][1] * v.y
                + self.data[0][2] * v.z
                + self.data[0][3] * v.w,
            self.data[1][0] * v.x
                + self.data[1][1] * v.y
                + self.data[1][2] * v.z
                + self.data[1][3] * v.w,
            self.data[2][0] * v.x
                + self.data[2][1] * v.y
                + self.data[2][2] * v.z
                + self.data[2][3] * v.w,
            self.data[3][0] * v.x
                + self.data[3][1] * v.y
                + self.data[3][2] * v.z
                + self.data[3][3] * v.w,
        )
    }
}
