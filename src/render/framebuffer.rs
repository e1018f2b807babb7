//! Offscreen frame buffer with depth-tested pixel writes.
//!
//! The buffer is the render call's private offscreen surface: it is created
//! at the start of a call, written through the depth test, drained into the
//! caller's flat byte array, and dropped. Nothing survives the call, and
//! early failure paths release it through ordinary ownership.
//!
//! The depth buffer stores NDC z per pixel (smaller = nearer). The depth
//! comparison is `<=`, so when two primitives land at exactly the same
//! depth the one drawn later wins. Combined with the fixed face/edge/vertex
//! draw order this resolves ties in favor of vertices over edges over faces.

use crate::error::{RenderError, Result};

/// An owned RGB color buffer plus depth buffer.
pub struct FrameBuffer {
    color: Vec<u8>,
    depth: Vec<f64>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Creates a frame buffer cleared to `clear_color`, with all depths at
    /// infinity.
    ///
    /// Fails with [`RenderError::InvalidDimensions`] when either dimension
    /// is zero or the pixel count would overflow.
    pub fn new(width: u32, height: u32, clear_color: [u8; 3]) -> Result<Self> {
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .filter(|_| width > 0 && height > 0)
            .ok_or(RenderError::InvalidDimensions { width, height })?;
        let bytes = pixels
            .checked_mul(3)
            .ok_or(RenderError::InvalidDimensions { width, height })?;

        let mut color = vec![0u8; bytes];
        for pixel in color.chunks_exact_mut(3) {
            pixel.copy_from_slice(&clear_color);
        }
        Ok(Self {
            color,
            depth: vec![f64::INFINITY; pixels],
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Writes a pixel if it passes the depth test.
    ///
    /// The write happens when `depth` is nearer than or equal to the stored
    /// depth; equal depth overwrites (last-drawn wins). Out-of-bounds
    /// coordinates are silently ignored, which keeps primitive clipping out
    /// of the inner loops.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f64, color: [u8; 3]) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let idx = (y as u32 * self.width + x as u32) as usize;
            if depth <= self.depth[idx] {
                self.depth[idx] = depth;
                self.color[idx * 3..idx * 3 + 3].copy_from_slice(&color);
            }
        }
    }

    /// Returns the color at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<[u8; 3]> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let idx = ((y as u32 * self.width + x as u32) * 3) as usize;
            Some([self.color[idx], self.color[idx + 1], self.color[idx + 2]])
        } else {
            None
        }
    }

    /// Extracts the rendered image as a flat byte sequence.
    ///
    /// Layout is exactly as stored: row-major with row 0 the top scanline,
    /// three bytes per pixel in R, G, B order, `3 * width * height` bytes
    /// total. No vertical flip is performed; callers whose image convention
    /// puts the origin elsewhere reorder rows themselves.
    pub fn into_bytes(self) -> Vec<u8> {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            FrameBuffer::new(0, 10, [0; 3]),
            Err(RenderError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            FrameBuffer::new(10, 0, [0; 3]),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn clears_to_requested_color() {
        let fb = FrameBuffer::new(2, 2, [9, 8, 7]).unwrap();
        assert_eq!(fb.get_pixel(0, 0), Some([9, 8, 7]));
        assert_eq!(fb.get_pixel(1, 1), Some([9, 8, 7]));
    }

    #[test]
    fn nearer_write_wins() {
        let mut fb = FrameBuffer::new(4, 4, [0; 3]).unwrap();
        fb.set_pixel_with_depth(1, 1, 0.5, [1, 1, 1]);
        fb.set_pixel_with_depth(1, 1, 0.9, [2, 2, 2]); // farther, rejected
        assert_eq!(fb.get_pixel(1, 1), Some([1, 1, 1]));
        fb.set_pixel_with_depth(1, 1, 0.1, [3, 3, 3]); // nearer, accepted
        assert_eq!(fb.get_pixel(1, 1), Some([3, 3, 3]));
    }

    #[test]
    fn equal_depth_favors_last_write() {
        let mut fb = FrameBuffer::new(4, 4, [0; 3]).unwrap();
        fb.set_pixel_with_depth(2, 2, 0.5, [1, 1, 1]);
        fb.set_pixel_with_depth(2, 2, 0.5, [2, 2, 2]);
        assert_eq!(fb.get_pixel(2, 2), Some([2, 2, 2]));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(2, 2, [0; 3]).unwrap();
        fb.set_pixel_with_depth(-1, 0, 0.0, [1, 1, 1]);
        fb.set_pixel_with_depth(2, 0, 0.0, [1, 1, 1]);
        fb.set_pixel_with_depth(0, 5, 0.0, [1, 1, 1]);
        assert!(fb.into_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn extraction_preserves_row_major_rgb_order() {
        let mut fb = FrameBuffer::new(2, 2, [0; 3]).unwrap();
        fb.set_pixel_with_depth(1, 0, 0.0, [10, 20, 30]);
        let bytes = fb.into_bytes();
        assert_eq!(bytes.len(), 12);
        // Pixel (1, 0) is the second pixel of the first row.
        assert_eq!(&bytes[3..6], &[10, 20, 30]);
    }
}
