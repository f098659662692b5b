//! Color and depth buffers.
//!
//! The depth buffer enables hidden surface removal via the z-buffer algorithm.
//! It stores the camera-space distance of the nearest surface seen so far at
//! each pixel (`w = -z`), so smaller values are nearer. Cleared depth is
//! `+∞`, which every finite depth beats.

use std::path::Path;

use image::RgbaImage;

use crate::colors::{unpack_color, Color};
use crate::error::RenderError;

/// A width × height color buffer with a parallel depth buffer.
///
/// Colors are packed ARGB8888 (`0xAARRGGBB`).
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f64>,
    width: u32,
    height: u32,
    background: u32,
}

impl FrameBuffer {
    /// Creates a cleared buffer. Dimensions are validated by the caller
    /// (see [`crate::RenderConfig::validate`]).
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let size = width as usize * height as usize;
        let background = background.to_argb();
        Self {
            color_buffer: vec![background; size],
            depth_buffer: vec![f64::INFINITY; size],
            width,
            height,
            background,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> u32 {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background.to_argb();
    }

    /// Resets color to the background and depth to `+∞`.
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background);
        self.depth_buffer.fill(f64::INFINITY);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Writes `color` at (x, y) if `depth` is nearer than what is stored.
    ///
    /// Returns whether the pixel was written. NaN depths never pass, and
    /// out-of-bounds coordinates are ignored.
    #[inline]
    pub fn test_and_set(&mut self, x: u32, y: u32, depth: f64, color: u32) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        // Depth test: smaller distance means closer to camera
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.color_buffer[idx] = color;
            true
        } else {
            false
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn depth(&self, x: u32, y: u32) -> Option<f64> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        self.pixel(x, y).map(Color::from_argb)
    }

    /// Row-major packed colors.
    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Row-major depths.
    pub fn depths(&self) -> &[f64] {
        &self.depth_buffer
    }

    /// Colors as native-endian bytes, the layout an ARGB8888 streaming
    /// texture expects.
    pub fn to_argb_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|color| color.to_ne_bytes())
            .collect()
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let argb = self.color_buffer[y as usize * self.width as usize + x as usize];
            let [a, r, g, b] = argb.to_be_bytes();
            image::Rgba([r, g, b, a])
        })
    }

    /// Writes the color buffer to an image file; the format follows the
    /// file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.to_rgba_image().save(path)?;
        Ok(())
    }

    /// Box-filters every `factor` × `factor` block into one pixel.
    ///
    /// Colors are averaged; depth keeps the nearest sample. Trailing rows or
    /// columns that do not fill a whole block are dropped.
    pub fn downsample(&self, factor: u32) -> FrameBuffer {
        let factor = factor.max(1);
        let width = (self.width / factor).max(1);
        let height = (self.height / factor).max(1);
        let mut out = FrameBuffer {
            color_buffer: Vec::with_capacity(width as usize * height as usize),
            depth_buffer: Vec::with_capacity(width as usize * height as usize),
            width,
            height,
            background: self.background,
        };

        for y in 0..height {
            for x in 0..width {
                let mut sum = Color::BLACK;
                let mut nearest = f64::INFINITY;
                let mut samples = 0u32;
                for sy in y * factor..((y + 1) * factor).min(self.height) {
                    for sx in x * factor..((x + 1) * factor).min(self.width) {
                        let idx = sy as usize * self.width as usize + sx as usize;
                        let (r, g, b) = unpack_color(self.color_buffer[idx]);
                        sum = sum + Color::new(r, g, b);
                        nearest = nearest.min(self.depth_buffer[idx]);
                        samples += 1;
                    }
                }
                // Rounded rather than floored so averaging identical samples is lossless
                let avg = sum.scale(1.0 / samples.max(1) as f64);
                out.color_buffer.push(
                    0xFF00_0000
                        | (round_channel(avg.r) << 16)
                        | (round_channel(avg.g) << 8)
                        | round_channel(avg.b),
                );
                out.depth_buffer.push(nearest);
            }
        }

        out
    }
}

#[inline]
fn round_channel(value: f64) -> u32 {
    (value * 255.0).round().clamp(0.0, 255.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_cleared() {
        let fb = FrameBuffer::new(4, 3, Color::BLUE);
        assert_eq!(fb.pixels().len(), 12);
        assert!(fb.pixels().iter().all(|&c| c == 0xFF0000FF));
        assert!(fb.depths().iter().all(|d| *d == f64::INFINITY));
    }

    #[test]
    fn nearer_depth_wins() {
        let mut fb = FrameBuffer::new(2, 2, Color::BLACK);
        assert!(fb.test_and_set(1, 0, 5.0, 0xFFFF0000));
        assert!(!fb.test_and_set(1, 0, 6.0, 0xFF00FF00));
        assert!(!fb.test_and_set(1, 0, 5.0, 0xFF00FF00));
        assert!(fb.test_and_set(1, 0, 4.0, 0xFF0000FF));
        assert_eq!(fb.pixel(1, 0), Some(0xFF0000FF));
        assert_eq!(fb.depth(1, 0), Some(4.0));
    }

    #[test]
    fn nan_depth_and_out_of_bounds_are_ignored() {
        let mut fb = FrameBuffer::new(2, 2, Color::BLACK);
        assert!(!fb.test_and_set(0, 0, f64::NAN, 0xFFFFFFFF));
        assert!(!fb.test_and_set(2, 0, 1.0, 0xFFFFFFFF));
        assert!(!fb.test_and_set(0, 2, 1.0, 0xFFFFFFFF));
        assert_eq!(fb.pixel(0, 0), Some(Color::BLACK.to_argb()));
        assert_eq!(fb.pixel(2, 0), None);
    }

    #[test]
    fn clear_restores_background_and_depth() {
        let mut fb = FrameBuffer::new(2, 2, Color::GREEN);
        fb.test_and_set(0, 1, 1.0, 0xFFFFFFFF);
        fb.clear();
        assert_eq!(fb.pixel(0, 1), Some(0xFF00FF00));
        assert_eq!(fb.depth(0, 1), Some(f64::INFINITY));
    }

    #[test]
    fn rgba_image_reorders_channels() {
        let mut fb = FrameBuffer::new(1, 1, Color::BLACK);
        fb.test_and_set(0, 0, 1.0, 0xFF112233);
        let img = fb.to_rgba_image();
        assert_eq!(img.get_pixel(0, 0).0, [0x11, 0x22, 0x33, 0xFF]);
    }

    #[test]
    fn argb_bytes_match_native_words() {
        let fb = FrameBuffer::new(2, 1, Color::RED);
        let bytes = fb.to_argb_bytes();
        assert_eq!(bytes.len(), 8);
        assert_eq!(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), 0xFFFF0000);
    }

    #[test]
    fn downsample_averages_color_and_keeps_nearest_depth() {
        let mut fb = FrameBuffer::new(4, 2, Color::BLACK);
        fb.test_and_set(0, 0, 3.0, 0xFFFFFFFF);
        fb.test_and_set(1, 1, 2.0, 0xFFFFFFFF);
        let small = fb.downsample(2);
        assert_eq!((small.width(), small.height()), (2, 1));
        // Two white and two black samples
        assert_eq!(small.pixel(0, 0), Some(0xFF808080));
        assert_eq!(small.depth(0, 0), Some(2.0));
        assert_eq!(small.pixel(1, 0), Some(0xFF000000));
        assert_eq!(small.depth(1, 0), Some(f64::INFINITY));
    }

    #[test]
    fn downsample_by_one_is_identity() {
        let mut fb = FrameBuffer::new(3, 3, Color::BLUE);
        fb.test_and_set(1, 2, 1.5, 0xFF123456);
        assert_eq!(fb.downsample(1), fb);
    }
}
