//! Color representation and ARGB8888 packing.
//!
//! Shading math works on [`Color`] (floating point, nominally `[0, 1]` per
//! channel). The framebuffer stores packed `0xAARRGGBB` words.

use std::ops::{Add, Mul};

/// An RGB color with floating point channels.
///
/// Channels may exceed 1.0 (over-bright base colors are allowed); packing
/// clamps them into `0..=255`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Scales every channel by `factor`.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Scales by a brightness clamped into `[0, 1]`, so lighting can neither
    /// overflow full intensity nor produce negative (back-lit) channels.
    pub fn shaded(self, brightness: f64) -> Self {
        self.scale(brightness.clamp(0.0, 1.0))
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Packs into opaque ARGB8888.
    #[inline]
    pub fn to_argb(self) -> u32 {
        pack_color(self.r, self.g, self.b, 1.0)
    }

    #[inline]
    pub fn from_argb(color: u32) -> Self {
        let (r, g, b) = unpack_color(color);
        Self::new(r, g, b)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Self::Output {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

// Palette used by the demo scene and the default configuration.
pub const BACKGROUND: Color = Color::new(0.118, 0.118, 0.118);
pub const FLOOR: Color = Color::new(0.65, 0.72, 0.67);
pub const CUBE: Color = Color::new(0.4, 0.53, 0.7);

#[inline]
fn channel_to_byte(value: f64) -> u32 {
    // NaN saturates to 0 through the float-to-int cast
    (value * 255.0).floor().clamp(0.0, 255.0) as u32
}

/// Packs floating point channels into a `0xAARRGGBB` word.
#[inline]
pub fn pack_color(r: f64, g: f64, b: f64, a: f64) -> u32 {
    (channel_to_byte(a) << 24)
        | (channel_to_byte(r) << 16)
        | (channel_to_byte(g) << 8)
        | channel_to_byte(b)
}

/// Unpacks the RGB channels of a `0xAARRGGBB` word into `[0, 1]`.
#[inline]
pub fn unpack_color(color: u32) -> (f64, f64, f64) {
    let r = ((color >> 16) & 0xFF) as f64 / 255.0;
    let g = ((color >> 8) & 0xFF) as f64 / 255.0;
    let b = (color & 0xFF) as f64 / 255.0;
    (r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_clamps_out_of_range_channels() {
        assert_eq!(Color::new(2.0, -1.0, 0.5).to_argb(), 0xFFFF007F);
    }

    #[test]
    fn pack_unpack_primaries() {
        assert_eq!(Color::RED.to_argb(), 0xFFFF0000);
        assert_eq!(Color::from_argb(0xFF00FF00), Color::GREEN);
    }

    #[test]
    fn shaded_clamps_brightness() {
        assert_eq!(Color::WHITE.shaded(3.0), Color::WHITE);
        assert_eq!(Color::WHITE.shaded(-0.5), Color::BLACK);
    }
}
