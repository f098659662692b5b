//! Point light evaluation.
//!
//! Brightness falls off with the inverse of the distance to the light and is
//! lifted by an ambient floor:
//!
//! ```text
//! raw        = max(dot(n̂, l̂), 0) * intensity / |l|
//! brightness = raw * (1 - ambient) + ambient
//! ```
//!
//! `brightness` is not clamped from above; [`crate::colors::Color::shaded`]
//! clamps when the color is produced.

use crate::math::Vec3;

/// Default light used by the demo scene.
pub const DEFAULT_LIGHT_POSITION: Vec3 = Vec3::new(-10.0, 10.0, 5.0);
pub const DEFAULT_INTENSITY: f64 = 20.0;
pub const DEFAULT_AMBIENT: f64 = 0.25;

/// Computes the brightness of a surface point lit by a point light.
///
/// # Arguments
/// * `normal` - Surface normal at the point (any length)
/// * `point` - Surface point, in the same space as `light_position`
/// * `light_position` - Where the light sits
/// * `intensity` - Light strength; brightness scales with `intensity / distance`
/// * `ambient` - Brightness floor in `[0, 1]`
///
/// Returns `None` when the light sits on the point or the normal has zero
/// length, since there is no direction to compare.
pub fn shade(
    normal: Vec3,
    point: Vec3,
    light_position: Vec3,
    intensity: f64,
    ambient: f64,
) -> Option<f64> {
    let light_ray = light_position - point;
    let distance = light_ray.magnitude();
    let light_dir = light_ray.try_normalize()?;
    let normal = normal.try_normalize()?;

    // Back-lit surfaces get only ambient
    let lambert = normal.dot(light_dir).max(0.0);
    let raw = lambert * intensity / distance;
    let brightness = raw * (1.0 - ambient) + ambient;

    brightness.is_finite().then_some(brightness)
}

/// A point light with inverse-distance attenuation and an ambient floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f64,
    /// Fraction of full brightness every surface receives regardless of
    /// orientation.
    pub ambient: f64,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: f64, ambient: f64) -> Self {
        Self {
            position,
            intensity,
            ambient,
        }
    }

    /// Brightness of `point` with surface normal `normal`. See [`shade`].
    #[inline]
    pub fn brightness(&self, normal: Vec3, point: Vec3) -> Option<f64> {
        shade(normal, point, self.position, self.intensity, self.ambient)
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHT_POSITION, DEFAULT_INTENSITY, DEFAULT_AMBIENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn head_on_light_follows_inverse_distance() {
        // Light 4 units straight above a floor point
        let b = shade(Vec3::UP, Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0), 2.0, 0.0).unwrap();
        assert_relative_eq!(b, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn ambient_lifts_and_scales() {
        let b = shade(Vec3::UP, Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0), 2.0, 0.25).unwrap();
        assert_relative_eq!(b, 0.5 * 0.75 + 0.25, epsilon = 1e-12);
    }

    #[test]
    fn back_lit_surface_gets_ambient_only() {
        let b = shade(Vec3::DOWN, Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0), 20.0, 0.3).unwrap();
        assert_relative_eq!(b, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn normal_length_does_not_matter() {
        let light = PointLight::new(Vec3::new(1.0, 3.0, 2.0), 5.0, 0.1);
        let point = Vec3::new(0.2, 0.0, -0.4);
        let n = Vec3::new(0.3, 1.0, 0.2);
        assert_relative_eq!(
            light.brightness(n, point).unwrap(),
            light.brightness(n * 17.0, point).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn brightness_may_exceed_one() {
        let b = shade(Vec3::UP, Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), 20.0, 0.25).unwrap();
        assert!(b > 1.0);
    }

    #[test]
    fn degenerate_inputs_are_unshadeable() {
        assert_eq!(shade(Vec3::UP, Vec3::ONE, Vec3::ONE, 1.0, 0.2), None);
        assert_eq!(shade(Vec3::ZERO, Vec3::ZERO, Vec3::ONE, 1.0, 0.2), None);
    }

    #[test]
    fn brighter_light_never_darkens() {
        // A tilted facet; sample points nearer to the light than its centroid
        let normal = Vec3::new(0.2, 1.0, 0.3);
        let centroid = Vec3::new(0.0, -1.0, -12.0);
        let light_position = DEFAULT_LIGHT_POSITION;
        let centroid_distance = (light_position - centroid).magnitude();
        let samples = [
            Vec3::new(-3.0, -1.5, -10.0),
            Vec3::new(-1.0, -1.2, -11.0),
            Vec3::new(-6.0, -0.5, -8.0),
            Vec3::new(2.0, -1.0, -9.0),
        ];
        for point in samples {
            assert!((light_position - point).magnitude() < centroid_distance);
            let mut previous = f64::NEG_INFINITY;
            for intensity in [0.0, 0.5, 1.0, 5.0, 20.0, 100.0] {
                let b = shade(normal, point, light_position, intensity, 0.25).unwrap();
                assert!(b >= previous, "{intensity} darkened {point:?}");
                previous = b;
            }
        }
    }

    #[test]
    fn default_light_matches_constants() {
        let light = PointLight::default();
        assert_eq!(light.position, DEFAULT_LIGHT_POSITION);
        assert_eq!(light.intensity, DEFAULT_INTENSITY);
        assert_eq!(light.ambient, DEFAULT_AMBIENT);
    }
}
