//! Camera-space vertices and polygons, the input of the pipeline.

use crate::colors::Color;
use crate::math::Vec3;

/// A camera-space vertex with the attributes carried through clipping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    /// Per-vertex normal; when every vertex of a facet has one the facet is
    /// Gouraud shaded.
    pub normal: Option<Vec3>,
    /// Brightness after light evaluation.
    pub shade: Option<f64>,
}

impl Vertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            normal: None,
            shade: None,
        }
    }

    pub fn with_normal(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal: Some(normal),
            shade: None,
        }
    }

    pub fn with_shade(mut self, shade: f64) -> Self {
        self.shade = Some(shade);
        self
    }

    /// Interpolates position and every attribute by the same `t`.
    ///
    /// An attribute missing on either end is taken from whichever end has it.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            normal: lerp_option(self.normal, other.normal, |a, b| a.lerp(b, t)),
            shade: lerp_option(self.shade, other.shade, |a, b| a + (b - a) * t),
        }
    }
}

impl From<Vec3> for Vertex {
    fn from(position: Vec3) -> Self {
        Self::new(position)
    }
}

fn lerp_option<T>(a: Option<T>, b: Option<T>, lerp: impl FnOnce(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(lerp(a, b)),
        (a, b) => a.or(b),
    }
}

/// An ordered, convex, camera-space facet.
///
/// Vertex order is the winding order: counter-clockwise when seen from the
/// side the facet normal points to.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    /// Facet normal in camera space (need not be unit length).
    pub normal: Vec3,
    pub color: Color,
    /// Exempt from backface culling.
    pub double_sided: bool,
}

impl Polygon {
    /// Builds a polygon whose facet normal is derived from the winding of its
    /// first three vertices.
    pub fn new(vertices: Vec<Vertex>, color: Color) -> Self {
        let normal = facet_normal(&vertices);
        Self {
            vertices,
            normal,
            color,
            double_sided: false,
        }
    }

    pub fn with_normal(vertices: Vec<Vertex>, normal: Vec3, color: Color) -> Self {
        Self {
            vertices,
            normal,
            color,
            double_sided: false,
        }
    }

    pub fn double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }

    /// True when every vertex carries its own normal.
    pub fn has_vertex_normals(&self) -> bool {
        !self.vertices.is_empty() && self.vertices.iter().all(|v| v.normal.is_some())
    }

    /// Average of the vertex positions.
    pub fn centroid(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vec3::ZERO, |acc, v| acc + v.position);
        sum / self.vertices.len() as f64
    }

    /// True when the facet normal points away from a camera at the origin.
    pub fn is_back_facing(&self) -> bool {
        match self.vertices.first() {
            Some(v) => self.normal.dot(v.position) > 0.0,
            None => false,
        }
    }
}

/// Normal of the plane through the first three vertices (right-handed,
/// counter-clockwise winding). Zero when there are fewer than three.
pub fn facet_normal(vertices: &[Vertex]) -> Vec3 {
    match vertices {
        [a, b, c, ..] => (b.position - a.position).cross(c.position - a.position),
        _ => Vec3::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn facing_camera() -> Polygon {
        Polygon::new(
            vec![
                Vec3::new(-1.0, -1.0, -5.0).into(),
                Vec3::new(1.0, -1.0, -5.0).into(),
                Vec3::new(0.0, 1.0, -5.0).into(),
            ],
            Color::RED,
        )
    }

    #[test]
    fn counter_clockwise_facet_faces_camera() {
        let polygon = facing_camera();
        assert!(polygon.normal.z > 0.0);
        assert!(!polygon.is_back_facing());
    }

    #[test]
    fn reversed_winding_is_back_facing() {
        let mut polygon = facing_camera();
        polygon.vertices.reverse();
        polygon.normal = facet_normal(&polygon.vertices);
        assert!(polygon.is_back_facing());
    }

    #[test]
    fn lerp_interpolates_attributes_with_position() {
        let a = Vertex::with_normal(Vec3::ZERO, Vec3::UP).with_shade(0.0);
        let b = Vertex::with_normal(Vec3::new(2.0, 0.0, 0.0), Vec3::BACK).with_shade(1.0);
        let mid = a.lerp(&b, 0.25);
        assert_relative_eq!(mid.position, Vec3::new(0.5, 0.0, 0.0));
        assert_relative_eq!(mid.shade.unwrap(), 0.25);
        assert_relative_eq!(mid.normal.unwrap(), Vec3::new(0.0, 0.75, 0.25));
    }

    #[test]
    fn lerp_keeps_one_sided_attribute() {
        let a = Vertex::new(Vec3::ZERO).with_shade(0.7);
        let b = Vertex::new(Vec3::ONE);
        assert_eq!(a.lerp(&b, 0.5).shade, Some(0.7));
        assert_eq!(a.lerp(&b, 0.5).normal, None);
    }

    #[test]
    fn centroid_averages_positions() {
        assert_relative_eq!(facing_camera().centroid(), Vec3::new(0.0, -1.0 / 3.0, -5.0));
    }
}
