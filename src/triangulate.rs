//! Fan triangulation of convex polygons.

use crate::polygon::Vertex;

/// Splits a convex polygon into `k - 2` triangles.
///
/// Repeatedly emits the first three remaining vertices as a triangle and then
/// drops the second one, so triangle `i` is `[0, i + 1, i + 2]`. Attributes
/// travel inside each [`Vertex`], so the shading weights can never drift out
/// of step with the positions. The input is left untouched.
///
/// Non-convex input still yields `k - 2` triangles, they just won't cover the
/// polygon correctly. Fewer than three vertices yield nothing.
pub fn triangulate(polygon: &[Vertex]) -> Vec<(Vertex, Vertex, Vertex)> {
    if polygon.len() < 3 {
        return Vec::new();
    }

    let mut remaining = polygon.to_vec();
    let mut triangles = Vec::with_capacity(polygon.len() - 2);

    while remaining.len() >= 3 {
        triangles.push((remaining[0], remaining[1], remaining[2]));
        remaining.remove(1);
    }

    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use approx::assert_relative_eq;

    fn area(a: Vec3, b: Vec3, c: Vec3) -> f64 {
        (b - a).cross(c - a).magnitude() * 0.5
    }

    /// Regular k-gon in the z = -5 plane, shade = vertex index.
    fn regular_polygon(k: usize, radius: f64) -> Vec<Vertex> {
        (0..k)
            .map(|i| {
                let angle = i as f64 / k as f64 * std::f64::consts::TAU;
                Vertex::new(Vec3::new(
                    radius * angle.cos(),
                    radius * angle.sin(),
                    -5.0,
                ))
                .with_shade(i as f64)
            })
            .collect()
    }

    #[test]
    fn triangle_passes_through() {
        let tri = regular_polygon(3, 1.0);
        let out = triangulate(&tri);
        assert_eq!(out, vec![(tri[0], tri[1], tri[2])]);
    }

    #[test]
    fn k_gon_gives_k_minus_two_triangles() {
        for k in 3..12 {
            assert_eq!(triangulate(&regular_polygon(k, 2.0)).len(), k - 2);
        }
    }

    #[test]
    fn triangle_areas_sum_to_polygon_area() {
        for k in 3..12 {
            let radius = 2.0;
            let polygon = regular_polygon(k, radius);
            let expected =
                0.5 * k as f64 * radius * radius * (std::f64::consts::TAU / k as f64).sin();
            let total: f64 = triangulate(&polygon)
                .iter()
                .map(|(a, b, c)| area(a.position, b.position, c.position))
                .sum();
            assert_relative_eq!(total, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn fan_keeps_attributes_with_vertices() {
        let triangles = triangulate(&regular_polygon(6, 1.0));
        for (i, (a, b, c)) in triangles.iter().enumerate() {
            assert_eq!(a.shade, Some(0.0));
            assert_eq!(b.shade, Some((i + 1) as f64));
            assert_eq!(c.shade, Some((i + 2) as f64));
        }
    }

    #[test]
    fn degenerate_input_yields_nothing() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&regular_polygon(2, 1.0)).is_empty());
    }

    #[test]
    fn input_is_not_modified() {
        let polygon = regular_polygon(5, 1.0);
        let copy = polygon.clone();
        let _ = triangulate(&polygon);
        assert_eq!(polygon, copy);
    }
}
