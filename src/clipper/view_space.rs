//! View-space frustum clipping.
//!
//! Polygons are clipped in camera space, before projection, using the
//! Sutherland-Hodgman algorithm: the polygon is cut by one plane at a time and
//! the survivor of each cut feeds the next. Against a convex volume a convex
//! polygon stays convex, so a single polygon (or nothing) comes out.

use log::trace;

use crate::math::Vec3;
use crate::polygon::Vertex;

/// A plane given by an inward unit normal and a signed offset.
///
/// A point `p` is inside when `dot(p, normal) >= -distance`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f64,
}

impl Plane {
    pub fn new(normal: Vec3, distance: f64) -> Self {
        Self { normal, distance }
    }

    /// Signed distance from `point` to the plane.
    /// Positive = inside (same side as normal), negative = outside.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f64 {
        point.dot(self.normal) + self.distance
    }

    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        self.signed_distance(point) >= 0.0
    }
}

/// Which plane of the frustum, in clipping order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrustumPlane {
    Near,
    Far,
    Left,
    Right,
    Bottom,
    Top,
}

impl FrustumPlane {
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Near,
        FrustumPlane::Far,
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Bottom,
        FrustumPlane::Top,
    ];
}

/// The visible volume of a perspective camera at the origin looking down -Z.
///
/// Built once per projection change. All plane normals point inward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Creates the frustum for a view window of half extents `right` × `top`
    /// on the near plane.
    pub fn new(near: f64, far: f64, right: f64, top: f64) -> Self {
        // Side planes pass through the eye; their normals are built unnormalized
        // from the window edge slope and then normalized.
        Self {
            planes: [
                // Near plane: -z >= near
                Plane::new(Vec3::new(0.0, 0.0, -1.0), -near),
                // Far plane: -z <= far
                Plane::new(Vec3::new(0.0, 0.0, 1.0), far),
                // Left plane: normal points right-ish, into the frustum
                Plane::new(Vec3::new(near, 0.0, -right).normalize(), 0.0),
                // Right plane: normal points left-ish
                Plane::new(Vec3::new(-near, 0.0, -right).normalize(), 0.0),
                // Bottom plane: normal points up-ish
                Plane::new(Vec3::new(0.0, near, -top).normalize(), 0.0),
                // Top plane: normal points down-ish
                Plane::new(Vec3::new(0.0, -near, -top).normalize(), 0.0),
            ],
        }
    }

    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    pub fn plane(&self, which: FrustumPlane) -> &Plane {
        &self.planes[which as usize]
    }

    /// True when `point` is inside (or on) all six planes.
    pub fn contains(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.contains(point))
    }

    /// Like [`Frustum::contains`], allowing points up to `epsilon` outside.
    pub fn contains_within(&self, point: Vec3, epsilon: f64) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) >= -epsilon)
    }

    /// Clip a polygon against all frustum planes.
    ///
    /// Returns the pieces that are fully inside; empty when the polygon is
    /// entirely outside, degenerate, or could not be clipped consistently.
    pub fn clip_polygon(&self, vertices: &[Vertex]) -> Vec<Vec<Vertex>> {
        if vertices.len() < 3 {
            return Vec::new();
        }

        let mut current = vertices.to_vec();
        for (plane, which) in self.planes.iter().zip(FrustumPlane::ALL) {
            match clip_against_plane(&current, plane) {
                PlaneClip::Unchanged => {}
                PlaneClip::Clipped(clipped) => current = clipped,
                PlaneClip::Outside => return Vec::new(),
                PlaneClip::Inconsistent => {
                    trace!("abandoning clip of {}-gon at {which:?} plane", current.len());
                    return Vec::new();
                }
            }
        }

        vec![current]
    }
}

/// Clips `vertices` against every plane of `frustum`.
///
/// Free-function form of [`Frustum::clip_polygon`].
pub fn clip_polygon(vertices: &[Vertex], frustum: &Frustum) -> Vec<Vec<Vertex>> {
    frustum.clip_polygon(vertices)
}

/// Result of cutting a polygon with one plane.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaneClip {
    /// No vertex is outside; the input passes through as is.
    Unchanged,
    /// Every vertex is outside; nothing is left to draw.
    Outside,
    /// Some vertices were outside and were replaced by edge intersections.
    Clipped(Vec<Vertex>),
    /// An intersection could not be placed on its edge (non-finite input or
    /// numerically inconsistent classification). The polygon is dropped.
    Inconsistent,
}

/// Clip one polygon against a single plane using Sutherland-Hodgman.
///
/// One outside vertex of a triangle becomes two intersections (a quad); two
/// outside vertices are each replaced by their intersection. New vertices
/// interpolate every attribute with the same parameter as the position.
pub fn clip_against_plane(vertices: &[Vertex], plane: &Plane) -> PlaneClip {
    let distances: Vec<f64> = vertices
        .iter()
        .map(|v| plane.signed_distance(v.position))
        .collect();

    // NaN distances compare false and count as outside
    let outside = distances.iter().filter(|&&d| !(d >= 0.0)).count();
    if outside == 0 {
        return PlaneClip::Unchanged;
    }
    if outside == vertices.len() {
        return PlaneClip::Outside;
    }

    let mut output = Vec::with_capacity(vertices.len() + 1);

    for i in 0..vertices.len() {
        let j = (i + 1) % vertices.len();
        let (current, next) = (&vertices[i], &vertices[j]);
        let (d1, d2) = (distances[i], distances[j]);

        let current_inside = d1 >= 0.0;
        let next_inside = d2 >= 0.0;

        if current_inside {
            output.push(*current);
        }

        if current_inside != next_inside {
            // Edge crosses the plane, add the intersection
            let t = d1 / (d1 - d2);
            if !(0.0..=1.0).contains(&t) {
                return PlaneClip::Inconsistent;
            }
            output.push(current.lerp(next, t));
        }
    }

    if output.len() < 3 {
        return PlaneClip::Outside;
    }
    PlaneClip::Clipped(output)
}
