//! Polygon clipping against the view frustum.
//!
//! Clipping happens in view/camera space, before projection, using the
//! Sutherland-Hodgman algorithm against six inward-facing planes. The
//! [`Frustum`] is derived from a [`crate::Projection`] and only needs to be
//! rebuilt when the projection parameters change.

mod view_space;

pub use view_space::{clip_against_plane, clip_polygon, Frustum, FrustumPlane, Plane, PlaneClip};
