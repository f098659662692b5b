//! A CPU software rasterizer.
//!
//! Camera-space polygons go in, a depth-correct shaded image comes out. Each
//! polygon is backface culled, lit, clipped against the view frustum,
//! fan-triangulated and scan converted with edge functions into a
//! color + depth framebuffer. Nothing touches a GPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use softraster::prelude::*;
//!
//! let mut engine = Engine::new(RenderConfig::default())?;
//! let frame = engine.render(&demo_scene(0.0, true), Some(&PointLight::default()));
//! frame.save("frame.png")?;
//! ```

pub mod clipper;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod polygon;
pub mod projection;
pub mod render;
pub mod transform;
pub mod triangulate;
#[cfg(feature = "viewer")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use clipper::{clip_polygon, Frustum, Plane};
pub use colors::Color;
pub use config::{Interpolation, RenderConfig};
pub use engine::{Engine, FrameStats};
pub use error::RenderError;
pub use light::{shade, PointLight};
pub use polygon::{Polygon, Vertex};
pub use projection::{build_projection, Projection, RasterVertex};
pub use render::{FrameBuffer, Rasterizer, ShadingMode};
pub use triangulate::triangulate;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softraster::prelude::*;
/// ```
pub mod prelude {
    // Pipeline
    pub use crate::config::{Interpolation, RenderConfig};
    pub use crate::engine::{Engine, FrameStats};
    pub use crate::error::RenderError;
    pub use crate::light::PointLight;
    pub use crate::polygon::{Polygon, Vertex};
    pub use crate::projection::Projection;

    // Output
    pub use crate::colors::Color;
    pub use crate::render::FrameBuffer;

    // Scene helpers
    pub use crate::mesh::{demo_scene, Mesh};
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::{Mat4, Vec3, Vec4};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::projection::RasterVertex;
    pub use crate::render::{rasterize_with_shader, FlatShader, FrameBuffer, RasterOptions};
}
