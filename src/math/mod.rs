//! Minimal vector and matrix algebra.
//!
//! Vectors are row vectors multiplied on the left of a matrix (`v * M`), so a
//! chain `v * A * B` applies `A` first. Translation lives in row 3.

pub mod mat4;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use vec3::Vec3;
pub use vec4::Vec4;
