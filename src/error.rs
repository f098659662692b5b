//! Error type for configuration and output failures.
//!
//! The per-frame pipeline never fails: degenerate or off-screen geometry just
//! produces no pixels. Errors only come from building a renderer with bad
//! parameters or from writing a finished frame somewhere.

/// Errors reported by [`crate::Engine`], [`crate::Projection`] and frame export.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The framebuffer must have at least one pixel in each direction.
    #[error("invalid framebuffer size {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// Clip distances must satisfy `0 < near < far`.
    #[error("invalid clip range: near = {near}, far = {far}")]
    InvalidClipRange { near: f64, far: f64 },
    /// The half field of view must lie strictly between 0 and 90 degrees.
    #[error("invalid half field of view: {0} rad")]
    InvalidFieldOfView(f64),
    /// Supersampling supports factors 1 through 4.
    #[error("unsupported supersample factor {0}")]
    InvalidSupersample(u32),
    /// The projection matrix could not be inverted.
    #[error("projection matrix is singular")]
    SingularProjection,
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
