//! Framebuffer and triangle rasterization.

pub mod framebuffer;
pub mod rasterizer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{
    edge_function, rasterize_with_shader, EdgeStepper, FlatShader, GouraudShader, PixelShader,
    RasterOptions, Rasterizer, ShadingMode, Triangle,
};
