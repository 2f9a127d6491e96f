//! Screen-space half of the pipeline: surfaces, shaders, rasterization,
//! and the frame orchestrator.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;
pub mod shader;

pub use framebuffer::{DepthBuffer, FrameBuffer, PixelSurface};
pub use renderer::{RenderMode, Renderer};
