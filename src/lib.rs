//! A CPU-based software 3D rendering pipeline.
//!
//! Meshes are transformed through a model/view/projection chain, backface
//! culled, and rasterized with edge functions into any [`PixelSurface`]
//! the host provides. Depth buffering, Phong lighting with flat and
//! Gouraud shading, texture mapping with nearest and bilinear sampling,
//! and wireframe overlays are all done in software; the crate has no GPU
//! or windowing dependencies.
//!
//! A minimal frame:
//!
//! ```
//! use softpipe::camera::Camera;
//! use softpipe::light::Material;
//! use softpipe::math::Vec3;
//! use softpipe::mesh::Mesh;
//! use softpipe::projection::Projection;
//! use softpipe::render::{FrameBuffer, Renderer};
//! use softpipe::texture::TextureCache;
//! use softpipe::transform::Transform;
//!
//! let projection = Projection::from_degrees(60.0, 4.0 / 3.0, 0.1, 100.0)?;
//! let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, projection);
//! let mut surface = FrameBuffer::new(640, 480);
//! let mut renderer = Renderer::new(640, 480);
//! renderer.render_frame(
//!     &mut surface,
//!     &camera,
//!     &Mesh::unit_cube(),
//!     &Transform::new(),
//!     &Material::default(),
//!     &[],
//!     &TextureCache::new(),
//! )?;
//! # Ok::<(), softpipe::error::RenderError>(())
//! ```

pub mod camera;
pub mod colors;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod meshops;
pub mod projection;
pub mod render;
pub mod texture;
pub mod transform;

pub use camera::Camera;
pub use error::{MathError, RenderError};
pub use light::{Light, Material};
pub use mesh::{Mesh, Polygon};
pub use projection::Projection;
pub use render::{FrameBuffer, PixelSurface, RenderMode, Renderer};
pub use texture::{Texture, TextureCache};
pub use transform::Transform;
