//! Frame orchestration: transforms meshes through the camera and hands
//! screen-space triangles to the rasterizer.

use tracing::debug;

use crate::camera::Camera;
use crate::colors;
use crate::error::RenderError;
use crate::light::{self, Light, Material};
use crate::math::{Mat3, Vec2, Vec3, EPSILON};
use crate::mesh::{Mesh, Polygon};
use crate::texture::{Texture, TextureCache};
use crate::transform::Transform;

use super::framebuffer::{DepthBuffer, PixelSurface};
use super::rasterizer;
use super::shader::{FlatShader, GouraudShader, TextureModulateShader, TextureShader};

/// How triangles are drawn, one variant per combination of the wireframe,
/// textured, and lit flags.
///
/// Wireframe alone means wireframe only: the fill stage is skipped
/// entirely rather than drawn and painted over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Solid,
    Wireframe,
    Textured,
    TexturedWireframe,
    Lit,
    LitWireframe,
    TexturedLit,
    TexturedLitWireframe,
}

/// The fill stage a mode selects, separated from its wireframe overlay.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Fill {
    None,
    Solid,
    Textured,
    Lit,
    TexturedLit,
}

impl RenderMode {
    /// Maps the three display flags onto a mode. Total over all eight
    /// combinations.
    pub fn from_flags(wireframe: bool, textured: bool, lit: bool) -> Self {
        match (wireframe, textured, lit) {
            (false, false, false) => Self::Solid,
            (true, false, false) => Self::Wireframe,
            (false, true, false) => Self::Textured,
            (true, true, false) => Self::TexturedWireframe,
            (false, false, true) => Self::Lit,
            (true, false, true) => Self::LitWireframe,
            (false, true, true) => Self::TexturedLit,
            (true, true, true) => Self::TexturedLitWireframe,
        }
    }

    pub fn wireframe(self) -> bool {
        matches!(
            self,
            Self::Wireframe
                | Self::TexturedWireframe
                | Self::LitWireframe
                | Self::TexturedLitWireframe
        )
    }

    pub fn textured(self) -> bool {
        matches!(
            self,
            Self::Textured
                | Self::TexturedWireframe
                | Self::TexturedLit
                | Self::TexturedLitWireframe
        )
    }

    pub fn lit(self) -> bool {
        matches!(
            self,
            Self::Lit | Self::LitWireframe | Self::TexturedLit | Self::TexturedLitWireframe
        )
    }

    fn fill(self) -> Fill {
        match self {
            Self::Wireframe => Fill::None,
            Self::Solid => Fill::Solid,
            Self::Textured | Self::TexturedWireframe => Fill::Textured,
            Self::Lit | Self::LitWireframe => Fill::Lit,
            Self::TexturedLit | Self::TexturedLitWireframe => Fill::TexturedLit,
        }
    }
}

/// Owns the depth buffer and per-frame policy; borrows everything else.
///
/// The renderer never holds meshes, materials, lights, or textures. They
/// are passed into each frame so hosts keep full ownership of scene data.
pub struct Renderer {
    width: u32,
    height: u32,
    depth: DepthBuffer,
    pub mode: RenderMode,
    pub backface_culling: bool,
    /// Re-aim the first directional light along the camera's view
    /// direction every frame.
    pub light_follows_camera: bool,
    pub clear_color: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth: DepthBuffer::new(width, height),
            mode: RenderMode::default(),
            backface_culling: true,
            light_follows_camera: false,
            clear_color: colors::BACKGROUND,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.depth.resize(width, height);
    }

    /// Renders one frame in the renderer's current mode.
    ///
    /// Validation happens before the surface is touched; on error the
    /// previous frame's pixels are left intact.
    #[allow(clippy::too_many_arguments)]
    pub fn render_frame<P: PixelSurface>(
        &mut self,
        surface: &mut P,
        camera: &Camera,
        mesh: &Mesh,
        transform: &Transform,
        material: &Material,
        lights: &[Light],
        textures: &TextureCache,
    ) -> Result<(), RenderError> {
        self.render_pass(self.mode, surface, camera, mesh, transform, material, lights, textures)
    }

    /// Wireframe-only pass, independent of the configured mode.
    pub fn render_wireframe<P: PixelSurface>(
        &mut self,
        surface: &mut P,
        camera: &Camera,
        mesh: &Mesh,
        transform: &Transform,
    ) -> Result<(), RenderError> {
        self.render_pass(
            RenderMode::Wireframe,
            surface,
            camera,
            mesh,
            transform,
            &Material::default(),
            &[],
            &TextureCache::new(),
        )
    }

    /// Unlit flat-color pass.
    pub fn render_solid<P: PixelSurface>(
        &mut self,
        surface: &mut P,
        camera: &Camera,
        mesh: &Mesh,
        transform: &Transform,
        material: &Material,
    ) -> Result<(), RenderError> {
        self.render_pass(
            RenderMode::Solid,
            surface,
            camera,
            mesh,
            transform,
            material,
            &[],
            &TextureCache::new(),
        )
    }

    /// Gouraud-shaded pass with the given lights.
    pub fn render_lit<P: PixelSurface>(
        &mut self,
        surface: &mut P,
        camera: &Camera,
        mesh: &Mesh,
        transform: &Transform,
        material: &Material,
        lights: &[Light],
    ) -> Result<(), RenderError> {
        self.render_pass(
            RenderMode::Lit,
            surface,
            camera,
            mesh,
            transform,
            material,
            lights,
            &TextureCache::new(),
        )
    }

    /// Unlit textured pass.
    pub fn render_textured<P: PixelSurface>(
        &mut self,
        surface: &mut P,
        camera: &Camera,
        mesh: &Mesh,
        transform: &Transform,
        material: &Material,
        textures: &TextureCache,
    ) -> Result<(), RenderError> {
        self.render_pass(
            RenderMode::Textured,
            surface,
            camera,
            mesh,
            transform,
            material,
            &[],
            textures,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn render_pass<P: PixelSurface>(
        &mut self,
        mode: RenderMode,
        surface: &mut P,
        camera: &Camera,
        mesh: &Mesh,
        transform: &Transform,
        material: &Material,
        lights: &[Light],
        textures: &TextureCache,
    ) -> Result<(), RenderError> {
        mesh.validate()?;

        if surface.width() != self.width || surface.height() != self.height {
            self.resize(surface.width(), surface.height());
        }

        let view = camera.view_matrix()?;
        let projection = camera.projection_matrix();
        let model = transform.matrix();
        let normal_matrix = transform.normal_matrix();

        // Resolve the texture before touching the surface so a missing
        // key aborts without clearing the previous frame.
        let texture: Option<&Texture> = if mode.textured() {
            match &material.texture {
                Some(key) => Some(
                    textures
                        .get(key)
                        .ok_or_else(|| RenderError::MissingTexture(key.clone()))?,
                ),
                None => None,
            }
        } else {
            None
        };

        let aimed;
        let lights: &[Light] = if self.light_follows_camera && mode.lit() {
            aimed = aim_primary_light(lights, camera)?;
            &aimed
        } else {
            lights
        };

        surface.clear(self.clear_color);
        self.depth.clear();

        let width = self.width as f32;
        let height = self.height as f32;
        let camera_position = camera.position();
        let fill = mode.fill();

        let mut drawn = 0usize;
        let mut culled = 0usize;
        let mut clipped = 0usize;

        for polygon in &mesh.polygons {
            if polygon.vertices.len() < 3 {
                continue;
            }
            for i in 1..polygon.vertices.len() - 1 {
                let corners = [0, i, i + 1];
                let local = corners.map(|c| mesh.vertices[polygon.vertices[c]]);
                let world = local.map(|p| (model * p.extend(1.0)).truncate());
                let view_pos = world.map(|p| (view * p.extend(1.0)).truncate());

                if self.backface_culling {
                    let normal =
                        (view_pos[1] - view_pos[0]).cross(view_pos[2] - view_pos[0]);
                    // The camera sits at the view-space origin
                    if normal.dot(-view_pos[0]) < 0.0 {
                        culled += 1;
                        continue;
                    }
                }

                let clip = view_pos.map(|p| projection * p.extend(1.0));
                if clip.iter().any(|c| c.w <= EPSILON) {
                    clipped += 1;
                    continue;
                }
                let screen = clip.map(|c| {
                    Vec3::new(
                        (c.x / c.w + 1.0) * 0.5 * width,
                        (1.0 - c.y / c.w) * 0.5 * height,
                        c.z / c.w,
                    )
                });

                match fill {
                    Fill::None => {}
                    Fill::Solid => {
                        let shader = FlatShader {
                            color: material.base_color,
                        };
                        rasterizer::fill_triangle(surface, &mut self.depth, screen, &shader);
                    }
                    Fill::Textured => match (texture, corner_uvs(mesh, polygon, corners)) {
                        (Some(tex), Some(uvs)) => {
                            let shader = TextureShader {
                                texture: tex,
                                uvs,
                                mode: material.sample_mode,
                            };
                            rasterizer::fill_triangle(surface, &mut self.depth, screen, &shader);
                        }
                        _ => {
                            let shader = FlatShader {
                                color: material.base_color,
                            };
                            rasterizer::fill_triangle(surface, &mut self.depth, screen, &shader);
                        }
                    },
                    Fill::Lit => {
                        let shader = gouraud_shader(
                            mesh,
                            polygon,
                            corners,
                            &world,
                            &normal_matrix,
                            camera_position,
                            material,
                            lights,
                        );
                        rasterizer::fill_triangle(surface, &mut self.depth, screen, &shader);
                    }
                    Fill::TexturedLit => {
                        let normals =
                            corner_normals(mesh, polygon, corners, &world, &normal_matrix);
                        match (texture, corner_uvs(mesh, polygon, corners)) {
                            (Some(tex), Some(uvs)) => {
                                let intensities = [0, 1, 2].map(|k| {
                                    light::intensity_at(world[k], normals[k], lights)
                                });
                                let shader = TextureModulateShader {
                                    texture: tex,
                                    uvs,
                                    mode: material.sample_mode,
                                    intensities,
                                };
                                rasterizer::fill_triangle(
                                    surface,
                                    &mut self.depth,
                                    screen,
                                    &shader,
                                );
                            }
                            _ => {
                                let shader = gouraud_shader(
                                    mesh,
                                    polygon,
                                    corners,
                                    &world,
                                    &normal_matrix,
                                    camera_position,
                                    material,
                                    lights,
                                );
                                rasterizer::fill_triangle(
                                    surface,
                                    &mut self.depth,
                                    screen,
                                    &shader,
                                );
                            }
                        }
                    }
                }

                if mode.wireframe() {
                    rasterizer::draw_triangle_wireframe(
                        surface,
                        &mut self.depth,
                        screen,
                        colors::WIREFRAME,
                    );
                }
                drawn += 1;
            }
        }

        debug!(?mode, drawn, culled, clipped, "frame rendered");
        Ok(())
    }
}

/// Per-corner UVs, or `None` when the polygon carries no texture indices.
fn corner_uvs(mesh: &Mesh, polygon: &Polygon, corners: [usize; 3]) -> Option<[Vec2; 3]> {
    if polygon.uvs.is_empty() {
        return None;
    }
    Some(corners.map(|c| mesh.uvs[polygon.uvs[c]]))
}

/// Per-corner world-space unit normals; falls back to the face normal for
/// meshes without normal data.
fn corner_normals(
    mesh: &Mesh,
    polygon: &Polygon,
    corners: [usize; 3],
    world: &[Vec3; 3],
    normal_matrix: &Mat3,
) -> [Vec3; 3] {
    if polygon.normals.is_empty() {
        let face = (world[1] - world[0])
            .cross(world[2] - world[0])
            .normalize_or_zero();
        [face; 3]
    } else {
        corners.map(|c| (*normal_matrix * mesh.normals[polygon.normals[c]]).normalize_or_zero())
    }
}

#[allow(clippy::too_many_arguments)]
fn gouraud_shader(
    mesh: &Mesh,
    polygon: &Polygon,
    corners: [usize; 3],
    world: &[Vec3; 3],
    normal_matrix: &Mat3,
    camera_position: Vec3,
    material: &Material,
    lights: &[Light],
) -> GouraudShader {
    let normals = corner_normals(mesh, polygon, corners, world, normal_matrix);
    let colors = [0, 1, 2].map(|k| {
        let view_dir = (world[k] - camera_position).normalize_or_zero();
        light::shade(material, world[k], normals[k], view_dir, lights)
    });
    GouraudShader::new(colors)
}

/// Clones the light list with the first directional light re-aimed from
/// the camera toward its target.
fn aim_primary_light(lights: &[Light], camera: &Camera) -> Result<Vec<Light>, RenderError> {
    let mut aimed = lights.to_vec();
    for l in &mut aimed {
        if let Light::Directional { direction, .. } = l {
            *direction = light::follow_direction(camera.position(), camera.target())?;
            break;
        }
    }
    Ok(aimed)
}
