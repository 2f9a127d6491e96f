//! Per-pixel shading strategies for the triangle rasterizer.

use crate::colors::{self, unpack_alpha, unpack_color};
use crate::math::Vec2;
use crate::texture::{SampleMode, Texture};

/// Interpolated lit intensities never drop below this, so modulated
/// texels stay legible even on faces turned away from every light.
const INTENSITY_FLOOR: f32 = 0.2;

/// Computes the color of one covered pixel from its barycentric weights.
///
/// The rasterizer hands each shader the weights of the pixel center with
/// respect to the triangle's three corners; the shader interpolates
/// whatever per-vertex attributes it carries.
pub trait PixelShader {
    fn shade(&self, lambda: [f32; 3]) -> u32;
}

/// One uniform color for the whole triangle.
pub struct FlatShader {
    pub color: u32,
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _lambda: [f32; 3]) -> u32 {
        self.color
    }
}

/// Smooth shading from three per-vertex colors.
///
/// Channels are interpolated independently in unpacked form so packed
/// ARGB rounding happens once, at the end.
pub struct GouraudShader {
    channels: [(f32, f32, f32); 3],
    alphas: [f32; 3],
}

impl GouraudShader {
    pub fn new(colors: [u32; 3]) -> Self {
        Self {
            channels: [
                unpack_color(colors[0]),
                unpack_color(colors[1]),
                unpack_color(colors[2]),
            ],
            alphas: colors.map(unpack_alpha),
        }
    }
}

impl PixelShader for GouraudShader {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        let mut r = 0.0;
        let mut g = 0.0;
        let mut b = 0.0;
        let mut a = 0.0;
        for i in 0..3 {
            let (cr, cg, cb) = self.channels[i];
            r += lambda[i] * cr;
            g += lambda[i] * cg;
            b += lambda[i] * cb;
            a += lambda[i] * self.alphas[i];
        }
        colors::pack_color(r, g, b, a)
    }
}

/// Samples a texture through interpolated UVs.
pub struct TextureShader<'a> {
    pub texture: &'a Texture,
    pub uvs: [Vec2; 3],
    pub mode: SampleMode,
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        let mut uv = Vec2::ZERO;
        for (l, corner) in lambda.iter().zip(self.uvs.iter()) {
            uv = uv + *corner * *l;
        }
        self.texture.sample(uv.x, uv.y, self.mode)
    }
}

/// Textured shading modulated by per-vertex lighting intensity.
pub struct TextureModulateShader<'a> {
    pub texture: &'a Texture,
    pub uvs: [Vec2; 3],
    pub mode: SampleMode,
    pub intensities: [f32; 3],
}

impl PixelShader for TextureModulateShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        let mut uv = Vec2::ZERO;
        let mut intensity = 0.0;
        for i in 0..3 {
            uv = uv + self.uvs[i] * lambda[i];
            intensity += self.intensities[i] * lambda[i];
        }
        let intensity = intensity.clamp(INTENSITY_FLOOR, 1.0);
        let texel = self.texture.sample(uv.x, uv.y, self.mode);
        colors::modulate(texel, intensity)
    }
}
