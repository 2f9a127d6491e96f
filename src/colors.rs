//! ARGB8888 color packing and blending helpers.
//!
//! Colors cross the pipeline as packed `u32` values (the pixel-surface
//! format); shading math unpacks to [0, 1] floats and repacks at the end.

pub const BACKGROUND: u32 = 0xFF10_1018;
pub const FILL: u32 = 0xFFC0_C0C0;
pub const WIREFRAME: u32 = 0xFF3F_D97B;
pub const VERTEX: u32 = 0xFFFF_D24A;

/// Pack [0, 1] float channels into ARGB8888. Channels are clamped.
#[inline]
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> u32 {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
    (to_byte(a) << 24) | (to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b)
}

/// Unpack the RGB channels of an ARGB8888 color into [0, 1] floats.
#[inline]
pub fn unpack_color(color: u32) -> (f32, f32, f32) {
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    (r, g, b)
}

/// Unpack the alpha channel into a [0, 1] float.
#[inline]
pub fn unpack_alpha(color: u32) -> f32 {
    ((color >> 24) & 0xFF) as f32 / 255.0
}

/// Scale the RGB channels by an intensity, preserving alpha.
#[inline]
pub fn modulate(color: u32, intensity: f32) -> u32 {
    let (r, g, b) = unpack_color(color);
    let a = unpack_alpha(color);
    pack_color(r * intensity, g * intensity, b * intensity, a)
}

/// Linear interpolation between two colors, per channel.
#[inline]
pub fn lerp_color(from: u32, to: u32, t: f32) -> u32 {
    let (r0, g0, b0) = unpack_color(from);
    let (r1, g1, b1) = unpack_color(to);
    let a0 = unpack_alpha(from);
    let a1 = unpack_alpha(to);
    pack_color(
        r0 + (r1 - r0) * t,
        g0 + (g1 - g0) * t,
        b0 + (b1 - b0) * t,
        a0 + (a1 - a0) * t,
    )
}

/// Channel-saturating additive blend; alpha is taken from `base`.
#[inline]
pub fn blend_add(base: u32, addend: u32) -> u32 {
    let (r0, g0, b0) = unpack_color(base);
    let (r1, g1, b1) = unpack_color(addend);
    pack_color(r0 + r1, g0 + g1, b0 + b1, unpack_alpha(base))
}
