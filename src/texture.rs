//! Texture storage, sampling, and the texture cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Texture filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleMode {
    #[default]
    Nearest,
    Bilinear,
}

/// A 2D grid of ARGB8888 texels addressed by normalized (u, v).
///
/// # UV Convention
///
/// Both samplers wrap coordinates into [0, 1) with `u − floor(u)`. Texel
/// lookup maps `x = u·(width−1)` and `y = (1−v)·(height−1)`: the v axis is
/// flipped because image rows are stored top-down while the UV origin is
/// bottom-left. This is the one fixed convention of the crate.
pub struct Texture {
    data: Vec<u32>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Builds a texture from raw ARGB pixels, row-major, top row first.
    ///
    /// Returns `None` when the pixel count does not match the dimensions or
    /// either dimension is zero.
    pub fn from_pixels(data: Vec<u32>, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// Loads a texture from an image file (PNG, JPEG, ...).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        // RGBA bytes to packed ARGB
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Wrapped, v-flipped texel coordinates as floats in texel space.
    #[inline]
    fn texel_coords(&self, u: f32, v: f32) -> (f32, f32) {
        let u = u - u.floor();
        let v = v - v.floor();
        let x = u * (self.width - 1) as f32;
        let y = (1.0 - v) * (self.height - 1) as f32;
        (x, y)
    }

    #[inline]
    fn texel(&self, x: u32, y: u32) -> u32 {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.data[(y * self.width + x) as usize]
    }

    /// Nearest-neighbor sample.
    #[inline]
    pub fn sample_nearest(&self, u: f32, v: f32) -> u32 {
        let (x, y) = self.texel_coords(u, v);
        self.texel((x + 0.5) as u32, (y + 0.5) as u32)
    }

    /// Bilinear sample: blends the 4 nearest texel centers by the
    /// fractional offsets.
    #[inline]
    pub fn sample_bilinear(&self, u: f32, v: f32) -> u32 {
        let (x, y) = self.texel_coords(u, v);
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as u32, y0 as u32);

        let top = crate::colors::lerp_color(self.texel(x0, y0), self.texel(x0 + 1, y0), fx);
        let bottom =
            crate::colors::lerp_color(self.texel(x0, y0 + 1), self.texel(x0 + 1, y0 + 1), fx);
        crate::colors::lerp_color(top, bottom, fy)
    }

    /// Sample with the given filtering mode.
    #[inline]
    pub fn sample(&self, u: f32, v: f32, mode: SampleMode) -> u32 {
        match mode {
            SampleMode::Nearest => self.sample_nearest(u, v),
            SampleMode::Bilinear => self.sample_bilinear(u, v),
        }
    }
}

/// An explicit texture cache keyed by file path.
///
/// Owned by the host and passed into the renderer by reference; load and
/// evict are explicit, so texture lifetime is visible at the call site
/// instead of hiding in process-wide state.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<PathBuf, Texture>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and caches the texture at `path`; a second call for the same
    /// path is a lookup, not a reload.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<&Texture, image::ImageError> {
        let key = path.as_ref().to_path_buf();
        if !self.textures.contains_key(&key) {
            let texture = Texture::from_file(&key)?;
            self.textures.insert(key.clone(), texture);
        }
        Ok(&self.textures[&key])
    }

    /// Registers an already-built texture under a key.
    pub fn insert<P: AsRef<Path>>(&mut self, key: P, texture: Texture) {
        self.textures.insert(key.as_ref().to_path_buf(), texture);
    }

    pub fn get<P: AsRef<Path>>(&self, key: P) -> Option<&Texture> {
        self.textures.get(key.as_ref())
    }

    pub fn evict<P: AsRef<Path>>(&mut self, key: P) -> Option<Texture> {
        self.textures.remove(key.as_ref())
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 0xFFFF_FFFF;
    const K: u32 = 0xFF00_0000;

    /// 2x2 checkerboard: white/black over black/white, top row first.
    fn checkerboard() -> Texture {
        Texture::from_pixels(vec![W, K, K, W], 2, 2).unwrap()
    }

    #[test]
    fn from_pixels_validates_dimensions() {
        assert!(Texture::from_pixels(vec![0; 4], 2, 2).is_some());
        assert!(Texture::from_pixels(vec![0; 3], 2, 2).is_none());
        assert!(Texture::from_pixels(Vec::new(), 0, 0).is_none());
    }

    #[test]
    fn nearest_corners_hit_expected_texels() {
        let tex = checkerboard();
        // High v is the stored top row, low v the bottom row (v-flip)
        assert_eq!(tex.sample_nearest(0.1, 0.9), W);
        assert_eq!(tex.sample_nearest(0.9, 0.9), K);
        assert_eq!(tex.sample_nearest(0.1, 0.1), K);
        assert_eq!(tex.sample_nearest(0.9, 0.1), W);
    }

    #[test]
    fn sampling_wraps_out_of_range_uvs() {
        let tex = checkerboard();
        assert_eq!(tex.sample_nearest(2.25, 0.9), tex.sample_nearest(0.25, 0.9));
        assert_eq!(tex.sample_nearest(-0.75, 0.1), tex.sample_nearest(0.25, 0.1));
        // u = 1.0 wraps to 0.0
        assert_eq!(tex.sample_nearest(1.0, 0.9), tex.sample_nearest(0.0, 0.9));
    }

    #[test]
    fn bilinear_center_averages_neighbors() {
        let tex = checkerboard();
        // Halfway between all four texels: mean of two white and two black
        let mid = tex.sample_bilinear(0.5, 0.5);
        let (r, g, b) = crate::colors::unpack_color(mid);
        for c in [r, g, b] {
            assert!((c - 0.5).abs() < 0.01, "channel {c} not near 0.5");
        }
    }

    #[test]
    fn bilinear_on_texel_lattice_is_exact() {
        let tex = checkerboard();
        // (0, 0) lands exactly on the stored bottom-left texel
        assert_eq!(tex.sample_bilinear(0.0, 0.0), K);
        assert_eq!(tex.sample_bilinear(0.0, 0.0), tex.sample_nearest(0.0, 0.0));
    }

    #[test]
    fn cache_insert_get_evict() {
        let mut cache = TextureCache::new();
        assert!(cache.is_empty());
        cache.insert("checker", checkerboard());
        assert_eq!(cache.len(), 1);
        assert!(cache.get("checker").is_some());
        assert!(cache.get("missing").is_none());
        assert!(cache.evict("checker").is_some());
        assert!(cache.is_empty());
    }
}
