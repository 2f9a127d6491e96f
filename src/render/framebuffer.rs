//! Pixel surfaces and the depth buffer.

/// The contract the host's pixel surface must satisfy.
///
/// This is all the renderer ever asks of its output: dimensions, clearing,
/// and per-pixel writes. Out-of-bounds writes are silently ignored so the
/// rasterizer can clamp loosely at its edges.
pub trait PixelSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Fill the whole surface with one color.
    fn clear(&mut self, color: u32);
    /// Write one pixel; ignores coordinates outside the surface.
    fn set_pixel(&mut self, x: i32, y: i32, color: u32);
    /// Read one pixel, or `None` outside the surface.
    fn pixel(&self, x: i32, y: i32) -> Option<u32>;
}

/// An owning ARGB8888 pixel surface for offline rendering and tests.
pub struct FrameBuffer {
    data: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![crate::colors::BACKGROUND; (width * height) as usize],
            width,
            height,
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.data
    }

    /// The frame as raw bytes (ARGB8888, native endianness) for blitting.
    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(self.data.as_ptr() as *const u8, self.data.len() * 4)
        }
    }
}

impl PixelSurface for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: u32) {
        self.data.fill(color);
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.data[(y as u32 * self.width + x as u32) as usize] = color;
        }
    }

    #[inline]
    fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.data[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }
}

/// Per-pixel nearest-depth record for hidden surface removal.
///
/// Depths are NDC z values: smaller is nearer. Cleared to `+∞` so the first
/// fragment at every pixel always wins. Owned exclusively by the render
/// pass that allocated it; `&mut` receivers enforce that no two passes
/// write concurrently.
pub struct DepthBuffer {
    data: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![f32::INFINITY; (width * height) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every pixel to infinitely far, ready for a new frame.
    pub fn clear(&mut self) {
        self.data.fill(f32::INFINITY);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.data = vec![f32::INFINITY; (width * height) as usize];
        self.width = width;
        self.height = height;
    }

    /// Depth test with write: stores `depth` and returns `true` iff it is
    /// strictly nearer than the stored value. Out of bounds fails the test.
    #[inline]
    pub fn test_and_set(&mut self, x: i32, y: i32, depth: f32) -> bool {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return false;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        if depth < self.data[idx] {
            self.data[idx] = depth;
            true
        } else {
            false
        }
    }

    /// The stored depth at (x, y), or `None` outside the buffer.
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.data[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }
}
