use bitflags::bitflags;

use super::PixelFormat;
use crate::error::{Result, SurfaceError};
use crate::geometry::Rect;

bitflags! {
    /// Creation flags carried by a surface. The software backend only
    /// records them; presentation backends read `DOUBLEBUF`/`FULLSCREEN`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SurfaceFlags: u32 {
        const HWSURFACE  = 0x0000_0001;
        const ASYNCBLIT  = 0x0000_0004;
        const HWPALETTE  = 0x2000_0000;
        const DOUBLEBUF  = 0x4000_0000;
        const FULLSCREEN = 0x8000_0000;
    }
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Store the low `dest.len()` bytes of a pixel value.
/// 1, 2 and 4 byte pixels use native order; 3 byte pixels are little-endian.
#[inline]
fn write_pixel(dest: &mut [u8], value: u32) {
    match dest.len() {
        1 => dest[0] = value as u8,
        2 => dest.copy_from_slice(&(value as u16).to_ne_bytes()),
        3 => dest.copy_from_slice(&value.to_le_bytes()[..3]),
        _ => dest.copy_from_slice(&value.to_ne_bytes()),
    }
}

#[inline]
fn read_pixel(src: &[u8]) -> u32 {
    match src.len() {
        1 => src[0] as u32,
        2 => u16::from_ne_bytes([src[0], src[1]]) as u32,
        3 => u32::from_le_bytes([src[0], src[1], src[2], 0]),
        _ => u32::from_ne_bytes([src[0], src[1], src[2], src[3]]),
    }
}

// ============================================================================
// Surface
// ============================================================================

/// A pixel buffer with its geometry, lock state and clip rectangle.
///
/// Pixels are addressed as `row * pitch + col * bytes_per_pixel`. Surfaces
/// are handed out by a [`Backend`](crate::backend::Backend) and owned by the
/// caller until passed back to `free_surface`.
#[derive(Debug, Clone)]
pub struct Surface {
    flags: SurfaceFlags,
    format: PixelFormat,
    width: i32,
    height: i32,
    pitch: usize,
    pixels: Vec<u8>,
    clip_rect: Rect,
    locked: bool,
}

impl Surface {
    /// Allocate a zeroed surface. Rows are padded to a 4-byte boundary.
    pub fn new(flags: SurfaceFlags, width: i32, height: i32, format: PixelFormat) -> Result<Self> {
        if width < 0 || height < 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        let row_bytes = width as usize * format.bytes_per_pixel();
        let pitch = (row_bytes + 3) & !3;
        Self::with_pitch(flags, width, height, format, pitch)
    }

    /// Allocate a zeroed surface with an explicit row stride
    pub fn with_pitch(
        flags: SurfaceFlags,
        width: i32,
        height: i32,
        format: PixelFormat,
        pitch: usize,
    ) -> Result<Self> {
        if width < 0 || height < 0 || pitch < width as usize * format.bytes_per_pixel() {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        Ok(Self {
            flags,
            format,
            width,
            height,
            pitch,
            pixels: vec![0; pitch * height as usize],
            clip_rect: Rect::with_size(width, height),
            locked: false,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Bytes between the starts of consecutive rows
    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    #[inline]
    pub fn format(&self) -> &PixelFormat {
        &self.format
    }

    #[inline]
    pub fn format_mut(&mut self) -> &mut PixelFormat {
        &mut self.format
    }

    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    #[inline]
    pub fn flags(&self) -> SurfaceFlags {
        self.flags
    }

    /// The full surface as a rectangle
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::with_size(self.width, self.height)
    }

    // ========================================================================
    // Lock State
    // ========================================================================

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Mark the surface as being accessed directly; blits are refused until unlocked
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    // ========================================================================
    // Clip Rectangle
    // ========================================================================

    #[inline]
    pub fn clip_rect(&self) -> Rect {
        self.clip_rect
    }

    /// Restrict blits into this surface to `rect` (intersected with the
    /// surface bounds). `None` resets to the whole surface.
    /// Returns false when the resulting clip area is empty.
    pub fn set_clip_rect(&mut self, rect: Option<Rect>) -> bool {
        let bounds = self.bounds();
        self.clip_rect = match rect {
            Some(r) => bounds.intersect(&r),
            None => bounds,
        };
        !self.clip_rect.is_empty()
    }

    // ========================================================================
    // Pixel Access
    // ========================================================================

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: usize, y: usize) -> usize {
        y * self.pitch + x * self.bytes_per_pixel()
    }

    /// Byte range of `count` pixels starting at (x, y)
    #[inline]
    pub(crate) fn span(&self, x: i32, y: i32, count: i32) -> std::ops::Range<usize> {
        let start = self.pixel_index(x as usize, y as usize);
        start..start + count as usize * self.bytes_per_pixel()
    }

    /// Read a raw pixel value (bounds checked)
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let idx = self.pixel_index(x as usize, y as usize);
        Some(read_pixel(&self.pixels[idx..idx + self.bytes_per_pixel()]))
    }

    /// Write a raw pixel value (bounds checked, ignores the clip rect)
    pub fn put_pixel(&mut self, x: i32, y: i32, value: u32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.pixel_index(x as usize, y as usize);
        let bpp = self.bytes_per_pixel();
        write_pixel(&mut self.pixels[idx..idx + bpp], value);
        true
    }

    /// Write `color` into every pixel of the full `width x height` extent.
    /// Row padding beyond `width * bytes_per_pixel` is left untouched.
    pub fn fill(&mut self, color: u32) {
        let bpp = self.bytes_per_pixel();
        let row_bytes = self.width as usize * bpp;
        if row_bytes == 0 {
            return;
        }
        for row in self.pixels.chunks_mut(self.pitch).take(self.height as usize) {
            for dest in row[..row_bytes].chunks_exact_mut(bpp) {
                write_pixel(dest, color);
            }
        }
    }
}
