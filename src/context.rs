//! The device context frontends talk to
//!
//! A [`SurfaceContext`] owns the backend, the clock and the 8-to-16 bit
//! palette table. Fill and palette operations rebuild the table through the
//! context, so there is no process-wide state and a second context never
//! sees the first one's palette.

use crate::backend::{Backend, InitFlags, PaletteFlags};
use crate::blit;
use crate::clock::{Clock, SystemClock};
use crate::color::Color;
use crate::error::Result;
use crate::geometry::Rect;
use crate::palette::PaletteTable;
use crate::surface::{PixelFormat, Surface, SurfaceFlags};

pub struct SurfaceContext<B: Backend, C: Clock = SystemClock> {
    backend: B,
    clock: C,
    palette: PaletteTable,
}

impl<B: Backend> SurfaceContext<B> {
    /// Context using the system monotonic clock
    pub fn new(backend: B) -> Self {
        Self::with_clock(backend, SystemClock::new())
    }
}

impl<B: Backend, C: Clock> SurfaceContext<B, C> {
    pub fn with_clock(backend: B, clock: C) -> Self {
        Self {
            backend,
            clock,
            palette: PaletteTable::new(),
        }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The 8-to-16 bit lookup table as last rebuilt
    #[inline]
    pub fn palette(&self) -> &PaletteTable {
        &self.palette
    }

    pub fn init(&mut self, flags: InitFlags) -> Result<()> {
        self.backend.init(flags)
    }

    pub fn quit(&mut self) {
        self.backend.quit();
    }

    // ========================================================================
    // Surfaces
    // ========================================================================

    pub fn create_surface(
        &mut self,
        flags: SurfaceFlags,
        width: i32,
        height: i32,
        depth: u8,
        rmask: u32,
        gmask: u32,
        bmask: u32,
        amask: u32,
    ) -> Result<Surface> {
        self.backend
            .create_surface(flags, width, height, depth, rmask, gmask, bmask, amask)
    }

    pub fn free_surface(&mut self, surface: Surface) {
        self.backend.free_surface(surface);
    }

    pub fn convert_surface(
        &mut self,
        src: &Surface,
        format: &PixelFormat,
        flags: SurfaceFlags,
    ) -> Result<Surface> {
        self.backend.convert_surface(src, format, flags)
    }

    pub fn map_rgb(&self, format: &PixelFormat, r: u8, g: u8, b: u8) -> u32 {
        self.backend.map_rgb(format, r, g, b)
    }

    /// Fill the whole surface with `color` and rebuild the palette table
    /// from it. The clip rectangle does not apply.
    pub fn fill_rect(&mut self, surface: &mut Surface, color: u32) {
        self.palette.set_fill_color(color);
        surface.fill(color);
    }

    /// Clipped blit from `src` to `dst`. See [`blit::clip_blit`] for how the
    /// rectangles are narrowed; `dst_rect` receives the area written.
    pub fn blit(
        &mut self,
        src: Option<&Surface>,
        src_rect: Option<&Rect>,
        dst: Option<&mut Surface>,
        dst_rect: Option<&mut Rect>,
    ) -> Result<()> {
        blit::blit(&mut self.backend, src, src_rect, dst, dst_rect)
    }

    // ========================================================================
    // Palettes
    // ========================================================================

    /// Rebuild the palette table from `colors`, then update the surface palette
    pub fn set_palette(
        &mut self,
        surface: &mut Surface,
        flags: PaletteFlags,
        colors: &[Color],
        first: usize,
        count: usize,
    ) -> Result<()> {
        self.palette.set_palette(colors);
        self.backend.set_palette(surface, flags, colors, first, count)
    }

    /// Update the surface palette without touching the palette table
    pub fn set_colors(
        &mut self,
        surface: &mut Surface,
        colors: &[Color],
        first: usize,
        count: usize,
    ) -> Result<()> {
        self.backend.set_colors(surface, colors, first, count)
    }

    // ========================================================================
    // Video
    // ========================================================================

    pub fn set_video_mode(
        &mut self,
        width: i32,
        height: i32,
        bpp: u8,
        flags: SurfaceFlags,
    ) -> Result<Surface> {
        self.backend.set_video_mode(width, height, bpp, flags)
    }

    /// Present a finished frame
    pub fn flip(&mut self, screen: &Surface) -> Result<()> {
        self.backend.present(screen)
    }

    // ========================================================================
    // Timing
    // ========================================================================

    /// Whole seconds from the context clock
    pub fn ticks(&self) -> u32 {
        self.clock.now_ticks()
    }

    pub fn delay(&self, ms: u32) {
        self.clock.sleep(ms);
    }

    pub fn last_error(&self) -> Option<&str> {
        self.backend.error()
    }
}
