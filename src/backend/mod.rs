//! Pixel-buffer backends
//!
//! The surface layer only computes geometry. Allocation, raw pixel transfer,
//! format conversion, video mode setup and frame presentation belong to a
//! [`Backend`]. [`SoftwareBackend`] keeps everything in memory and is what
//! callback-driven hosts (and the tests) use; `SdlBackend` adds an SDL2
//! window for desktop runs.

mod software;
#[cfg(feature = "sdl")]
mod sdl;

pub use software::SoftwareBackend;
#[cfg(feature = "sdl")]
pub use sdl::SdlBackend;

use bitflags::bitflags;

use crate::color::{pack_rgb565, unpack_rgb565, Color};
use crate::error::{Result, SurfaceError};
use crate::geometry::Rect;
use crate::surface::{PixelFormat, Surface, SurfaceFlags};

bitflags! {
    /// Subsystems requested from `Backend::init`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InitFlags: u32 {
        const TIMER = 0x0000_0001;
        const AUDIO = 0x0000_0010;
        const VIDEO = 0x0000_0020;
    }
}

bitflags! {
    /// Which palette a palette update targets
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PaletteFlags: u32 {
        /// Logical palette, used when blitting and mapping colors
        const LOGICAL = 0x01;
        /// Physical palette, what the display shows
        const PHYSICAL = 0x02;
    }
}

/// Operations the surface layer delegates to a pixel-buffer implementation.
pub trait Backend {
    fn init(&mut self, flags: InitFlags) -> Result<()> {
        log::debug!("backend init {:?}", flags);
        Ok(())
    }

    fn quit(&mut self) {}

    /// Allocate a surface with the given depth and channel masks
    fn create_surface(
        &mut self,
        flags: SurfaceFlags,
        width: i32,
        height: i32,
        depth: u8,
        rmask: u32,
        gmask: u32,
        bmask: u32,
        amask: u32,
    ) -> Result<Surface>;

    /// Release a surface created by this backend
    fn free_surface(&mut self, surface: Surface) {
        drop(surface);
    }

    /// Copy an already-clipped region. Both rectangles have the same size and
    /// lie inside their surfaces; implementations do no clipping of their own.
    fn lower_blit(
        &mut self,
        src: &Surface,
        src_rect: &Rect,
        dst: &mut Surface,
        dst_rect: &Rect,
    ) -> Result<()>;

    /// Record a diagnostic message
    fn set_error(&mut self, message: &str);

    /// Most recent diagnostic, if any
    fn error(&self) -> Option<&str>;

    fn clear_error(&mut self);

    fn map_rgb(&self, format: &PixelFormat, r: u8, g: u8, b: u8) -> u32 {
        format.map_rgb(r, g, b)
    }

    /// Copy a surface into a new one with a different pixel format
    fn convert_surface(
        &mut self,
        src: &Surface,
        format: &PixelFormat,
        flags: SurfaceFlags,
    ) -> Result<Surface> {
        convert_pixels(src, format, flags)
    }

    /// Set up the display and return the surface frames are drawn into
    fn set_video_mode(
        &mut self,
        width: i32,
        height: i32,
        bpp: u8,
        flags: SurfaceFlags,
    ) -> Result<Surface>;

    /// Publish a finished frame
    fn present(&mut self, screen: &Surface) -> Result<()>;

    /// Replace `count` palette entries starting at `first`.
    /// Entries past the end of the palette are ignored.
    fn set_palette(
        &mut self,
        surface: &mut Surface,
        flags: PaletteFlags,
        colors: &[Color],
        first: usize,
        count: usize,
    ) -> Result<()> {
        if !flags.contains(PaletteFlags::LOGICAL) {
            // Physical-only updates have nowhere to go without a display
            return Ok(());
        }
        let palette = surface
            .format_mut()
            .palette_mut()
            .ok_or(SurfaceError::NotPalettized)?;
        for (slot, color) in palette.iter_mut().skip(first).zip(colors.iter().take(count)) {
            *slot = *color;
        }
        Ok(())
    }

    fn set_colors(
        &mut self,
        surface: &mut Surface,
        colors: &[Color],
        first: usize,
        count: usize,
    ) -> Result<()> {
        self.set_palette(
            surface,
            PaletteFlags::LOGICAL | PaletteFlags::PHYSICAL,
            colors,
            first,
            count,
        )
    }
}

/// Check that a rectangle lies inside a surface
fn rect_in_surface(rect: &Rect, surface: &Surface) -> bool {
    rect.w >= 0 && rect.h >= 0 && surface.bounds().contains_rect(rect)
}

/// Raw region copy shared by the in-memory backends.
///
/// Equal depths copy bytes row by row. 8-bit indexed sources into 16-bit
/// destinations go through the source palette and `pack_rgb565`.
pub(crate) fn copy_region(
    src: &Surface,
    src_rect: &Rect,
    dst: &mut Surface,
    dst_rect: &Rect,
) -> Result<()> {
    if src_rect.w != dst_rect.w || src_rect.h != dst_rect.h {
        return Err(SurfaceError::backend(-1, "blit rectangles differ in size"));
    }
    if !rect_in_surface(src_rect, src) || !rect_in_surface(dst_rect, dst) {
        return Err(SurfaceError::backend(-1, "blit rectangle outside surface"));
    }

    let src_bpp = src.bytes_per_pixel();
    let dst_bpp = dst.bytes_per_pixel();

    if src_bpp == dst_bpp {
        for row in 0..src_rect.h {
            let from = src.span(src_rect.x, src_rect.y + row, src_rect.w);
            let to = dst.span(dst_rect.x, dst_rect.y + row, dst_rect.w);
            dst.pixels_mut()[to].copy_from_slice(&src.pixels()[from]);
        }
        return Ok(());
    }

    match (src.format().palette(), dst_bpp) {
        (Some(palette), 2) => {
            let lut: Vec<u16> = palette.iter().map(Color::packed).collect();
            for row in 0..src_rect.h {
                for col in 0..src_rect.w {
                    let index = src
                        .get_pixel(src_rect.x + col, src_rect.y + row)
                        .unwrap_or_default();
                    let value = lut.get(index as usize).copied().unwrap_or_default();
                    dst.put_pixel(dst_rect.x + col, dst_rect.y + row, value as u32);
                }
            }
            Ok(())
        },
        _ => Err(SurfaceError::backend(
            -1,
            format!(
                "cannot blit {} bpp onto {} bpp",
                src.format().bits_per_pixel(),
                dst.format().bits_per_pixel()
            ),
        )),
    }
}

/// Pixel format conversion used by `Backend::convert_surface`.
/// 16-bit sources are widened with `unpack_rgb565`; everything else is
/// decoded through its own format.
pub(crate) fn convert_pixels(
    src: &Surface,
    format: &PixelFormat,
    flags: SurfaceFlags,
) -> Result<Surface> {
    let mut out = Surface::new(flags, src.width(), src.height(), format.clone())?;
    if src.format() == format {
        copy_region(src, &src.bounds(), &mut out, &src.bounds())?;
        return Ok(out);
    }

    let src_is_565 = src.format().masks() == PixelFormat::rgb565().masks();
    for y in 0..src.height() {
        for x in 0..src.width() {
            let pixel = src.get_pixel(x, y).unwrap_or_default();
            let color = if src_is_565 {
                unpack_rgb565(pixel as u16)
            } else {
                src.format().get_rgb(pixel)
            };
            let value = if format.masks() == PixelFormat::rgb565().masks() {
                pack_rgb565(color.r, color.g, color.b) as u32
            } else {
                format.map_rgb(color.r, color.g, color.b)
            };
            out.put_pixel(x, y, value);
        }
    }
    Ok(out)
}
