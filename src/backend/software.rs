use super::{copy_region, Backend, InitFlags};
use crate::error::{Result, SurfaceError};
use crate::geometry::Rect;
use crate::surface::{PixelFormat, Surface, SurfaceFlags};

/// In-memory backend.
///
/// Used as-is on hosts that take frames through a video callback: `present`
/// only counts frames and the host reads the screen surface it was handed by
/// `set_video_mode`.
#[derive(Debug, Default)]
pub struct SoftwareBackend {
    last_error: Option<String>,
    video_mode: Option<(i32, i32, u8)>,
    frames_presented: u64,
}

impl SoftwareBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// (width, height, bpp) of the current video mode
    pub fn video_mode(&self) -> Option<(i32, i32, u8)> {
        self.video_mode
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

/// Default channel masks for a screen of the given depth
fn screen_format(bpp: u8) -> Result<PixelFormat> {
    match bpp {
        8 => Ok(PixelFormat::indexed8()),
        16 => Ok(PixelFormat::rgb565()),
        24 => PixelFormat::new(24, 0x00FF0000, 0x0000FF00, 0x000000FF, 0),
        32 => Ok(PixelFormat::xrgb8888()),
        other => PixelFormat::new(other, 0, 0, 0, 0),
    }
}

impl Backend for SoftwareBackend {
    fn init(&mut self, flags: InitFlags) -> Result<()> {
        log::debug!("software backend init {:?}", flags);
        self.last_error = None;
        Ok(())
    }

    fn quit(&mut self) {
        self.video_mode = None;
    }

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
    ) -> Result<Surface> {
        let format = PixelFormat::new(depth, rmask, gmask, bmask, amask)?;
        Surface::new(flags, width, height, format)
    }

    fn lower_blit(
        &mut self,
        src: &Surface,
        src_rect: &Rect,
        dst: &mut Surface,
        dst_rect: &Rect,
    ) -> Result<()> {
        copy_region(src, src_rect, dst, dst_rect)
    }

    fn set_error(&mut self, message: &str) {
        log::warn!("{}", message);
        self.last_error = Some(message.to_string());
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn set_video_mode(
        &mut self,
        width: i32,
        height: i32,
        bpp: u8,
        flags: SurfaceFlags,
    ) -> Result<Surface> {
        if width <= 0 || height <= 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        let screen = Surface::new(flags, width, height, screen_format(bpp)?)?;
        self.video_mode = Some((width, height, bpp));
        log::info!("video mode {}x{}x{}", width, height, bpp);
        Ok(screen)
    }

    fn present(&mut self, _screen: &Surface) -> Result<()> {
        if self.video_mode.is_none() {
            return Err(SurfaceError::VideoNotInitialized);
        }
        // Frame delivery happens through the host's video callback
        self.frames_presented += 1;
        Ok(())
    }
}
