use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::{EventPump, Sdl};

use super::{convert_pixels, Backend, InitFlags, SoftwareBackend};
use crate::error::{Result, SurfaceError};
use crate::geometry::Rect;
use crate::surface::{PixelFormat, Surface, SurfaceFlags};

/// Map an SDL error string onto a backend failure
fn sdl_error(e: impl ToString) -> SurfaceError {
    SurfaceError::backend(-1, e.to_string())
}

struct Video {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    width: u32,
    height: u32,
}

/// Desktop backend: surfaces live in memory like [`SoftwareBackend`], and
/// `present` uploads the screen surface into an SDL2 window.
pub struct SdlBackend {
    software: SoftwareBackend,
    title: String,
    vsync: bool,
    video: Option<Video>,
    event_pump: Option<EventPump>,
    sdl: Option<Sdl>,
}

impl SdlBackend {
    /// Create a backend whose window will carry `title`.
    /// vsync=true: present waits for the monitor refresh
    pub fn new(title: &str, vsync: bool) -> Self {
        Self {
            software: SoftwareBackend::new(),
            title: title.to_string(),
            vsync,
            video: None,
            event_pump: None,
            sdl: None,
        }
    }

    /// Drain pending window events. Returns true once the window was closed
    /// or Escape was pressed.
    pub fn quit_requested(&mut self) -> bool {
        let Some(pump) = self.event_pump.as_mut() else {
            return false;
        };
        let mut quit = false;
        for event in pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => quit = true,
                _ => {},
            }
        }
        quit
    }
}

/// Texture format matching a surface's memory layout, if SDL has one
fn texture_format(format: &PixelFormat) -> Option<PixelFormatEnum> {
    if format.is_indexed() {
        return None;
    }
    match (format.bits_per_pixel(), format.masks()) {
        (16, (0xF800, 0x07E0, 0x001F, _)) => Some(PixelFormatEnum::RGB565),
        (24, (0x00FF0000, 0x0000FF00, 0x000000FF, _)) => Some(PixelFormatEnum::BGR24),
        (32, (0x00FF0000, 0x0000FF00, 0x000000FF, 0)) => Some(PixelFormatEnum::RGB888),
        (32, (0x00FF0000, 0x0000FF00, 0x000000FF, _)) => Some(PixelFormatEnum::ARGB8888),
        _ => None,
    }
}

impl Backend for SdlBackend {
    fn init(&mut self, flags: InitFlags) -> Result<()> {
        let sdl = sdl2::init().map_err(sdl_error)?;
        self.event_pump = Some(sdl.event_pump().map_err(sdl_error)?);
        self.sdl = Some(sdl);
        log::info!("SDL2 backend initialized ({:?})", flags);
        self.software.init(flags)
    }

    fn quit(&mut self) {
        self.video = None;
        self.event_pump = None;
        self.sdl = None;
        self.software.quit();
        log::info!("SDL2 backend shut down");
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
        self.software
            .create_surface(flags, width, height, depth, rmask, gmask, bmask, amask)
    }

    fn lower_blit(
        &mut self,
        src: &Surface,
        src_rect: &Rect,
        dst: &mut Surface,
        dst_rect: &Rect,
    ) -> Result<()> {
        self.software.lower_blit(src, src_rect, dst, dst_rect)
    }

    fn set_error(&mut self, message: &str) {
        self.software.set_error(message);
    }

    fn error(&self) -> Option<&str> {
        self.software.error()
    }

    fn clear_error(&mut self) {
        self.software.clear_error();
    }

    fn set_video_mode(
        &mut self,
        width: i32,
        height: i32,
        bpp: u8,
        flags: SurfaceFlags,
    ) -> Result<Surface> {
        let sdl = self.sdl.as_ref().ok_or(SurfaceError::VideoNotInitialized)?;
        let video_subsystem = sdl.video().map_err(sdl_error)?;
        if width <= 0 || height <= 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }

        let mut window_builder = video_subsystem.window(&self.title, width as u32, height as u32);
        window_builder.position_centered();
        if flags.contains(SurfaceFlags::FULLSCREEN) {
            window_builder.fullscreen();
        }
        let window = window_builder.build().map_err(sdl_error)?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if self.vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(sdl_error)?;
        let texture_creator = canvas.texture_creator();

        // The window is only kept once the software side accepts the mode
        let screen = self.software.set_video_mode(width, height, bpp, flags)?;
        self.video = Some(Video {
            canvas,
            texture_creator,
            width: width as u32,
            height: height as u32,
        });
        Ok(screen)
    }

    fn present(&mut self, screen: &Surface) -> Result<()> {
        self.software.present(screen)?;
        let video = self.video.as_mut().ok_or(SurfaceError::VideoNotInitialized)?;

        // Layouts SDL cannot upload directly go through RGB565
        let converted;
        let (frame, format) = match texture_format(screen.format()) {
            Some(format) => (screen, format),
            None => {
                converted = convert_pixels(screen, &PixelFormat::rgb565(), screen.flags())?;
                (&converted, PixelFormatEnum::RGB565)
            },
        };

        // Streaming textures borrow the creator, so one is made per frame
        let mut texture = video
            .texture_creator
            .create_texture_streaming(format, video.width, video.height)
            .map_err(sdl_error)?;
        texture
            .update(None, frame.pixels(), frame.pitch())
            .map_err(sdl_error)?;

        video.canvas.copy(&texture, None, None).map_err(sdl_error)?;
        video.canvas.present();
        Ok(())
    }
}
