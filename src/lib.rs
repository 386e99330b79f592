//! Portable 2D surface layer
//!
//! Sits between a rendering frontend and a pixel-buffer backend. Frontends
//! create surfaces, fill them, blit between them with clipping and present
//! the screen surface; the backend does allocation and raw pixel transfer,
//! and a [`Clock`] supplies ticks and delays for the host platform.
//!
//! ```
//! use retrosurf::{Rect, SoftwareBackend, SurfaceContext, SurfaceFlags};
//!
//! let mut ctx = SurfaceContext::new(SoftwareBackend::new());
//! let sprite = ctx
//!     .create_surface(SurfaceFlags::empty(), 64, 64, 16, 0xF800, 0x07E0, 0x001F, 0)
//!     .unwrap();
//! let mut screen = ctx.set_video_mode(32, 32, 16, SurfaceFlags::empty()).unwrap();
//!
//! let mut dst = Rect::at(16, 16);
//! ctx.blit(Some(&sprite), None, Some(&mut screen), Some(&mut dst)).unwrap();
//! assert_eq!(dst, Rect::new(16, 16, 16, 16));
//! ```

pub mod backend;
pub mod blit;
pub mod clock;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod surface;

pub use backend::{Backend, InitFlags, PaletteFlags, SoftwareBackend};
#[cfg(feature = "sdl")]
pub use backend::SdlBackend;
pub use blit::{blit, clip_blit, dispatch, ClippedBlit};
pub use clock::{Clock, ManualClock, SystemClock};
pub use color::{pack_rgb565, unpack_rgb565, Color};
pub use config::{ConfigError, VideoConfig};
pub use context::SurfaceContext;
pub use error::{Result, SurfaceError};
pub use geometry::Rect;
pub use palette::{PaletteTable, PALETTE_SIZE};
pub use surface::{PixelFormat, Surface, SurfaceFlags};
