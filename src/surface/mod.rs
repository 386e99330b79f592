mod format;
mod pixel_buffer;

pub use format::PixelFormat;
pub use pixel_buffer::{Surface, SurfaceFlags};
