//! Error conditions reported by surface operations

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T, E = SurfaceError> = std::result::Result<T, E>;

/// Everything a surface operation can fail with.
///
/// Degenerate blit geometry is not in here: a blit that clips away to nothing
/// succeeds and zeroes the destination rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// A required surface was not supplied
    #[error("passed a NULL surface")]
    InvalidSurface,
    /// Source or destination is locked
    #[error("Surfaces must not be locked during blit")]
    SurfaceLocked,
    /// The backend primitive failed; carried to the caller untouched
    #[error("backend error {code}: {message}")]
    Backend { code: i32, message: String },
    #[error("unsupported pixel depth: {0} bpp")]
    UnsupportedFormat(u8),
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    /// Palette operation on a surface without a palette
    #[error("surface has no palette")]
    NotPalettized,
    #[error("video mode not set")]
    VideoNotInitialized,
}

impl SurfaceError {
    /// Build a backend failure with the given status code
    pub fn backend(code: i32, message: impl Into<String>) -> Self {
        Self::Backend {
            code,
            message: message.into(),
        }
    }

    /// Status code as a C-style caller sees it; failures are negative
    pub fn status(&self) -> i32 {
        match self {
            Self::Backend { code, .. } => *code,
            _ => -1,
        }
    }
}
