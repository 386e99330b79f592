//! Clipped surface blits
//!
//! A blit runs in two steps. [`clip_blit`] narrows the requested source and
//! destination rectangles to what both surfaces can actually provide and
//! accept, and [`dispatch`] hands the surviving region to the backend's raw
//! `lower_blit`. The backend never sees a rectangle that reaches outside the
//! source bounds or the destination clip rectangle.

use crate::backend::Backend;
use crate::error::{Result, SurfaceError};
use crate::geometry::Rect;
use crate::surface::Surface;

/// Outcome of clipping: the source region to read and the destination
/// region to write. Both have the same size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClippedBlit {
    pub src: Rect,
    pub dst: Rect,
}

impl ClippedBlit {
    /// True when clipping removed the whole blit
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.src.w <= 0 || self.src.h <= 0
    }
}

/// Clip a blit request against the source surface and the destination's
/// clip rectangle.
///
/// `src_rect` of `None` means the whole source surface. `dst_rect` of `None`
/// means the destination origin. The caller's `dst_rect` is updated in place:
/// its position moves forward when the source starts at a negative offset or
/// the destination starts before the clip rectangle, and its size becomes the
/// clipped area (0x0 when nothing survives).
///
/// Whenever clipping advances the destination origin, the source origin
/// advances by the same amount so pixels keep their correspondence.
pub fn clip_blit(
    src: Option<&Surface>,
    src_rect: Option<&Rect>,
    dst: Option<&Surface>,
    dst_rect: Option<&mut Rect>,
) -> Result<ClippedBlit> {
    let (Some(src), Some(dst)) = (src, dst) else {
        return Err(SurfaceError::InvalidSurface);
    };
    if src.is_locked() || dst.is_locked() {
        return Err(SurfaceError::SurfaceLocked);
    }

    let mut full_dst = Rect::at(0, 0);
    let dst_rect = match dst_rect {
        Some(r) => r,
        None => &mut full_dst,
    };

    // Widened so far off-screen positions and unbounded clip sizes cannot overflow
    let (mut dst_x, mut dst_y) = (i64::from(dst_rect.x), i64::from(dst_rect.y));

    // Clip the source rectangle to the source surface
    let (mut src_x, mut src_y, mut w, mut h): (i64, i64, i64, i64);
    if let Some(sr) = src_rect {
        src_x = sr.x.into();
        w = sr.w.into();
        if src_x < 0 {
            w += src_x;
            dst_x -= src_x;
            src_x = 0;
        }
        let max_w = i64::from(src.width()) - src_x;
        if max_w < w {
            w = max_w;
        }

        src_y = sr.y.into();
        h = sr.h.into();
        if src_y < 0 {
            h += src_y;
            dst_y -= src_y;
            src_y = 0;
        }
        let max_h = i64::from(src.height()) - src_y;
        if max_h < h {
            h = max_h;
        }
    } else {
        src_x = 0;
        src_y = 0;
        w = src.width().into();
        h = src.height().into();
    }

    // Clip the destination rectangle against the clip rectangle
    let clip = dst.clip_rect();
    let (clip_x, clip_y) = (i64::from(clip.x), i64::from(clip.y));

    let dx = clip_x - dst_x;
    if dx > 0 {
        w -= dx;
        dst_x += dx;
        src_x += dx;
    }
    let dx = dst_x + w - clip_x - i64::from(clip.w);
    if dx > 0 {
        w -= dx;
    }

    let dy = clip_y - dst_y;
    if dy > 0 {
        h -= dy;
        dst_y += dy;
        src_y += dy;
    }
    let dy = dst_y + h - clip_y - i64::from(clip.h);
    if dy > 0 {
        h -= dy;
    }

    dst_rect.x = narrow(dst_x);
    dst_rect.y = narrow(dst_y);
    if w > 0 && h > 0 {
        // A surviving region lies inside both surfaces, so these fit in i32
        dst_rect.w = narrow(w);
        dst_rect.h = narrow(h);
        Ok(ClippedBlit {
            src: Rect::new(narrow(src_x), narrow(src_y), dst_rect.w, dst_rect.h),
            dst: *dst_rect,
        })
    } else {
        dst_rect.w = 0;
        dst_rect.h = 0;
        Ok(ClippedBlit {
            src: Rect::new(narrow(src_x), narrow(src_y), 0, 0),
            dst: *dst_rect,
        })
    }
}

/// Saturate a widened coordinate back into `i32`
#[inline]
fn narrow(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Transfer a clipped region. Empty regions succeed without touching the
/// backend; otherwise the backend's status is returned as is.
pub fn dispatch<B: Backend + ?Sized>(
    backend: &mut B,
    src: &Surface,
    dst: &mut Surface,
    clipped: &ClippedBlit,
) -> Result<()> {
    if clipped.is_empty() {
        log::trace!("blit clipped away, dst now {:?}", clipped.dst);
        return Ok(());
    }
    backend.lower_blit(src, &clipped.src, dst, &clipped.dst)
}

/// Clip and perform a blit.
///
/// Failures to validate the surfaces are also reported to the backend's
/// error sink before being returned.
pub fn blit<B: Backend + ?Sized>(
    backend: &mut B,
    src: Option<&Surface>,
    src_rect: Option<&Rect>,
    dst: Option<&mut Surface>,
    dst_rect: Option<&mut Rect>,
) -> Result<()> {
    let clipped = match clip_blit(src, src_rect, dst.as_deref(), dst_rect) {
        Ok(clipped) => clipped,
        Err(e) => {
            backend.set_error(&e.to_string());
            return Err(e);
        },
    };
    // Both are present once clipping succeeded
    let (Some(src), Some(dst)) = (src, dst) else {
        return Err(SurfaceError::InvalidSurface);
    };
    dispatch(backend, src, dst, &clipped)
}
