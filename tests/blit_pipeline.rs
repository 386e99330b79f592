//! End-to-end blits through `SurfaceContext` and the software backend

use retrosurf::{
    ManualClock, PixelFormat, Rect, SoftwareBackend, Surface, SurfaceContext, SurfaceError,
    SurfaceFlags,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn context() -> SurfaceContext<SoftwareBackend, ManualClock> {
    init_logger();
    SurfaceContext::with_clock(SoftwareBackend::new(), ManualClock::new())
}

/// 32-bit surface where each pixel encodes its own coordinates
fn coordinate_surface(w: i32, h: i32) -> Surface {
    let mut s = Surface::new(SurfaceFlags::empty(), w, h, PixelFormat::xrgb8888()).unwrap();
    for y in 0..h {
        for x in 0..w {
            s.put_pixel(x, y, ((x as u32) << 16) | y as u32 | 0x8000_0000);
        }
    }
    s
}

fn blank(w: i32, h: i32) -> Surface {
    Surface::new(SurfaceFlags::empty(), w, h, PixelFormat::xrgb8888()).unwrap()
}

fn encoded(x: i32, y: i32) -> Option<u32> {
    Some(((x as u32) << 16) | y as u32 | 0x8000_0000)
}

#[test]
fn large_source_into_small_destination() {
    let mut ctx = context();
    let src = coordinate_surface(64, 64);
    let mut dst = blank(32, 32);
    dst.set_clip_rect(Some(Rect::new(0, 0, 32, 32)));
    let mut dst_rect = Rect::new(16, 16, 0, 0);

    ctx.blit(
        Some(&src),
        Some(&Rect::new(0, 0, 64, 64)),
        Some(&mut dst),
        Some(&mut dst_rect),
    )
    .unwrap();

    assert_eq!(dst_rect, Rect::new(16, 16, 16, 16));
    // Source region {0,0,16,16} lands at (16,16)
    assert_eq!(dst.get_pixel(16, 16), encoded(0, 0));
    assert_eq!(dst.get_pixel(31, 31), encoded(15, 15));
    assert_eq!(dst.get_pixel(15, 16), Some(0));
    assert_eq!(dst.get_pixel(16, 15), Some(0));
}

#[test]
fn clipped_left_edge_keeps_pixel_correspondence() {
    let mut ctx = context();
    let src = coordinate_surface(20, 20);
    let mut dst = blank(40, 40);
    dst.set_clip_rect(Some(Rect::new(10, 10, 20, 20)));
    let mut dst_rect = Rect::at(4, 7);

    ctx.blit(Some(&src), None, Some(&mut dst), Some(&mut dst_rect))
        .unwrap();

    // 6 columns and 3 rows were cut; the first visible pixel is source (6, 3)
    assert_eq!(dst_rect, Rect::new(10, 10, 14, 17));
    assert_eq!(dst.get_pixel(10, 10), encoded(6, 3));
    assert_eq!(dst.get_pixel(23, 26), encoded(19, 19));
    assert_eq!(dst.get_pixel(9, 10), Some(0));
    assert_eq!(dst.get_pixel(24, 10), Some(0));
}

#[test]
fn negative_source_origin_is_absorbed() {
    let mut ctx = context();
    let src = coordinate_surface(15, 10);
    let mut dst = blank(40, 20);
    let mut dst_rect = Rect::at(0, 0);

    ctx.blit(
        Some(&src),
        Some(&Rect::new(-5, 0, 20, 10)),
        Some(&mut dst),
        Some(&mut dst_rect),
    )
    .unwrap();

    assert_eq!(dst_rect, Rect::new(5, 0, 15, 10));
    assert_eq!(dst.get_pixel(5, 0), encoded(0, 0));
    assert_eq!(dst.get_pixel(4, 0), Some(0));
}

#[test]
fn nothing_written_outside_clip() {
    let mut ctx = context();
    let src = coordinate_surface(50, 50);
    let mut dst = blank(30, 30);
    dst.set_clip_rect(Some(Rect::new(5, 5, 10, 10)));
    let mut dst_rect = Rect::at(-20, -20);

    ctx.blit(Some(&src), None, Some(&mut dst), Some(&mut dst_rect))
        .unwrap();

    let clip = dst.clip_rect();
    for y in 0..30 {
        for x in 0..30 {
            let written = dst.get_pixel(x, y) != Some(0);
            assert_eq!(written, clip.contains_point(x, y), "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn empty_result_zeroes_rect_and_leaves_pixels() {
    let mut ctx = context();
    let src = coordinate_surface(8, 8);
    let mut dst = blank(16, 16);
    dst.set_clip_rect(Some(Rect::new(0, 0, 4, 4)));
    let before = dst.pixels().to_vec();
    let mut dst_rect = Rect::new(10, 10, 8, 8);

    ctx.blit(Some(&src), None, Some(&mut dst), Some(&mut dst_rect))
        .unwrap();

    assert_eq!((dst_rect.w, dst_rect.h), (0, 0));
    assert_eq!(dst.pixels(), &before[..]);
}

#[test]
fn locked_and_missing_surfaces_touch_nothing() {
    let mut ctx = context();
    let mut src = coordinate_surface(8, 8);
    let mut dst = blank(8, 8);
    dst.pixels_mut().fill(0x3C);
    let sentinel = dst.pixels().to_vec();

    assert_eq!(
        ctx.blit(None, None, Some(&mut dst), None),
        Err(SurfaceError::InvalidSurface)
    );
    src.lock();
    assert_eq!(
        ctx.blit(Some(&src), None, Some(&mut dst), None),
        Err(SurfaceError::SurfaceLocked)
    );
    assert_eq!(dst.pixels(), &sentinel[..]);

    src.unlock();
    ctx.blit(Some(&src), None, Some(&mut dst), None).unwrap();
    assert_ne!(dst.pixels(), &sentinel[..]);
}

#[test]
fn indexed_sprite_onto_565_screen() {
    let mut ctx = context();
    let mut screen = ctx
        .set_video_mode(16, 16, 16, SurfaceFlags::empty())
        .unwrap();
    let mut sprite = ctx
        .create_surface(SurfaceFlags::empty(), 4, 4, 8, 0, 0, 0, 0)
        .unwrap();
    ctx.set_colors(&mut sprite, &[retrosurf::Color::rgb(0, 0xFF, 0)], 1, 1)
        .unwrap();
    ctx.fill_rect(&mut sprite, 1);

    let mut dst = Rect::at(14, 14);
    ctx.blit(Some(&sprite), None, Some(&mut screen), Some(&mut dst))
        .unwrap();

    assert_eq!(dst, Rect::new(14, 14, 2, 2));
    assert_eq!(screen.get_pixel(15, 15), Some(0x07E0));
    assert_eq!(screen.get_pixel(13, 15), Some(0));
}
