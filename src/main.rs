use retrosurf::config::{DEFAULT_BPP, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use retrosurf::{
    Backend, Clock, InitFlags, Rect, Surface, SurfaceContext, SurfaceFlags, VideoConfig,
};

const CONFIG_PATH: &str = "retrosurf.json";
const SPRITE_SIZE: i32 = 48;
const BORDER: i32 = 8;

/// Command line options layered over the config file
struct Options {
    config_path: String,
    width: Option<i32>,
    height: Option<i32>,
    bpp: Option<u8>,
    vsync: Option<bool>,
    frames: Option<u64>,
}

/// Parse command line arguments
fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options {
        config_path: CONFIG_PATH.to_string(),
        width: None,
        height: None,
        bpp: None,
        vsync: None,
        frames: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => opts.vsync = Some(false),
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    opts.config_path = args[i + 1].clone();
                    i += 1;
                }
            },
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    opts.width = args[i + 1].parse().ok();
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    opts.height = args[i + 1].parse().ok();
                    i += 1;
                }
            },
            "--bpp" | "-b" => {
                if i + 1 < args.len() {
                    opts.bpp = args[i + 1].parse().ok();
                    i += 1;
                }
            },
            "--frames" | "-n" => {
                if i + 1 < args.len() {
                    opts.frames = args[i + 1].parse().ok();
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: retrosurf-demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --config PATH, -c PATH  Video config (default: {})", CONFIG_PATH);
                println!("  --width W, -w W         Screen width (default: {})", DEFAULT_WIDTH);
                println!("  --height H, -h H        Screen height (default: {})", DEFAULT_HEIGHT);
                println!(
                    "  --bpp B, -b B           Bits per pixel: 8, 16, 24, 32 (default: {})",
                    DEFAULT_BPP
                );
                println!("  --frames N, -n N        Stop after N frames");
                println!("  --no-vsync              Pace frames with the clock instead of vsync");
                println!("  --help                  Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    opts
}

fn load_config(opts: &Options) -> VideoConfig {
    let mut cfg = match VideoConfig::load(&opts.config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::debug!("using default video config ({})", e);
            VideoConfig::default()
        },
    };
    if let Some(w) = opts.width {
        cfg.width = w;
    }
    if let Some(h) = opts.height {
        cfg.height = h;
    }
    if let Some(bpp) = opts.bpp {
        cfg.bpp = bpp;
    }
    if let Some(vsync) = opts.vsync {
        cfg.vsync = vsync;
    }
    cfg
}

/// Checkerboard sprite in the screen's format
fn make_sprite<B: Backend, C: Clock>(
    ctx: &mut SurfaceContext<B, C>,
    screen: &Surface,
) -> retrosurf::Result<Surface> {
    let fmt = screen.format();
    let (rmask, gmask, bmask, amask) = fmt.masks();
    let mut sprite = ctx.create_surface(
        SurfaceFlags::empty(),
        SPRITE_SIZE,
        SPRITE_SIZE,
        fmt.bits_per_pixel(),
        rmask,
        gmask,
        bmask,
        amask,
    )?;
    // Indexed sprites share the screen palette so indices mean the same color
    if let Some(palette) = fmt.palette() {
        let palette = palette.to_vec();
        ctx.set_colors(&mut sprite, &palette, 0, palette.len())?;
    }

    let light = ctx.map_rgb(sprite.format(), 0xFF, 0xC0, 0x20);
    let dark = ctx.map_rgb(sprite.format(), 0x20, 0x40, 0xC0);
    for y in 0..SPRITE_SIZE {
        for x in 0..SPRITE_SIZE {
            let value = if (x / 8 + y / 8) % 2 == 0 { light } else { dark };
            sprite.put_pixel(x, y, value);
        }
    }
    Ok(sprite)
}

/// Bounce the sprite around a clipped screen until `frames` run out or
/// `should_quit` says so
fn run<B: Backend, C: Clock>(
    ctx: &mut SurfaceContext<B, C>,
    cfg: &VideoConfig,
    frames: Option<u64>,
    mut should_quit: impl FnMut(&mut B) -> bool,
) -> retrosurf::Result<()> {
    ctx.init(InitFlags::VIDEO | InitFlags::TIMER)?;
    let mut screen = ctx.set_video_mode(cfg.width, cfg.height, cfg.bpp, cfg.surface_flags())?;

    if screen.format().is_indexed() {
        let ramp: Vec<retrosurf::Color> = (0..=255u8)
            .map(|i| retrosurf::Color::rgb(i, i.wrapping_mul(3), 255 - i))
            .collect();
        ctx.set_palette(
            &mut screen,
            retrosurf::PaletteFlags::LOGICAL | retrosurf::PaletteFlags::PHYSICAL,
            &ramp,
            0,
            ramp.len(),
        )?;
    }
    screen.set_clip_rect(Some(Rect::new(
        BORDER,
        BORDER,
        cfg.width - BORDER * 2,
        cfg.height - BORDER * 2,
    )));

    let sprite = make_sprite(ctx, &screen)?;
    let background = ctx.map_rgb(screen.format(), 0x10, 0x10, 0x18);

    // Start partly off-screen so clipping kicks in immediately
    let (mut x, mut y) = (-SPRITE_SIZE / 2, cfg.height / 3);
    let (mut vx, mut vy) = (3, 2);

    let mut frame: u64 = 0;
    let mut frames_this_tick = 0u32;
    let mut last_tick = ctx.ticks();

    loop {
        if frames.is_some_and(|n| frame >= n) || should_quit(ctx.backend_mut()) {
            break;
        }

        ctx.fill_rect(&mut screen, background);

        let mut dst = Rect::at(x, y);
        ctx.blit(Some(&sprite), None, Some(&mut screen), Some(&mut dst))?;
        if dst.is_empty() {
            log::trace!("sprite fully clipped at ({}, {})", x, y);
        }

        ctx.flip(&screen)?;

        x += vx;
        y += vy;
        if x < -SPRITE_SIZE || x > cfg.width {
            vx = -vx;
        }
        if y < -SPRITE_SIZE || y > cfg.height {
            vy = -vy;
        }

        frame += 1;
        frames_this_tick += 1;
        let tick = ctx.ticks();
        if tick != last_tick {
            log::info!("{} fps", frames_this_tick);
            frames_this_tick = 0;
            last_tick = tick;
        }

        if !cfg.vsync {
            ctx.delay(cfg.frame_delay_ms);
        }
    }

    log::info!("presented {} frames", frame);
    ctx.free_surface(sprite);
    ctx.quit();
    Ok(())
}

#[cfg(feature = "sdl")]
fn main() -> Result<(), String> {
    env_logger::init();
    let opts = parse_args();
    let cfg = load_config(&opts);

    let backend = retrosurf::SdlBackend::new(&cfg.title, cfg.vsync);
    let mut ctx = SurfaceContext::new(backend);
    run(&mut ctx, &cfg, opts.frames, |backend| backend.quit_requested()).map_err(|e| e.to_string())
}

#[cfg(not(feature = "sdl"))]
fn main() -> Result<(), String> {
    env_logger::init();
    let opts = parse_args();
    let cfg = load_config(&opts);

    // Without a window there is nothing to close, so default to a short run
    let frames = opts.frames.or(Some(120));
    let mut ctx = SurfaceContext::new(retrosurf::SoftwareBackend::new());
    run(&mut ctx, &cfg, frames, |_| false).map_err(|e| e.to_string())
}
