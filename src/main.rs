use blitkit::util::{hsv_to_rgb, lerp_color, Rng};
use blitkit::{text_width, Canvas, Color, Config, Context, Display, FpsCounter, Rect, RenderTarget};
use sdl2::keyboard::Scancode;

const CONFIG_PATH: &str = "blitkit.json";

const KEY_ESCAPE: usize = Scancode::Escape as usize;
const KEY_SPACE: usize = Scancode::Space as usize;
const KEY_F: usize = Scancode::F as usize;

/// Apply command line overrides on top of the loaded config
fn parse_args(config: &mut Config) {
    let args: Vec<String> = std::env::args().collect();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--vsync" => config.vsync = true,
            "--no-vsync" => config.vsync = false,
            "--fps" => {
                if i + 1 < args.len() {
                    if let Ok(fps) = args[i + 1].parse::<u32>() {
                        config.target_fps = fps;
                    }
                    i += 1;
                }
            },
            "--scale" => {
                if i + 1 < args.len() {
                    if let Ok(s) = args[i + 1].parse::<i32>() {
                        config.scale = s.max(1);
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 480x270)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<i32>(), parts[1].parse::<i32>()) {
                            config.width = w;
                            config.height = h;
                        }
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: blitkit [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --resolution WxH, -r WxH  Canvas resolution (default: {}x{})",
                    config.width, config.height
                );
                println!(
                    "  --scale N                 Window scale factor (default: {})",
                    config.scale
                );
                println!(
                    "  --fps N                   Target frame rate, 0 = uncapped (default: {})",
                    config.target_fps
                );
                println!("  --vsync / --no-vsync      Toggle vsync presentation");
                println!("  --help                    Show this help message");
                println!();
                println!("Settings are also read from {} when present.", CONFIG_PATH);
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }
}

fn checkerboard(size: i32, tile: i32) -> Canvas {
    let mut c = Canvas::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let even = ((x / tile) + (y / tile)) % 2 == 0;
            let color = if even {
                Color::rgb(230, 230, 230)
            } else {
                Color::rgb(40, 40, 60)
            };
            c.put_pixel(x, y, color);
        }
    }
    c
}

fn main() -> Result<(), String> {
    env_logger::init();

    let mut config = match Config::load(CONFIG_PATH) {
        Ok(c) => c,
        Err(e) => {
            log::debug!("no {} ({}), using defaults", CONFIG_PATH, e);
            Config::default()
        },
    };
    parse_args(&mut config);

    let win_w = (config.width * config.scale.max(1)) as u32;
    let win_h = (config.height * config.scale.max(1)) as u32;
    log::info!(
        "{}x{} canvas in a {}x{} window, target {} fps, vsync {}",
        config.width,
        config.height,
        win_w,
        win_h,
        config.target_fps,
        config.vsync
    );

    let (mut display, texture_creator) =
        Display::with_options(&config.title, win_w, win_h, config.vsync)?;
    let mut target =
        RenderTarget::with_size(&texture_creator, config.width as u32, config.height as u32)?;

    // the demo draws its own crosshair
    display.set_cursor_visible(false);

    let mut ctx = Context::new(config.width, config.height)?;
    ctx.set_window_size(win_w as i32, win_h as i32);
    ctx.set_target_fps(config.target_fps);

    let checker = checkerboard(64, 8);
    let mut fps_counter = FpsCounter::new(60);
    let mut rng = Rng::new(0xb117_b117);

    let mut show_fps = false;
    let mut paused = false;
    let mut typed = String::new();
    let mut zoom = 1.0f32;
    let mut time = 0.0f32;

    loop {
        let dt = ctx.tick();
        let (_, _, avg_fps) = fps_counter.tick();

        // Reset edges, then pump this frame's raw events
        ctx.begin_frame();
        for event in display.poll_events() {
            ctx.handle_event(&event);
        }

        if ctx.should_quit() || ctx.input.was_key_pressed(KEY_ESCAPE) {
            break;
        }
        if ctx.input.was_key_pressed(KEY_SPACE) {
            paused = !paused;
        }
        if ctx.input.was_key_pressed(KEY_F) {
            show_fps = !show_fps;
        }
        while let Some(ch) = ctx.input.get_char() {
            typed.push(ch);
            if typed.len() > 40 {
                typed.remove(0);
            }
        }
        zoom = (zoom + ctx.input.wheel() * 0.1).clamp(0.5, 4.0);
        if !paused {
            time += dt;
        }

        let screen_w = ctx.screen.width();
        let screen_h = ctx.screen.height();

        ctx.screen.clear(Color::rgb(6, 5, 12));

        // Zoom-pulsing checkerboard, hue-tinted, with a breathing glow term
        let scale = zoom * (1.0 + 0.25 * (time * 1.3).sin());
        let size = (64.0 * scale) as i32;
        let dst = Rect::new((screen_w - size) / 2, (screen_h - size) / 2, size, size);
        let tint = hsv_to_rgb((time * 40.0) % 360.0, 0.4, 1.0);
        let glow = (((time * 2.0).sin() * 0.5 + 0.5) * 48.0) as u8;
        ctx.screen.blit_scaled(
            &checker,
            dst,
            checker.bounds(),
            tint,
            Color::rgb(glow, glow, glow),
        );

        // Bouncing translucent rect
        let bx = (((time * 1.7).sin() * 0.5 + 0.5) * (screen_w - 40) as f32) as i32;
        let by = (((time * 2.3).cos() * 0.5 + 0.5) * (screen_h - 40) as f32) as i32;
        let body = hsv_to_rgb((time * 90.0) % 360.0, 0.8, 1.0);
        ctx.screen.draw_rect(
            Rect::new(bx, by, 40, 40),
            Color::rgba(body.r, body.g, body.b, 160),
        );

        // Sparkles
        for _ in 0..8 {
            let x = rng.range_i32(0, screen_w - 1);
            let y = rng.range_i32(0, screen_h - 1);
            let c = lerp_color(Color::WHITE, Color::rgb(255, 200, 80), rng.next_f32());
            ctx.screen.draw_point(
                x,
                y,
                Color::rgba(c.r, c.g, c.b, rng.range_i32(40, 160) as u8),
            );
        }

        // Mouse crosshair; left button drops a marker
        let (mx, my) = ctx.input.mouse_pos();
        ctx.screen
            .draw_line(0, my, screen_w - 1, my, Color::rgba(255, 255, 255, 48));
        ctx.screen
            .draw_line(mx, 0, mx, screen_h - 1, Color::rgba(255, 255, 255, 48));
        if ctx.input.is_button_down(1) {
            ctx.screen
                .draw_rect(Rect::new(mx - 2, my - 2, 5, 5), Color::rgb(255, 80, 80));
        }

        // Marquee band, clipped to its strip
        let band_h = ctx.font().line_height() + 4;
        let band = Rect::new(0, 4, screen_w, band_h);
        ctx.screen.set_clip(band);
        ctx.screen.draw_rect(band, Color::rgba(0, 0, 0, 120));
        let msg = "blitkit: clipped marquee, fixed-point scaling, edge-tracked input ... ";
        let msg_w = text_width(ctx.font(), msg);
        let scroll = (time * 60.0) as i32 % (msg_w + screen_w);
        ctx.draw_text(msg, screen_w - scroll, 6, Color::rgb(255, 220, 120));
        ctx.screen.reset_clip();

        // Typed-character echo line
        let prompt = format!("> {}", typed);
        ctx.draw_text(&prompt, 4, screen_h - 24, Color::rgb(180, 255, 180));
        if paused {
            ctx.draw_text("paused", 4, screen_h - 36, Color::rgb(255, 120, 120));
        }

        // FPS overlay (press F to toggle)
        if show_fps {
            let (min_fps, max_fps) = fps_counter.min_max_fps();
            let ms = fps_counter.avg_frame_time_ms();
            let fps_text = format!(
                "FPS {} avg  {} min  {} max  {}ms",
                avg_fps as u32, min_fps as u32, max_fps as u32, ms as u32
            );
            // Draw with shadow for visibility
            let y = screen_h - 12;
            ctx.draw_text(&fps_text, 5, y + 1, Color::BLACK);
            ctx.draw_text(&fps_text, 4, y, Color::rgb(255, 255, 0));
        }

        display.present(&mut target, &ctx.screen, ctx.viewport())?;
    }

    log::info!("shutting down");
    Ok(())
}
