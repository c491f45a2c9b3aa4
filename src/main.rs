use hexsort::app::{App, Input, Typed};
use hexsort::config::{Config, CONFIG_FILE};
use hexsort::render::{Painter, HEIGHT, WIDTH};
use hexsort::round::Flow;
use pixels::{Pixels, SurfaceTexture};
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn};
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::{TextChar, WinitInputHelper};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging isn't up yet, so hold on to a config error until it is
    let (config, config_error) = match Config::load(Path::new(CONFIG_FILE)) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .init();
    if let Some(e) = config_error {
        warn!(path = CONFIG_FILE, error = %e, "using default config");
    }

    let painter = Painter::load(&config.font_path).unwrap_or_else(|e| {
        warn!(path = %config.font_path.display(), error = %e, "no font, drawing without text");
        Painter::without_font()
    });

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();
    let window = {
        let size = LogicalSize::new(WIDTH as f64, HEIGHT as f64);
        WindowBuilder::new()
            .with_title("Hexsort")
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)?
    };

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(WIDTH, HEIGHT, surface_texture)?
    };

    let mut app = App::new(&config);
    let frame_interval = config.frame_interval();
    let mut title = String::new();
    info!(leaderboard = %config.leaderboard_path.display(), "starting");

    event_loop.run(move |event, _, control_flow| {
        // Draw the current frame
        if let Event::RedrawRequested(_) = event {
            painter.draw(pixels.get_frame(), &app, Instant::now());
            if let Err(e) = pixels.render() {
                error!(error = %e, "pixels.render() failed");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        // Handle input events
        if input.update(&event) {
            // Resize the window
            if let Some(size) = input.window_resized() {
                pixels.resize_surface(size.width, size.height);
            }

            let now = Instant::now();
            if app.update(&read_input(&input, &pixels), now) == Flow::Exit {
                info!("quitting");
                *control_flow = ControlFlow::Exit;
                return;
            }

            let next_title = app.title(now);
            if next_title != title {
                window.set_title(&next_title);
                title = next_title;
            }
            window.request_redraw();
            *control_flow = ControlFlow::WaitUntil(now + frame_interval);
        }
    });
}

fn read_input(input: &WinitInputHelper, pixels: &Pixels) -> Input {
    let click = if input.mouse_pressed(0) {
        input
            .mouse()
            .and_then(|pos| pixels.window_pos_to_pixel(pos).ok())
    } else {
        None
    };
    let typed = input
        .text()
        .into_iter()
        .map(|t| match t {
            TextChar::Char(c) => Typed::Char(c),
            TextChar::Back => Typed::Back,
        })
        .collect();

    Input {
        begin: input.key_pressed(VirtualKeyCode::Space),
        confirm: input.key_pressed(VirtualKeyCode::Return)
            || input.key_pressed(VirtualKeyCode::NumpadEnter),
        quit: input.key_pressed(VirtualKeyCode::Escape) || input.quit(),
        click,
        typed,
    }
}
