use std::{path::PathBuf, time::Instant};

use anyhow::Context;
use glcanvas_core::Config;

use crate::{
    abs::App,
    other::{InputState, UpdateContext},
    render::ui::uirenderer::UIRenderer,
    screen::DemoScreen,
};

mod abs;
mod canvas;
mod logging;
mod other;
mod render;
mod screen;

const WINDOW_TITLE: &str = "glcanvas (textured cube)";

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("glcanvas").join("config.json"))
}

fn load_config() -> anyhow::Result<Config> {
    match config_path() {
        Some(path) => Ok(Config::load(&path)?),
        None => Ok(Config::default()),
    }
}

fn run() -> anyhow::Result<()> {
    let config = load_config()?;

    let env_level = std::env::var(logging::LOG_ENV).ok();
    let level = logging::resolve_level(&config.log_level, env_level.as_deref());
    logging::init(level.clone().unwrap_or(log::LevelFilter::Info))?;
    if let Err(requested) = level {
        log::warn!("unknown log level '{requested}', using info");
    }
    log::info!("starting with {config:?}");

    let mut app = App::new(
        WINDOW_TITLE,
        config.window_width,
        config.window_height,
        config.backend,
        config.vsync,
    )?;

    let mut ui_renderer = UIRenderer::new(
        &app.gl,
        app.backend,
        config.window_width,
        config.window_height,
    )
    .context("failed to set up the widget renderer")?;
    let mut screen = DemoScreen::new(&app.gl, &config);
    let mut input = InputState::default();

    let frame_interval = config.frame_interval();
    let start = Instant::now();

    'running: loop {
        let frame_start = Instant::now();

        input.begin_frame();
        for event in app.event_pump.poll_iter() {
            if let sdl2::event::Event::Quit { .. } = event {
                break 'running;
            }
            input.handle_event(&event);
        }

        if !screen.update(&UpdateContext::new(&input)) {
            break 'running;
        }

        screen.render(
            &mut ui_renderer,
            start.elapsed().as_secs_f32(),
            app.window.size(),
            app.window.drawable_size(),
        );
        app.window.gl_swap_window();

        if let Some(rest) = frame_interval.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    log::info!("shutting down");
    Ok(())
}

fn report_fatal(message: &str) {
    eprintln!("{message}");
    #[cfg(windows)]
    if let Err(e) = msgbox::create(WINDOW_TITLE, message, msgbox::IconType::Error) {
        eprintln!("could not show the error dialog: {e}");
    }
}

fn main() {
    if let Err(e) = run() {
        log::error!("{e:#}");
        report_fatal(&format!("Caught a fatal error: {e:#}"));
        std::process::exit(-1);
    }
}
