use std::{path::PathBuf, time::Instant};

use glow::HasContext;
use lightdemo_core::config::SceneConfig;
use sdl2::event::{Event, WindowEvent};

use crate::abs::App;

mod abs;
mod input;
mod logging;
mod other;
mod render;
mod scenes;

const DEFAULT_SCENE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/scene.json");

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let scene_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCENE));
    let config = SceneConfig::load(&scene_path)?;

    let mut app = App::new(&config.window)?;
    unsafe {
        app.gl.enable(glow::DEPTH_TEST);
    }

    let bindings = input::Bindings::new(&config.bindings)?;
    let scene = scenes::lightdemo::LightDemo::new(&app.gl, &config, bindings, app.aspect_ratio())?;
    let mut scene_manager = scenes::SceneManager::new(Box::new(scene));

    let mut keyboard_state = other::KeyboardState::default();

    let mut frames = 0u64;
    let mut fps_frames = 0u32;
    let mut fps_timer = Instant::now();

    'running: loop {
        keyboard_state.begin_frame();

        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (width, height) = app.window.drawable_size();
                    scene_manager.resize(&app.gl, width, height);
                }
                _ => keyboard_state.handle_event(&event),
            }
        }

        let ctx = other::UpdateContext::new(&keyboard_state);
        if !scene_manager.update(&ctx) {
            break 'running;
        }

        scene_manager.render(&app.gl);
        app.window.gl_swap_window();

        frames += 1;
        fps_frames += 1;
        let elapsed = fps_timer.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            let fps = fps_frames as f32 / elapsed;
            let title = format!("{} - {:.0} FPS", config.window.title, fps);
            app.window.set_title(&title).map_err(|e| e.to_string())?;
            fps_frames = 0;
            fps_timer = Instant::now();
        }
    }

    log::info!("Shutting down after {} frames", frames);
    Ok(())
}
