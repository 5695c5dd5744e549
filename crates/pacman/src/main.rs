//! Pacman 3D
//!
//! Runs the game headless: draw calls go to a recording renderer and audio
//! to a silent backend. With the default demo settings the menu is clicked
//! through on the first frame and the maze runs for a fixed number of frames.

mod config;
mod scenes;

use std::process::ExitCode;
use std::rc::Rc;

use log::{error, info};
use maze_engine::audio::AudioDevice;
use maze_engine::config::Config;
use maze_engine::foundation::logging;
use maze_engine::input::MouseButton;
use maze_engine::render::RecordingRenderer;
use maze_engine::scene::{SceneContext, SceneManager, WindowState};
use maze_engine::{Engine, EngineConfig, EngineError};

use crate::config::GameConfig;

const CONFIG_PATH: &str = "pacman.toml";

fn run(config: GameConfig) -> Result<(), EngineError> {
    let config = Rc::new(config);
    let window = WindowState::new(config.window.width, config.window.height, config.window.title.clone());
    let context = SceneContext::new(window, AudioDevice::silent(), Box::new(RecordingRenderer::new()));

    let mut scenes = SceneManager::new(context);
    for entry in scenes::catalog(&config) {
        scenes.add_scene(entry);
    }

    let mut engine = Engine::new(
        scenes,
        EngineConfig {
            target_fps: config.window.target_fps,
            frame_limit: config.demo.frame_limit,
            start_scene: scenes::MAIN_MENU,
        },
    );
    engine.start()?;
    if config.demo.auto_start {
        info!("Demo: clicking through the main menu");
        engine.scenes().context().input.press_button(MouseButton::Left);
    }
    engine.run()
}

fn main() -> ExitCode {
    logging::init();

    let config = match GameConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load {}: {}", CONFIG_PATH, e);
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
