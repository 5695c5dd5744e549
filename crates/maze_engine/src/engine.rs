//! Frame driver
//!
//! Owns the scene manager and the frame clock. [`Engine::run`] is the real
//! loop with frame pacing; [`Engine::step`] runs exactly one frame with a
//! caller-supplied delta time for scripted and test runs.

use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};
use thiserror::Error;

use crate::foundation::time::FrameClock;
use crate::scene::{SceneError, SceneManager, TickOutcome};

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// A scene failed to build or tick
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Frame loop configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Frames per second to pace to; zero runs unpaced
    pub target_fps: u32,

    /// Stop after this many frames
    pub frame_limit: Option<u64>,

    /// Catalog index activated when the loop starts
    pub start_scene: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            frame_limit: None,
            start_scene: 0,
        }
    }
}

impl EngineConfig {
    fn frame_duration(&self) -> Option<Duration> {
        (self.target_fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(self.target_fps)))
    }
}

/// Main engine struct
pub struct Engine {
    scenes: SceneManager,
    clock: FrameClock,
    config: EngineConfig,
    frames: u64,
}

impl Engine {
    /// Create an engine over a populated scene manager
    pub fn new(scenes: SceneManager, config: EngineConfig) -> Self {
        Self {
            scenes,
            clock: FrameClock::new(),
            config,
            frames: 0,
        }
    }

    /// Scene manager
    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    /// Scene manager, mutably
    pub fn scenes_mut(&mut self) -> &mut SceneManager {
        &mut self.scenes
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Activate the start scene if nothing is active yet
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.scenes.current_index().is_none() {
            self.scenes.change_scene(self.config.start_scene)?;
        }
        Ok(())
    }

    /// Run one frame with the given delta time
    pub fn step(&mut self, delta_time: f32) -> Result<TickOutcome, EngineError> {
        let outcome = self.scenes.tick(delta_time)?;
        self.scenes.context().input.end_frame();
        self.frames += 1;
        Ok(outcome)
    }

    /// Run frames until a scene quits or the frame limit is reached, then
    /// close the active scene
    pub fn run(&mut self) -> Result<(), EngineError> {
        info!("Starting main loop...");
        let result = self.run_frames();
        self.scenes.shutdown();
        info!(
            "Engine shutdown complete after {} frames ({:.1} fps)",
            self.frames,
            self.clock.average_fps()
        );
        result
    }

    fn run_frames(&mut self) -> Result<(), EngineError> {
        self.start()?;
        let frame_duration = self.config.frame_duration();
        self.clock = FrameClock::new();

        loop {
            let frame_start = Instant::now();
            let delta_time = self.clock.tick();
            if self.step(delta_time)? == TickOutcome::Quit {
                info!("Quit requested");
                return Ok(());
            }
            if self.config.frame_limit.is_some_and(|limit| self.frames >= limit) {
                info!("Frame limit reached");
                return Ok(());
            }

            if let Some(frame_duration) = frame_duration {
                let spent = frame_start.elapsed();
                if let Some(remaining) = frame_duration.checked_sub(spent) {
                    thread::sleep(remaining);
                } else if spent > frame_duration * 2 {
                    warn!("Slow frame: {:?}", spent);
                }
            }
        }
    }
}
