//! Title screen
//!
//! A click starts a pacman sweeping across the screen; once it has eaten
//! its way past the right edge the game starts.

use std::path::PathBuf;

use log::warn;
use maze_engine::audio::{AudioContext, Emitter};
use maze_engine::foundation::math::Vec2;
use maze_engine::input::{KeyCode, MouseButton, PointerSubscription};
use maze_engine::render::{Color, Rect, TextAlign};
use maze_engine::scene::{Scene, SceneContext, SceneError, Transition};

use super::PACMAN_IMAGE;
use crate::config::GameConfig;

/// Sweep speed in pixels per second
const SWEEP_SPEED: f32 = 2000.0;
/// Pulse speed of the play label in font points per second
const PULSE_SPEED: f32 = 50.0;
const PULSE_MAX: f32 = 30.0;
const PULSE_MIN: f32 = -10.0;

/// Main menu scene
pub struct MainMenu {
    pointer: PointerSubscription,
    audio: AudioContext,
    select_sound: PathBuf,
    select_volume: f32,
    select: Option<Emitter>,
    pulse: f32,
    pulse_direction: f32,
    sweep_x: Option<f32>,
}

impl MainMenu {
    /// Build the menu, subscribing to pointer clicks
    pub fn new(ctx: &mut SceneContext, config: &GameConfig) -> Result<Self, SceneError> {
        ctx.window.title = "Main Menu".to_string();
        ctx.window.show_cursor = true;
        ctx.window.mouse_camera = false;

        Ok(Self {
            pointer: ctx.input.subscribe_pointer_down(),
            audio: ctx.audio.open_context()?,
            select_sound: config.asset(&config.sounds.menu_select.path),
            select_volume: config.sounds.menu_select.volume,
            select: None,
            pulse: 1.0,
            pulse_direction: 1.0,
            sweep_x: None,
        })
    }

    /// Whether the start sweep is running
    pub fn is_starting(&self) -> bool {
        self.sweep_x.is_some()
    }

    fn start(&mut self) {
        if self.sweep_x.is_some() {
            return;
        }
        match self.audio.load(&self.select_sound) {
            Ok(emitter) => {
                emitter.set_volume(self.select_volume);
                emitter.play();
                self.select = Some(emitter);
            }
            Err(e) => warn!("Menu select sound unavailable: {}", e),
        }
        self.sweep_x = Some(0.0);
    }
}

impl Scene for MainMenu {
    fn name(&self) -> &str {
        "MainMenu"
    }

    fn update(&mut self, ctx: &mut SceneContext, dt: f32) -> Transition {
        if ctx.input.was_key_pressed(KeyCode::Escape) {
            return Transition::Quit;
        }

        self.pulse += dt * self.pulse_direction * PULSE_SPEED;
        if self.pulse > PULSE_MAX || self.pulse < PULSE_MIN {
            self.pulse_direction = -self.pulse_direction;
        }

        let clicked = self
            .pointer
            .drain()
            .into_iter()
            .any(|button| matches!(button, MouseButton::Left | MouseButton::Right));
        if clicked {
            self.start();
        }

        if let Some(x) = self.sweep_x.as_mut() {
            *x += dt * SWEEP_SPEED;
            if *x > ctx.window.width as f32 + 50.0 {
                return Transition::Next;
            }
        }
        Transition::Stay
    }

    fn render(&mut self, ctx: &mut SceneContext, _dt: f32) {
        let width = ctx.window.width as f32;
        let height = ctx.window.height as f32;
        let font_size = width.min(height) / 10.0;
        let middle_x = width / 2.0;
        let renderer = ctx.renderer.as_mut();

        renderer.draw_label(
            Rect::new(0.0, font_size / 2.0, width, font_size * 2.0),
            "Pacman 3D",
            font_size,
            TextAlign::Center,
        );
        renderer.draw_image(Vec2::new(middle_x - 512.0, font_size / 2.0 + 26.0), PACMAN_IMAGE, false, 2.0);
        renderer.draw_image(Vec2::new(middle_x + 400.0, font_size / 2.0 + 26.0), PACMAN_IMAGE, true, 2.0);

        // the sweep eats the play label once it passes a quarter of the way
        let eaten = self.sweep_x.is_some_and(|x| x > width / 4.0);
        if !eaten {
            renderer.draw_label(
                Rect::new(0.0, height / 2.0, width, font_size * 2.0),
                "PLAY",
                font_size + self.pulse,
                TextAlign::Center,
            );
        }
        if let Some(x) = self.sweep_x {
            renderer.draw_image(Vec2::new(x, font_size / 2.0 + 180.0), PACMAN_IMAGE, false, 10.0);
        }
    }

    fn clear_color(&self) -> Color {
        Color::FIREBRICK
    }
}
