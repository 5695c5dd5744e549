//! Game-over and win screens

use maze_engine::foundation::math::Vec2;
use maze_engine::input::KeyCode;
use maze_engine::render::{Color, Rect, TextAlign};
use maze_engine::scene::{Scene, SceneContext, Transition};

use super::{GAME, PACMAN_IMAGE};

/// Title, image and prompt shown after a game ends
pub struct EndScreen {
    name: &'static str,
    headline: &'static str,
    image: &'static str,
    background: Color,
}

impl EndScreen {
    /// Screen shown when the last life is lost
    pub fn game_over(ctx: &mut SceneContext) -> Self {
        ctx.window.title = "Game Over!".to_string();
        Self::new("GameOver", "GAME OVER!", "textures/pacmandead.png", Color::DARK_SLATE_GRAY, ctx)
    }

    /// Screen shown when every pickup is collected
    pub fn game_win(ctx: &mut SceneContext) -> Self {
        ctx.window.title = "Winner!".to_string();
        Self::new("GameWin", "Winner Winner!", PACMAN_IMAGE, Color::FIREBRICK, ctx)
    }

    fn new(
        name: &'static str,
        headline: &'static str,
        image: &'static str,
        background: Color,
        ctx: &mut SceneContext,
    ) -> Self {
        ctx.window.show_cursor = true;
        ctx.window.mouse_camera = false;
        Self {
            name,
            headline,
            image,
            background,
        }
    }
}

impl Scene for EndScreen {
    fn name(&self) -> &str {
        self.name
    }

    fn update(&mut self, ctx: &mut SceneContext, _dt: f32) -> Transition {
        if ctx.input.was_key_pressed(KeyCode::Escape) {
            return Transition::Quit;
        }
        if ctx.input.was_key_pressed(KeyCode::Enter) {
            return Transition::Change(GAME);
        }
        Transition::Stay
    }

    fn render(&mut self, ctx: &mut SceneContext, _dt: f32) {
        let width = ctx.window.width as f32;
        let height = ctx.window.height as f32;
        let font_size = width.min(height) / 10.0;
        let renderer = ctx.renderer.as_mut();

        renderer.draw_label(
            Rect::new(0.0, font_size / 2.0 + 128.0, width, font_size * 2.0),
            self.headline,
            font_size,
            TextAlign::Center,
        );
        renderer.draw_image(Vec2::new(width / 2.0 - 64.0, height / 2.0), self.image, false, 2.0);
        renderer.draw_label(
            Rect::new(0.0, font_size / 2.0 + 512.0, width, font_size * 2.0),
            "Press ENTER to play again!",
            font_size / 5.0,
            TextAlign::Center,
        );
    }

    fn clear_color(&self) -> Color {
        self.background
    }
}
