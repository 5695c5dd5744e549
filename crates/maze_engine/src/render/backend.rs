//! Render backend abstraction
//!
//! [`RecordingRenderer`] is the headless implementation: it records every
//! call into a shared [`DrawLog`] and traces it through `log`.

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

use super::camera::Camera;
use crate::foundation::math::{Transform, Vec2, Vec3};

/// RGBA colour with components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Fully transparent
    pub const TRANSPARENT: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
    /// Firebrick red
    pub const FIREBRICK: Self = Self::rgb(0.698, 0.133, 0.133);
    /// Dark slate grey
    pub const DARK_SLATE_GRAY: Self = Self::rgb(0.184, 0.310, 0.310);

    /// Opaque colour from RGB
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Screen-space rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Horizontal text alignment inside a label rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Flush left
    Left,
    /// Centred
    Center,
    /// Flush right
    Right,
}

/// Drawing interface consumed by systems and scenes
///
/// Calls are fire-and-forget; the engine never reads anything back.
pub trait RenderBackend {
    /// Start a frame, clearing to `color`
    fn begin_frame(&mut self, color: Color);

    /// Set the view for world-space draws
    fn set_view(&mut self, camera: &Camera);

    /// Set the point lights for world-space draws
    fn set_lights(&mut self, lights: &[Vec3]);

    /// Draw a mesh in world space
    fn draw_mesh(&mut self, mesh: &str, texture: Option<&str>, transform: &Transform);

    /// Draw the sky box centred on `center`
    fn draw_skybox(&mut self, center: Vec3);

    /// Draw a text label in screen space
    fn draw_label(&mut self, rect: Rect, text: &str, font_size: f32, align: TextAlign);

    /// Draw an image in screen space
    fn draw_image(&mut self, position: Vec2, path: &str, flipped: bool, scale: f32);

    /// Present the frame
    fn end_frame(&mut self);
}

/// A recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// [`RenderBackend::begin_frame`]
    BeginFrame(Color),
    /// [`RenderBackend::set_view`]
    SetView(Camera),
    /// [`RenderBackend::set_lights`]
    SetLights(Vec<Vec3>),
    /// [`RenderBackend::draw_mesh`]
    Mesh {
        /// Mesh path
        mesh: String,
        /// Texture path
        texture: Option<String>,
        /// World transform
        transform: Transform,
    },
    /// [`RenderBackend::draw_skybox`]
    SkyBox(Vec3),
    /// [`RenderBackend::draw_label`]
    Label {
        /// Target rectangle
        rect: Rect,
        /// Text
        text: String,
        /// Font size in pixels
        font_size: f32,
        /// Alignment
        align: TextAlign,
    },
    /// [`RenderBackend::draw_image`]
    Image {
        /// Screen position
        position: Vec2,
        /// Image path
        path: String,
        /// Mirrored horizontally
        flipped: bool,
        /// Scale factor
        scale: f32,
    },
    /// [`RenderBackend::end_frame`]
    EndFrame,
}

/// Shared log of recorded draw calls
#[derive(Debug, Clone, Default)]
pub struct DrawLog(Rc<RefCell<Vec<DrawCommand>>>);

impl DrawLog {
    fn push(&self, command: DrawCommand) {
        trace!("draw {:?}", command);
        self.0.borrow_mut().push(command);
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    /// Snapshot of everything recorded so far
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.0.borrow().clone()
    }

    /// Text of every label recorded so far
    pub fn labels(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Label { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Headless backend that records calls instead of drawing
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    log: DrawLog,
}

impl RecordingRenderer {
    /// Create a recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the recorded calls; stays valid after the renderer is boxed
    pub fn log(&self) -> DrawLog {
        self.log.clone()
    }
}

impl RenderBackend for RecordingRenderer {
    fn begin_frame(&mut self, color: Color) {
        self.log.push(DrawCommand::BeginFrame(color));
    }

    fn set_view(&mut self, camera: &Camera) {
        self.log.push(DrawCommand::SetView(*camera));
    }

    fn set_lights(&mut self, lights: &[Vec3]) {
        self.log.push(DrawCommand::SetLights(lights.to_vec()));
    }

    fn draw_mesh(&mut self, mesh: &str, texture: Option<&str>, transform: &Transform) {
        self.log.push(DrawCommand::Mesh {
            mesh: mesh.to_string(),
            texture: texture.map(str::to_string),
            transform: *transform,
        });
    }

    fn draw_skybox(&mut self, center: Vec3) {
        self.log.push(DrawCommand::SkyBox(center));
    }

    fn draw_label(&mut self, rect: Rect, text: &str, font_size: f32, align: TextAlign) {
        self.log.push(DrawCommand::Label {
            rect,
            text: text.to_string(),
            font_size,
            align,
        });
    }

    fn draw_image(&mut self, position: Vec2, path: &str, flipped: bool, scale: f32) {
        self.log.push(DrawCommand::Image {
            position,
            path: path.to_string(),
            flipped,
            scale,
        });
    }

    fn end_frame(&mut self) {
        self.log.push(DrawCommand::EndFrame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_survives_boxing() {
        let renderer = RecordingRenderer::new();
        let log = renderer.log();
        let mut boxed: Box<dyn RenderBackend> = Box::new(renderer);

        boxed.begin_frame(Color::BLACK);
        boxed.draw_label(Rect::new(0.0, 0.0, 100.0, 20.0), "Score: 0", 12.0, TextAlign::Center);
        boxed.end_frame();

        assert_eq!(log.len(), 3);
        assert_eq!(log.labels(), vec!["Score: 0"]);
        assert_eq!(log.take().len(), 3);
        assert!(log.is_empty());
    }
}
