//! Rendering interface
//!
//! The engine never draws anything itself. Systems and scenes describe what
//! should appear through [`RenderBackend`]; the backend owns the GPU side.

pub mod backend;
pub mod camera;

pub use backend::{Color, DrawCommand, DrawLog, Rect, RecordingRenderer, RenderBackend, TextAlign};
pub use camera::Camera;
