//! Context shared by every scene for the lifetime of the application

use std::fmt;

use crate::audio::AudioDevice;
use crate::input::InputHandle;
use crate::render::{Camera, RecordingRenderer, RenderBackend};

/// Window properties scenes may read and adjust
#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Title bar text
    pub title: String,
    /// Whether the OS cursor is visible
    pub show_cursor: bool,
    /// Whether mouse motion steers the camera
    pub mouse_camera: bool,
}

impl WindowState {
    /// Window of the given size with a visible cursor
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            show_cursor: true,
            mouse_camera: false,
        }
    }
}

/// Counts of scoped resources that must be released when a scene closes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceCounts {
    /// Open audio contexts
    pub audio_contexts: usize,
    /// Loaded audio emitters
    pub audio_emitters: usize,
    /// Pointer-down subscriptions
    pub pointer_subscriptions: usize,
}

impl fmt::Display for ResourceCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} audio contexts, {} emitters, {} pointer subscriptions",
            self.audio_contexts, self.audio_emitters, self.pointer_subscriptions
        )
    }
}

/// Window, camera, input, audio and renderer shared across scenes
pub struct SceneContext {
    /// Window state
    pub window: WindowState,
    /// Player camera
    pub camera: Camera,
    /// Input state
    pub input: InputHandle,
    /// Audio device
    pub audio: AudioDevice,
    /// Render backend
    pub renderer: Box<dyn RenderBackend>,
}

impl SceneContext {
    /// Assemble a context from its parts
    pub fn new(window: WindowState, audio: AudioDevice, renderer: Box<dyn RenderBackend>) -> Self {
        Self {
            window,
            camera: Camera::default(),
            input: InputHandle::new(),
            audio,
            renderer,
        }
    }

    /// Context with a recording renderer and silent audio
    pub fn headless(width: u32, height: u32) -> Self {
        Self::new(
            WindowState::new(width, height, "headless"),
            AudioDevice::silent(),
            Box::new(RecordingRenderer::new()),
        )
    }

    /// Snapshot of live scoped resources
    pub fn resource_counts(&self) -> ResourceCounts {
        ResourceCounts {
            audio_contexts: self.audio.live_contexts(),
            audio_emitters: self.audio.live_emitters(),
            pointer_subscriptions: self.input.subscriber_count(),
        }
    }
}
