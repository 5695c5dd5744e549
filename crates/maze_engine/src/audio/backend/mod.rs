//! Audio backend abstraction
//!
//! Single-threaded; handles are plain ids owned by the backend.

mod null_backend;

pub use null_backend::{AudioEvent, AudioJournal, NullAudioBackend};

use std::path::Path;

use super::AudioError;
use crate::foundation::math::Vec3;

/// Backend-side audio context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextHandle(pub u32);

/// Backend-side loaded sound source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// Audio backend trait for platform abstraction
pub trait AudioBackend {
    /// Open an audio context
    fn open_context(&mut self) -> Result<ContextHandle, AudioError>;

    /// Close an audio context
    fn close_context(&mut self, context: ContextHandle);

    /// Load a sound file into a new source
    fn load(&mut self, path: &Path) -> Result<SoundHandle, AudioError>;

    /// Release a source
    fn release(&mut self, sound: SoundHandle);

    /// Start or restart playback
    fn play(&mut self, sound: SoundHandle) -> Result<(), AudioError>;

    /// Stop playback
    fn stop(&mut self, sound: SoundHandle) -> Result<(), AudioError>;

    /// Set playback gain
    fn set_volume(&mut self, sound: SoundHandle, volume: f32) -> Result<(), AudioError>;

    /// Loop playback until stopped
    fn set_looping(&mut self, sound: SoundHandle, looping: bool) -> Result<(), AudioError>;

    /// Position the source in world space
    fn set_position(&mut self, sound: SoundHandle, position: Vec3) -> Result<(), AudioError>;

    /// Check if a source is playing
    fn is_playing(&self, sound: SoundHandle) -> bool;
}
