//! Audio playback
//!
//! [`AudioDevice`] is a shared handle over one [`AudioBackend`]. Scenes open an
//! [`AudioContext`] and load [`Emitter`]s from it; both are guards that give
//! their backend resource back when dropped, and the device keeps live counts
//! so the scene manager can detect leaks.

pub mod backend;
pub mod device;

use std::path::PathBuf;

use thiserror::Error;

pub use backend::{AudioBackend, AudioEvent, AudioJournal, ContextHandle, NullAudioBackend, SoundHandle};
pub use device::{AudioContext, AudioDevice, Emitter};

/// Audio errors
#[derive(Debug, Error)]
pub enum AudioError {
    /// No output device could be opened
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// A sound file could not be found or decoded
    #[error("failed to load sound {path}: {reason}")]
    LoadFailed {
        /// Sound path as given
        path: PathBuf,
        /// Backend-specific reason
        reason: String,
    },

    /// The handle does not refer to a live resource
    #[error("invalid audio handle {0}")]
    InvalidHandle(u32),
}
