//! Shared audio device and RAII resource guards

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use log::{debug, warn};

use super::backend::{AudioBackend, ContextHandle, NullAudioBackend, SoundHandle};
use super::AudioError;
use crate::foundation::math::Vec3;

struct DeviceState {
    backend: Box<dyn AudioBackend>,
    live_contexts: usize,
    live_emitters: usize,
}

/// Cloneable handle to the process audio backend
#[derive(Clone)]
pub struct AudioDevice {
    state: Rc<RefCell<DeviceState>>,
}

impl std::fmt::Debug for AudioDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("AudioDevice")
            .field("live_contexts", &state.live_contexts)
            .field("live_emitters", &state.live_emitters)
            .finish()
    }
}

impl AudioDevice {
    /// Wrap a backend
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            state: Rc::new(RefCell::new(DeviceState {
                backend,
                live_contexts: 0,
                live_emitters: 0,
            })),
        }
    }

    /// Device over [`NullAudioBackend`]
    pub fn silent() -> Self {
        Self::new(Box::new(NullAudioBackend::new()))
    }

    /// Open a context; it is closed when the guard drops
    pub fn open_context(&self) -> Result<AudioContext, AudioError> {
        let mut state = self.state.borrow_mut();
        let handle = state.backend.open_context()?;
        state.live_contexts += 1;
        debug!("Opened audio context {:?}", handle);
        Ok(AudioContext {
            device: self.clone(),
            handle,
        })
    }

    /// Load a sound into a new emitter; it is released when the guard drops
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Emitter, AudioError> {
        let mut state = self.state.borrow_mut();
        let handle = state.backend.load(path.as_ref())?;
        state.live_emitters += 1;
        Ok(Emitter {
            device: self.clone(),
            handle,
        })
    }

    /// Open contexts not yet dropped
    pub fn live_contexts(&self) -> usize {
        self.state.borrow().live_contexts
    }

    /// Emitters not yet dropped
    pub fn live_emitters(&self) -> usize {
        self.state.borrow().live_emitters
    }

    fn with_backend<R>(&self, f: impl FnOnce(&mut dyn AudioBackend) -> R) -> R {
        f(self.state.borrow_mut().backend.as_mut())
    }
}

/// Open audio context guard
#[derive(Debug)]
pub struct AudioContext {
    device: AudioDevice,
    handle: ContextHandle,
}

impl AudioContext {
    /// Load a sound into a new emitter on this context's device
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Emitter, AudioError> {
        self.device.load(path)
    }
}

impl Drop for AudioContext {
    fn drop(&mut self) {
        let mut state = self.device.state.borrow_mut();
        state.backend.close_context(self.handle);
        state.live_contexts -= 1;
        debug!("Closed audio context {:?}", self.handle);
    }
}

/// Loaded sound source guard
///
/// Playback failures are logged and otherwise ignored: a missing sound is
/// never fatal.
#[derive(Debug)]
pub struct Emitter {
    device: AudioDevice,
    handle: SoundHandle,
}

impl Emitter {
    fn apply(&self, what: &str, f: impl FnOnce(&mut dyn AudioBackend, SoundHandle) -> Result<(), AudioError>) {
        let handle = self.handle;
        if let Err(e) = self.device.with_backend(|backend| f(backend, handle)) {
            warn!("Audio {} failed: {}", what, e);
        }
    }

    /// Start or restart playback
    pub fn play(&self) {
        self.apply("play", |b, h| b.play(h));
    }

    /// Stop playback
    pub fn stop(&self) {
        self.apply("stop", |b, h| b.stop(h));
    }

    /// Set playback gain
    pub fn set_volume(&self, volume: f32) {
        self.apply("volume", |b, h| b.set_volume(h, volume));
    }

    /// Loop playback until stopped
    pub fn set_looping(&self, looping: bool) {
        self.apply("looping", |b, h| b.set_looping(h, looping));
    }

    /// Position the source in world space
    pub fn set_position(&self, position: Vec3) {
        self.apply("position", |b, h| b.set_position(h, position));
    }

    /// Whether the source is currently playing
    pub fn is_playing(&self) -> bool {
        let handle = self.handle;
        self.device.with_backend(|b| b.is_playing(handle))
    }
}

impl Drop for Emitter {
    fn drop(&mut self) {
        let mut state = self.device.state.borrow_mut();
        state.backend.release(self.handle);
        state.live_emitters -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioEvent;
    use std::path::PathBuf;

    #[test]
    fn test_guards_track_live_counts() {
        let device = AudioDevice::silent();
        {
            let context = device.open_context().unwrap();
            let _a = context.load("a.wav").unwrap();
            let _b = context.load("b.wav").unwrap();
            assert_eq!(device.live_contexts(), 1);
            assert_eq!(device.live_emitters(), 2);
        }
        assert_eq!(device.live_contexts(), 0);
        assert_eq!(device.live_emitters(), 0);
    }

    #[test]
    fn test_missing_sound_is_an_error_not_a_panic() {
        let device = AudioDevice::new(Box::new(NullAudioBackend::new().with_missing("gone.wav")));
        assert!(matches!(device.load("gone.wav"), Err(AudioError::LoadFailed { .. })));
        assert_eq!(device.live_emitters(), 0);
    }

    #[test]
    fn test_play_is_journaled() {
        let backend = NullAudioBackend::new();
        let journal = backend.journal();
        let device = AudioDevice::new(Box::new(backend));

        let emitter = device.load("coin.wav").unwrap();
        emitter.play();
        assert!(emitter.is_playing());
        drop(emitter);

        assert_eq!(journal.played(), vec![PathBuf::from("coin.wav")]);
        assert_eq!(journal.events().last(), Some(&AudioEvent::Released(PathBuf::from("coin.wav"))));
    }
}
