//! Silent audio backend
//!
//! Accepts every call, plays nothing, and journals what happened so headless
//! runs and tests can observe audio behaviour.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::trace;

use super::{AudioBackend, ContextHandle, SoundHandle};
use crate::audio::AudioError;
use crate::foundation::math::Vec3;

/// Something the null backend was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// A sound was loaded
    Loaded(PathBuf),
    /// A sound started playing
    Played(PathBuf),
    /// A sound was stopped
    Stopped(PathBuf),
    /// A sound was released
    Released(PathBuf),
}

/// Shared journal of audio events
#[derive(Debug, Clone, Default)]
pub struct AudioJournal(Rc<RefCell<Vec<AudioEvent>>>);

impl AudioJournal {
    fn push(&self, event: AudioEvent) {
        trace!("audio {:?}", event);
        self.0.borrow_mut().push(event);
    }

    /// Snapshot of the journal
    pub fn events(&self) -> Vec<AudioEvent> {
        self.0.borrow().clone()
    }

    /// Paths that were played, in order
    pub fn played(&self) -> Vec<PathBuf> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                AudioEvent::Played(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug)]
struct Voice {
    path: PathBuf,
    playing: bool,
}

/// Backend that produces no sound
#[derive(Debug, Default)]
pub struct NullAudioBackend {
    next_id: u32,
    contexts: HashSet<ContextHandle>,
    voices: HashMap<SoundHandle, Voice>,
    missing: HashSet<PathBuf>,
    journal: AudioJournal,
}

impl NullAudioBackend {
    /// Create a silent backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Make loads of `path` fail as if the file were absent
    pub fn with_missing(mut self, path: impl Into<PathBuf>) -> Self {
        self.missing.insert(path.into());
        self
    }

    /// Handle to the event journal
    pub fn journal(&self) -> AudioJournal {
        self.journal.clone()
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn voice_mut(&mut self, sound: SoundHandle) -> Result<&mut Voice, AudioError> {
        self.voices
            .get_mut(&sound)
            .ok_or(AudioError::InvalidHandle(sound.0))
    }
}

impl AudioBackend for NullAudioBackend {
    fn open_context(&mut self) -> Result<ContextHandle, AudioError> {
        let handle = ContextHandle(self.next_id());
        self.contexts.insert(handle);
        Ok(handle)
    }

    fn close_context(&mut self, context: ContextHandle) {
        self.contexts.remove(&context);
    }

    fn load(&mut self, path: &Path) -> Result<SoundHandle, AudioError> {
        if self.missing.contains(path) {
            return Err(AudioError::LoadFailed {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }
        let handle = SoundHandle(self.next_id());
        self.voices.insert(
            handle,
            Voice {
                path: path.to_path_buf(),
                playing: false,
            },
        );
        self.journal.push(AudioEvent::Loaded(path.to_path_buf()));
        Ok(handle)
    }

    fn release(&mut self, sound: SoundHandle) {
        if let Some(voice) = self.voices.remove(&sound) {
            self.journal.push(AudioEvent::Released(voice.path));
        }
    }

    fn play(&mut self, sound: SoundHandle) -> Result<(), AudioError> {
        let voice = self.voice_mut(sound)?;
        voice.playing = true;
        let path = voice.path.clone();
        self.journal.push(AudioEvent::Played(path));
        Ok(())
    }

    fn stop(&mut self, sound: SoundHandle) -> Result<(), AudioError> {
        let voice = self.voice_mut(sound)?;
        voice.playing = false;
        let path = voice.path.clone();
        self.journal.push(AudioEvent::Stopped(path));
        Ok(())
    }

    fn set_volume(&mut self, sound: SoundHandle, _volume: f32) -> Result<(), AudioError> {
        self.voice_mut(sound).map(|_| ())
    }

    fn set_looping(&mut self, sound: SoundHandle, _looping: bool) -> Result<(), AudioError> {
        self.voice_mut(sound).map(|_| ())
    }

    fn set_position(&mut self, sound: SoundHandle, _position: Vec3) -> Result<(), AudioError> {
        self.voice_mut(sound).map(|_| ())
    }

    fn is_playing(&self, sound: SoundHandle) -> bool {
        self.voices.get(&sound).is_some_and(|v| v.playing)
    }
}
