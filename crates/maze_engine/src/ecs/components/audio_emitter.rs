//! Audio emitter component

/// A looping or one-shot sound attached to an entity's position
#[derive(Debug, Clone, PartialEq)]
pub struct AudioEmitterComponent {
    /// Sound asset path
    pub sound: String,

    /// Playback volume
    pub volume: f32,

    /// Whether the sound loops
    pub looping: bool,
}

impl AudioEmitterComponent {
    /// Create a looping emitter at full volume
    pub fn looping(sound: impl Into<String>) -> Self {
        Self {
            sound: sound.into(),
            volume: 1.0,
            looping: true,
        }
    }

    /// Set volume (builder pattern)
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.max(0.0);
        self
    }
}
