//! Animation component
//!
//! Pickups spin and bob in place. The clock advances in the animation system;
//! the rendering system turns it into a draw transform.

/// Playback state of an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Clock advances every frame
    #[default]
    Playing,
    /// Clock is frozen
    Paused,
}

/// Procedural spin/bob animation
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationComponent {
    /// Playback state
    pub state: AnimationState,

    /// Seconds of animation played so far
    pub clock: f32,

    /// Spin around Y in radians per second
    pub spin_speed: f32,

    /// Vertical bob amplitude in world units
    pub bob_amplitude: f32,

    /// Bob cycles per second
    pub bob_frequency: f32,
}

impl AnimationComponent {
    /// Create a spinning animation with no bob
    pub fn spinning(spin_speed: f32) -> Self {
        Self {
            state: AnimationState::Playing,
            clock: 0.0,
            spin_speed,
            bob_amplitude: 0.0,
            bob_frequency: 0.0,
        }
    }

    /// Add a vertical bob (builder pattern)
    pub fn with_bob(mut self, amplitude: f32, frequency: f32) -> Self {
        self.bob_amplitude = amplitude;
        self.bob_frequency = frequency;
        self
    }

    /// Advance the clock if playing
    pub fn advance(&mut self, delta_time: f32) {
        if self.state == AnimationState::Playing {
            self.clock += delta_time;
        }
    }

    /// Current rotation around Y in radians
    pub fn yaw(&self) -> f32 {
        (self.clock * self.spin_speed) % std::f32::consts::TAU
    }

    /// Current vertical offset
    pub fn bob_offset(&self) -> f32 {
        self.bob_amplitude * (self.clock * self.bob_frequency * std::f32::consts::TAU).sin()
    }
}

impl Default for AnimationComponent {
    fn default() -> Self {
        Self::spinning(0.0)
    }
}
