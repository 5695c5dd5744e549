//! Frame clock for the engine loop

use std::time::Instant;

/// Measures the gap between frames
pub struct FrameClock {
    started: Instant,
    last_tick: Instant,
    ticks: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Start a clock at the current instant
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_tick: now,
            ticks: 0,
        }
    }

    /// Mark the start of a frame; returns seconds since the previous one
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.ticks += 1;
        delta
    }

    /// Frames per second averaged since the clock started
    pub fn average_fps(&self) -> f32 {
        let elapsed = self.started.elapsed().as_secs_f32();
        if elapsed > 0.0 {
            self.ticks as f32 / elapsed
        } else {
            0.0
        }
    }
}
