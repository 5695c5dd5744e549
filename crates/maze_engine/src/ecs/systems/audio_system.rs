//! Audio system
//!
//! Gives every positioned entity with an audio emitter component a live
//! emitter on the scene's audio device, keeps the emitter at the entity's
//! position, and releases it once the entity is gone.

use std::any::Any;
use std::collections::{HashMap, HashSet};

use log::warn;

use crate::audio::Emitter;
use crate::ecs::components::{AudioEmitterComponent, PositionComponent};
use crate::ecs::{ComponentMask, EntityRegistry, System};
use crate::scene::SceneContext;

/// Drives entity-bound sound sources
#[derive(Debug, Default)]
pub struct AudioSystem {
    emitters: HashMap<String, Emitter>,
    failed: HashSet<String>,
}

impl AudioSystem {
    /// Name the system registers under
    pub const NAME: &'static str = "audio";

    /// Create the system
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of emitters currently held
    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    fn acquire(&mut self, name: &str, sound: &AudioEmitterComponent, ctx: &SceneContext) -> Option<&Emitter> {
        if self.failed.contains(name) {
            return None;
        }
        if !self.emitters.contains_key(name) {
            match ctx.audio.load(&sound.sound) {
                Ok(emitter) => {
                    emitter.set_volume(sound.volume);
                    emitter.set_looping(sound.looping);
                    emitter.play();
                    self.emitters.insert(name.to_string(), emitter);
                }
                Err(e) => {
                    // not retried every frame
                    warn!("Entity '{}' has no sound: {}", name, e);
                    self.failed.insert(name.to_string());
                    return None;
                }
            }
        }
        self.emitters.get(name)
    }
}

impl System for AudioSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn act(&mut self, registry: &mut EntityRegistry, ctx: &mut SceneContext) {
        let mut live = HashSet::new();
        for entity in registry.find_by_mask(ComponentMask::AUDIO_EMITTER | ComponentMask::POSITION) {
            let (Some(sound), Some(position)) =
                (entity.get::<AudioEmitterComponent>(), entity.get::<PositionComponent>())
            else {
                continue;
            };
            live.insert(entity.name().to_string());
            if let Some(emitter) = self.acquire(entity.name(), sound, ctx) {
                emitter.set_position(position.position);
            }
        }

        self.emitters.retain(|name, _| live.contains(name));
        self.failed.retain(|name| live.contains(name));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
