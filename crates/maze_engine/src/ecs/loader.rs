//! Declarative entity descriptors
//!
//! Scenes describe their entities in RON documents:
//!
//! ```ron
//! (
//!     entities: [
//!         (
//!             name: "coin_1",
//!             components: [
//!                 (kind: "position", position: Some((1.0, 0.5, 2.0))),
//!                 (kind: "collider", shape: Some(Sphere(radius: 0.3)), rigid: Some(false)),
//!                 (kind: "renderable", mesh: Some("Geometry/coin.obj")),
//!             ],
//!         ),
//!     ],
//! )
//! ```
//!
//! A document that does not parse fails as a whole. A record naming an
//! unknown component kind, or missing a field its kind requires, fails on its
//! own and the remaining records still load.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use super::component::{Component, ComponentKind};
use super::components::{
    AiComponent, AnimationComponent, AudioEmitterComponent, ColliderComponent,
    PositionComponent, RenderableComponent,
};
use super::entity::Entity;
use crate::foundation::math::Vec3;
use crate::physics::CollisionShape;

/// Errors raised while loading entity descriptors
#[derive(Error, Debug)]
pub enum LoadError {
    /// The descriptor file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid descriptor syntax
    #[error("malformed entity descriptor: {0}")]
    Parse(String),

    /// A record names a component kind the engine does not know
    #[error("entity '{entity}' references unknown component kind '{kind}'")]
    UnknownComponent {
        /// Entity name
        entity: String,
        /// Offending kind string
        kind: String,
    },

    /// A record is missing a field required by its component kind
    #[error("entity '{entity}' component '{kind}' is missing field '{field}'")]
    MissingField {
        /// Entity name
        entity: String,
        /// Component kind
        kind: &'static str,
        /// Missing field
        field: &'static str,
    },

    /// An entity with this name is already registered
    #[error("entity '{0}' is already registered")]
    DuplicateName(String),
}

/// Outcome of a bulk load: the entities added and the records skipped
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names of entities added, in document order
    pub loaded: Vec<String>,
    /// Records that failed and were skipped
    pub skipped: Vec<LoadError>,
}

impl LoadReport {
    /// Whether every record loaded
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Top-level descriptor document
#[derive(Debug, Deserialize)]
pub struct SceneDescriptor {
    /// Entity records in load order
    pub entities: Vec<EntityDescriptor>,
}

/// One entity record
#[derive(Debug, Deserialize)]
pub struct EntityDescriptor {
    /// Unique entity name
    pub name: String,
    /// Component records
    #[serde(default)]
    pub components: Vec<ComponentDescriptor>,
}

/// Shape of a collider in descriptor form
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum ShapeDescriptor {
    /// Sphere of the given radius
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Axis-aligned box
    Box {
        /// Half size along each axis
        half_extents: (f32, f32, f32),
    },
}

/// One component record; which fields apply depends on `kind`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ComponentDescriptor {
    /// Component kind name (`position`, `ai`, `collider`, ...)
    pub kind: String,
    /// `position`: world position
    pub position: Option<(f32, f32, f32)>,
    /// `ai`: initial target
    pub target: Option<(f32, f32, f32)>,
    /// `ai`: movement speed
    pub speed: Option<f32>,
    /// `collider`: shape
    pub shape: Option<ShapeDescriptor>,
    /// `collider`: rigid (default) or trigger
    pub rigid: Option<bool>,
    /// `collider`: enabled flag (default true)
    pub enabled: Option<bool>,
    /// `renderable`: mesh path
    pub mesh: Option<String>,
    /// `renderable`: texture path
    pub texture: Option<String>,
    /// `animation`: spin in radians per second
    pub spin_speed: Option<f32>,
    /// `animation`: bob amplitude
    pub bob_amplitude: Option<f32>,
    /// `animation`: bob cycles per second
    pub bob_frequency: Option<f32>,
    /// `audio_emitter`: sound path
    pub sound: Option<String>,
    /// `audio_emitter`: volume
    pub volume: Option<f32>,
    /// `audio_emitter`: looping flag
    pub looping: Option<bool>,
}

/// Parse a descriptor document
pub fn parse_document(source: &str) -> Result<SceneDescriptor, LoadError> {
    ron::from_str(source).map_err(|e| LoadError::Parse(e.to_string()))
}

fn vec3((x, y, z): (f32, f32, f32)) -> Vec3 {
    Vec3::new(x, y, z)
}

impl ShapeDescriptor {
    fn resolve(self) -> CollisionShape {
        match self {
            Self::Sphere { radius } => CollisionShape::Sphere { radius },
            Self::Box { half_extents } => CollisionShape::Box { half_extents: vec3(half_extents) },
        }
    }
}

impl ComponentDescriptor {
    /// Turn the record into a component of its kind
    pub fn resolve(&self, entity: &str) -> Result<Component, LoadError> {
        let kind = ComponentKind::from_descriptor_name(&self.kind).ok_or_else(|| {
            LoadError::UnknownComponent {
                entity: entity.to_string(),
                kind: self.kind.clone(),
            }
        })?;
        let missing = |field: &'static str| LoadError::MissingField {
            entity: entity.to_string(),
            kind: kind.descriptor_name(),
            field,
        };

        let component = match kind {
            ComponentKind::Position => {
                let position = self.position.ok_or_else(|| missing("position"))?;
                PositionComponent::new(vec3(position)).into()
            }
            ComponentKind::Ai => {
                let mut ai = AiComponent::new(self.target.map(vec3).unwrap_or_else(Vec3::zeros));
                if let Some(speed) = self.speed {
                    ai = ai.with_speed(speed);
                }
                ai.into()
            }
            ComponentKind::Collider => {
                let shape = self.shape.ok_or_else(|| missing("shape"))?;
                ColliderComponent {
                    shape: shape.resolve(),
                    rigid: self.rigid.unwrap_or(true),
                    enabled: self.enabled.unwrap_or(true),
                }
                .into()
            }
            ComponentKind::Renderable => {
                let mesh = self.mesh.clone().ok_or_else(|| missing("mesh"))?;
                RenderableComponent {
                    mesh,
                    texture: self.texture.clone(),
                }
                .into()
            }
            ComponentKind::Animation => AnimationComponent::spinning(self.spin_speed.unwrap_or(0.0))
                .with_bob(self.bob_amplitude.unwrap_or(0.0), self.bob_frequency.unwrap_or(0.0))
                .into(),
            ComponentKind::AudioEmitter => {
                let sound = self.sound.clone().ok_or_else(|| missing("sound"))?;
                AudioEmitterComponent {
                    sound,
                    volume: self.volume.unwrap_or(1.0),
                    looping: self.looping.unwrap_or(true),
                }
                .into()
            }
        };
        Ok(component)
    }
}

impl EntityDescriptor {
    /// Build the entity, failing on the first unresolvable component
    pub fn resolve(&self) -> Result<Entity, LoadError> {
        self.components
            .iter()
            .try_fold(Entity::new(self.name.clone()), |mut entity, descriptor| {
                entity.insert(descriptor.resolve(&self.name)?);
                Ok(entity)
            })
    }
}
