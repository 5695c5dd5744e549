//! Component kinds, the component mask and the tagged component record
//!
//! An entity holds at most one component of each [`ComponentKind`]. The
//! [`ComponentMask`] of an entity is always the union of the kinds it holds.

use bitflags::bitflags;

use super::components::{
    AiComponent, AnimationComponent, AudioEmitterComponent, ColliderComponent,
    PositionComponent, RenderableComponent,
};

bitflags! {
    /// Bitmask of component kinds carried by an entity
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentMask: u32 {
        /// Entity has a world position
        const POSITION = 1 << 0;
        /// Entity is driven by the AI system
        const AI = 1 << 1;
        /// Entity takes part in collision
        const COLLIDER = 1 << 2;
        /// Entity is drawn by the rendering system
        const RENDERABLE = 1 << 3;
        /// Entity has an animation clock
        const ANIMATION = 1 << 4;
        /// Entity emits a positional sound
        const AUDIO_EMITTER = 1 << 5;
    }
}

/// Type tag of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// [`PositionComponent`]
    Position,
    /// [`AiComponent`]
    Ai,
    /// [`ColliderComponent`]
    Collider,
    /// [`RenderableComponent`]
    Renderable,
    /// [`AnimationComponent`]
    Animation,
    /// [`AudioEmitterComponent`]
    AudioEmitter,
}

impl ComponentKind {
    /// All kinds, in mask bit order
    pub const ALL: [ComponentKind; 6] = [
        Self::Position,
        Self::Ai,
        Self::Collider,
        Self::Renderable,
        Self::Animation,
        Self::AudioEmitter,
    ];

    /// The single mask bit for this kind
    pub fn mask(self) -> ComponentMask {
        match self {
            Self::Position => ComponentMask::POSITION,
            Self::Ai => ComponentMask::AI,
            Self::Collider => ComponentMask::COLLIDER,
            Self::Renderable => ComponentMask::RENDERABLE,
            Self::Animation => ComponentMask::ANIMATION,
            Self::AudioEmitter => ComponentMask::AUDIO_EMITTER,
        }
    }

    /// Name used in entity descriptor files
    pub fn descriptor_name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Ai => "ai",
            Self::Collider => "collider",
            Self::Renderable => "renderable",
            Self::Animation => "animation",
            Self::AudioEmitter => "audio_emitter",
        }
    }

    /// Resolve a descriptor name back to a kind
    pub fn from_descriptor_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.descriptor_name() == name)
    }
}

/// Tagged component record
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// World position
    Position(PositionComponent),
    /// AI pursuit state
    Ai(AiComponent),
    /// Collision volume
    Collider(ColliderComponent),
    /// Mesh and texture to draw
    Renderable(RenderableComponent),
    /// Animation clock
    Animation(AnimationComponent),
    /// Positional sound
    AudioEmitter(AudioEmitterComponent),
}

impl Component {
    /// Type tag of this component
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Position(_) => ComponentKind::Position,
            Self::Ai(_) => ComponentKind::Ai,
            Self::Collider(_) => ComponentKind::Collider,
            Self::Renderable(_) => ComponentKind::Renderable,
            Self::Animation(_) => ComponentKind::Animation,
            Self::AudioEmitter(_) => ComponentKind::AudioEmitter,
        }
    }
}

/// Typed view into a [`Component`] variant
///
/// Lets callers write `entity.get::<PositionComponent>()` instead of matching
/// on the enum by hand.
pub trait ComponentData: Sized {
    /// Kind tag of the variant holding this type
    const KIND: ComponentKind;

    /// Borrow the payload if `component` is this variant
    fn from_component(component: &Component) -> Option<&Self>;

    /// Mutably borrow the payload if `component` is this variant
    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;

    /// Wrap the payload into its variant
    fn into_component(self) -> Component;
}

macro_rules! component_data {
    ($ty:ty, $variant:ident) => {
        impl ComponentData for $ty {
            const KIND: ComponentKind = ComponentKind::$variant;

            fn from_component(component: &Component) -> Option<&Self> {
                match component {
                    Component::$variant(data) => Some(data),
                    _ => None,
                }
            }

            fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                match component {
                    Component::$variant(data) => Some(data),
                    _ => None,
                }
            }

            fn into_component(self) -> Component {
                Component::$variant(self)
            }
        }

        impl From<$ty> for Component {
            fn from(data: $ty) -> Self {
                Component::$variant(data)
            }
        }
    };
}

component_data!(PositionComponent, Position);
component_data!(AiComponent, Ai);
component_data!(ColliderComponent, Collider);
component_data!(RenderableComponent, Renderable);
component_data!(AnimationComponent, Animation);
component_data!(AudioEmitterComponent, AudioEmitter);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_each_kind_has_a_distinct_bit() {
        let mut union = ComponentMask::empty();
        for kind in ComponentKind::ALL {
            assert!(!union.intersects(kind.mask()));
            union |= kind.mask();
        }
        assert_eq!(union, ComponentMask::all());
    }

    #[test]
    fn test_descriptor_names_resolve_back() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_descriptor_name(kind.descriptor_name()), Some(kind));
        }
        assert_eq!(ComponentKind::from_descriptor_name("rigidbody"), None);
    }

    #[test]
    fn test_typed_view_matches_only_its_variant() {
        let component: Component = PositionComponent::new(Vec3::new(1.0, 2.0, 3.0)).into();
        assert_eq!(component.kind(), ComponentKind::Position);
        assert!(PositionComponent::from_component(&component).is_some());
        assert!(AiComponent::from_component(&component).is_none());
    }
}
