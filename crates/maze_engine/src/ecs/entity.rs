//! Entity implementation
//!
//! An entity is a uniquely named, ordered collection of components. Its mask
//! is kept equal to the union of the kinds it holds on every insert/remove.

use super::component::{Component, ComponentData, ComponentKind, ComponentMask};

/// Named container of typed components
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    components: Vec<Component>,
    mask: ComponentMask,
}

impl Entity {
    /// Create an entity with no components
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            mask: ComponentMask::empty(),
        }
    }

    /// Add a component (builder pattern)
    pub fn with(mut self, component: impl Into<Component>) -> Self {
        self.insert(component);
        self
    }

    /// Unique name of this entity
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mask of the component kinds this entity holds
    pub fn mask(&self) -> ComponentMask {
        self.mask
    }

    /// Whether this entity holds every kind in `mask`
    pub fn matches(&self, mask: ComponentMask) -> bool {
        self.mask.contains(mask)
    }

    /// Components in insertion order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Insert a component, replacing (and returning) any existing one of the same kind
    ///
    /// A replaced component keeps its slot in the ordering.
    pub fn insert(&mut self, component: impl Into<Component>) -> Option<Component> {
        let component = component.into();
        let kind = component.kind();
        let previous = match self.components.iter().position(|c| c.kind() == kind) {
            Some(index) => Some(std::mem::replace(&mut self.components[index], component)),
            None => {
                self.components.push(component);
                None
            }
        };
        self.refresh_mask();
        previous
    }

    /// Remove the component of `kind`, if present
    pub fn remove(&mut self, kind: ComponentKind) -> Option<Component> {
        let index = self.components.iter().position(|c| c.kind() == kind)?;
        let removed = self.components.remove(index);
        self.refresh_mask();
        Some(removed)
    }

    /// Look up a component by type tag
    pub fn find(&self, kind: ComponentKind) -> Option<&Component> {
        if !self.mask.contains(kind.mask()) {
            return None;
        }
        self.components.iter().find(|c| c.kind() == kind)
    }

    /// Typed component access
    pub fn get<T: ComponentData>(&self) -> Option<&T> {
        self.find(T::KIND).and_then(T::from_component)
    }

    /// Typed mutable component access
    pub fn get_mut<T: ComponentData>(&mut self) -> Option<&mut T> {
        if !self.mask.contains(T::KIND.mask()) {
            return None;
        }
        self.components
            .iter_mut()
            .find(|c| c.kind() == T::KIND)
            .and_then(T::from_component_mut)
    }

    fn refresh_mask(&mut self) {
        self.mask = self
            .components
            .iter()
            .fold(ComponentMask::empty(), |mask, c| mask | c.kind().mask());
    }
}
