//! Entity registry
//!
//! Sole owner of a scene's entities. Entities are kept in insertion order so
//! mask queries return a stable, reproducible sequence, and are indexed by
//! their unique name.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};

use super::component::ComponentMask;
use super::entity::Entity;
use super::loader::{parse_document, LoadError, LoadReport};

/// Registry of the entities of one scene
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    by_name: HashMap<String, usize>,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the entities described by a RON descriptor document
    ///
    /// Fails only when the document itself is malformed. Records that cannot
    /// be resolved are skipped, logged and returned in the report.
    pub fn load(&mut self, source: &str) -> Result<LoadReport, LoadError> {
        let document = parse_document(source)?;
        let mut report = LoadReport::default();

        for descriptor in &document.entities {
            match descriptor.resolve().and_then(|entity| self.spawn(entity)) {
                Ok(()) => report.loaded.push(descriptor.name.clone()),
                Err(err) => {
                    warn!("Skipping entity '{}': {}", descriptor.name, err);
                    report.skipped.push(err);
                }
            }
        }

        info!(
            "Loaded {} entities ({} skipped), registry now holds {}",
            report.loaded.len(),
            report.skipped.len(),
            self.entities.len()
        );
        Ok(report)
    }

    /// Read a descriptor file and [`load`](Self::load) it
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading entities from {}", path.display());
        self.load(&source)
    }

    /// Add a single entity; names must be unique
    pub fn spawn(&mut self, entity: Entity) -> Result<(), LoadError> {
        if self.by_name.contains_key(entity.name()) {
            return Err(LoadError::DuplicateName(entity.name().to_string()));
        }
        self.by_name.insert(entity.name().to_string(), self.entities.len());
        self.entities.push(entity);
        Ok(())
    }

    /// The entity with this name, if any
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        self.by_name.get(name).map(|&index| &self.entities[index])
    }

    /// Mutable access to the entity with this name, if any
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Entity> {
        let index = *self.by_name.get(name)?;
        self.entities.get_mut(index)
    }

    /// Every entity whose mask is a superset of `mask`, in insertion order
    pub fn find_by_mask(&self, mask: ComponentMask) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.matches(mask)).collect()
    }

    /// Mutable iteration over every entity whose mask is a superset of `mask`
    pub fn iter_mask_mut(&mut self, mask: ComponentMask) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut().filter(move |e| e.matches(mask))
    }

    /// Names of the entities matching `mask`, in insertion order
    ///
    /// Owned snapshot for callers that need to mutate the registry while
    /// walking the result.
    pub fn names_with_mask(&self, mask: ComponentMask) -> Vec<String> {
        self.entities
            .iter()
            .filter(|e| e.matches(mask))
            .map(|e| e.name().to_string())
            .collect()
    }

    /// Remove and return the entity with this name; unknown names are a no-op
    pub fn remove(&mut self, name: &str) -> Option<Entity> {
        let index = self.by_name.remove(name)?;
        let entity = self.entities.remove(index);
        for slot in self.by_name.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        debug!("Removed entity '{}'", name);
        Some(entity)
    }

    /// All entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{AiComponent, PositionComponent, RenderableComponent};
    use crate::foundation::math::Vec3;

    fn names(entities: &[&Entity]) -> Vec<String> {
        entities.iter().map(|e| e.name().to_string()).collect()
    }

    fn sample_registry() -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        registry.spawn(Entity::new("floor").with(RenderableComponent::new("floor.obj"))).unwrap();
        registry
            .spawn(Entity::new("ghost_1").with(PositionComponent::new(Vec3::zeros())).with(AiComponent::default()))
            .unwrap();
        registry.spawn(Entity::new("coin_1").with(PositionComponent::new(Vec3::x()))).unwrap();
        registry
            .spawn(Entity::new("ghost_2").with(AiComponent::default()).with(PositionComponent::new(Vec3::z())))
            .unwrap();
        registry
    }

    #[test]
    fn test_find_by_mask_is_superset_match_in_insertion_order() {
        let registry = sample_registry();
        let ghosts = registry.find_by_mask(ComponentMask::AI | ComponentMask::POSITION);
        assert_eq!(names(&ghosts), vec!["ghost_1", "ghost_2"]);

        let positioned = registry.find_by_mask(ComponentMask::POSITION);
        assert_eq!(names(&positioned), vec!["ghost_1", "coin_1", "ghost_2"]);

        assert_eq!(registry.find_by_mask(ComponentMask::empty()).len(), 4);
        assert!(registry.find_by_mask(ComponentMask::AUDIO_EMITTER).is_empty());
    }

    #[test]
    fn test_removed_entity_disappears_from_all_queries() {
        let mut registry = sample_registry();
        let removed = registry.remove("ghost_1").unwrap();
        assert_eq!(removed.name(), "ghost_1");

        assert!(registry.find_by_name("ghost_1").is_none());
        assert_eq!(names(&registry.find_by_mask(ComponentMask::AI)), vec!["ghost_2"]);
        // Index of later entities is still correct after the shift
        assert_eq!(registry.find_by_name("ghost_2").unwrap().name(), "ghost_2");
        assert_eq!(registry.find_by_name("coin_1").unwrap().name(), "coin_1");
    }

    #[test]
    fn test_remove_unknown_name_is_noop() {
        let mut registry = sample_registry();
        assert!(registry.remove("nobody").is_none());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_duplicate_spawn_rejected() {
        let mut registry = sample_registry();
        let err = registry.spawn(Entity::new("coin_1")).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateName(name) if name == "coin_1"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_load_skips_bad_records_and_keeps_the_rest() {
        let mut registry = EntityRegistry::new();
        let report = registry
            .load(
                r#"(entities: [
                    (name: "coin_1", components: [(kind: "position", position: Some((1.0, 0.5, 2.0)))]),
                    (name: "mystery", components: [(kind: "teleporter")]),
                    (name: "coin_2", components: [(kind: "position", position: Some((2.0, 0.5, 2.0)))]),
                    (name: "coin_1", components: []),
                ])"#,
            )
            .unwrap();

        assert_eq!(report.loaded, vec!["coin_1", "coin_2"]);
        assert_eq!(report.skipped.len(), 2);
        assert!(!report.is_clean());
        assert!(registry.find_by_name("mystery").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_malformed_document_adds_nothing() {
        let mut registry = sample_registry();
        assert!(matches!(registry.load("(entities: [ oops"), Err(LoadError::Parse(_))));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_load_file_reports_missing_file() {
        let mut registry = EntityRegistry::new();
        let err = registry.load_file("no/such/entities.ron").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_names_with_mask_snapshot() {
        let registry = sample_registry();
        assert_eq!(registry.names_with_mask(ComponentMask::AI), vec!["ghost_1", "ghost_2"]);
    }
}
