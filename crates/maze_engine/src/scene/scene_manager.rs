//! Scene catalog and transitions

use log::{debug, error, info};
use thiserror::Error;

use super::context::{ResourceCounts, SceneContext};
use super::{Scene, SceneWorld, Transition};
use crate::audio::AudioError;
use crate::ecs::LoadError;

/// Scene errors
#[derive(Debug, Error)]
pub enum SceneError {
    /// Catalog index out of range
    #[error("scene index {index} out of bounds (catalog has {len} scenes)")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Catalog length
        len: usize,
    },

    /// The catalog has no scenes
    #[error("scene catalog is empty")]
    EmptyCatalog,

    /// No scene has been activated yet
    #[error("no active scene")]
    NoActiveScene,

    /// The active scene has already asked to be replaced
    #[error("a scene transition is already in progress")]
    TransitionInProgress,

    /// The active scene has no world
    #[error("scene {0} has no world")]
    NoWorld(String),

    /// A closed scene left scoped resources behind
    #[error("scene {scene} leaked resources on close: had {before} before, {after} after")]
    ResourceLeakOnClose {
        /// Scene name
        scene: String,
        /// Live resources before the scene was built
        before: ResourceCounts,
        /// Live resources after it was dropped
        after: ResourceCounts,
    },

    /// Entity data for a scene failed to load
    #[error("scene load failed: {0}")]
    Load(#[from] LoadError),

    /// Audio setup for a scene failed
    #[error("scene audio failed: {0}")]
    Audio(#[from] AudioError),
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep looping
    Continue,
    /// The active scene asked to quit
    Quit,
}

/// Constructor for a catalog entry
pub type SceneBuilder = Box<dyn Fn(&mut SceneContext) -> Result<Box<dyn Scene>, SceneError>>;

/// One catalog entry
pub struct SceneEntry {
    name: String,
    builder: SceneBuilder,
}

impl SceneEntry {
    /// Create an entry
    pub fn new<F>(name: impl Into<String>, builder: F) -> Self
    where
        F: Fn(&mut SceneContext) -> Result<Box<dyn Scene>, SceneError> + 'static,
    {
        Self {
            name: name.into(),
            builder: Box::new(builder),
        }
    }

    /// Entry name
    pub fn name(&self) -> &str {
        &self.name
    }
}

struct ActiveScene {
    index: usize,
    scene: Box<dyn Scene>,
    baseline: ResourceCounts,
}

/// Owns the catalog, the active scene and the shared context
pub struct SceneManager {
    catalog: Vec<SceneEntry>,
    active: Option<ActiveScene>,
    pending: Option<Transition>,
    context: SceneContext,
}

impl SceneManager {
    /// Create a manager with no active scene
    pub fn new(context: SceneContext) -> Self {
        Self {
            catalog: Vec::new(),
            active: None,
            pending: None,
            context,
        }
    }

    /// Append a scene to the catalog (builder pattern)
    pub fn with_scene(mut self, entry: SceneEntry) -> Self {
        self.catalog.push(entry);
        self
    }

    /// Append a scene to the catalog
    pub fn add_scene(&mut self, entry: SceneEntry) {
        self.catalog.push(entry);
    }

    /// Number of catalog entries
    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    /// Shared context
    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    /// Shared context, mutably
    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.context
    }

    /// Catalog index of the active scene
    pub fn current_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.index)
    }

    /// Name of the active scene
    pub fn active_scene_name(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.scene.name())
    }

    /// Close the active scene and activate the catalog entry at `index`
    pub fn change_scene(&mut self, index: usize) -> Result<(), SceneError> {
        if index >= self.catalog.len() {
            return Err(SceneError::IndexOutOfBounds {
                index,
                len: self.catalog.len(),
            });
        }

        self.pending = None;
        self.close_active();

        let entry = &self.catalog[index];
        info!("Activating scene {} ({})", index, entry.name);
        let baseline = self.context.resource_counts();
        let scene = (entry.builder)(&mut self.context)?;
        self.active = Some(ActiveScene {
            index,
            scene,
            baseline,
        });
        Ok(())
    }

    /// Activate the next catalog entry, wrapping after the last; with no
    /// active scene this activates the first entry
    pub fn next_scene(&mut self) -> Result<(), SceneError> {
        if self.catalog.is_empty() {
            return Err(SceneError::EmptyCatalog);
        }
        let next = self
            .current_index()
            .map_or(0, |index| (index + 1) % self.catalog.len());
        self.change_scene(next)
    }

    /// Queue a transition; it is applied at the start of the next tick, or at
    /// the end of the current update when requested from within `tick`
    pub fn request_transition(&mut self, transition: Transition) -> Result<(), SceneError> {
        if transition == Transition::Stay {
            return Ok(());
        }
        if self.pending.is_some() {
            return Err(SceneError::TransitionInProgress);
        }
        debug!("Transition requested: {:?}", transition);
        self.pending = Some(transition);
        Ok(())
    }

    /// The active scene's world; refused once a transition is pending
    pub fn active_world_mut(&mut self) -> Result<&mut SceneWorld, SceneError> {
        if self.pending.is_some() {
            return Err(SceneError::TransitionInProgress);
        }
        let active = self.active.as_mut().ok_or(SceneError::NoActiveScene)?;
        let name = active.scene.name().to_string();
        active.scene.world_mut().ok_or(SceneError::NoWorld(name))
    }

    /// Run one frame: apply a transition queued since the last frame, or
    /// update and then either apply the requested transition or render and
    /// run the scene's systems
    pub fn tick(&mut self, dt: f32) -> Result<TickOutcome, SceneError> {
        if self.active.is_none() {
            return Err(SceneError::NoActiveScene);
        }
        if let Some(transition) = self.pending.take() {
            return self.apply(transition);
        }

        let transition = {
            let active = self.active.as_mut().ok_or(SceneError::NoActiveScene)?;
            active.scene.update(&mut self.context, dt)
        };
        self.request_transition(transition)?;

        if let Some(transition) = self.pending.take() {
            return self.apply(transition);
        }

        let active = self.active.as_mut().ok_or(SceneError::NoActiveScene)?;
        let ctx = &mut self.context;
        ctx.renderer.begin_frame(active.scene.clear_color());
        active.scene.render(ctx, dt);
        if let Some(world) = active.scene.world_mut() {
            world.systems.run_frame(&mut world.registry, ctx);
        }
        ctx.renderer.end_frame();
        Ok(TickOutcome::Continue)
    }

    /// Close the active scene, leaving none active
    pub fn shutdown(&mut self) {
        self.pending = None;
        self.close_active();
    }

    fn apply(&mut self, transition: Transition) -> Result<TickOutcome, SceneError> {
        match transition {
            Transition::Stay => {}
            Transition::Change(index) => self.change_scene(index)?,
            Transition::Next => self.next_scene()?,
            Transition::Quit => return Ok(TickOutcome::Quit),
        }
        Ok(TickOutcome::Continue)
    }

    fn close_active(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };
        let name = active.scene.name().to_string();
        debug!("Closing scene {}", name);
        active.scene.close(&mut self.context);
        drop(active.scene);

        let remaining = self.context.resource_counts();
        if remaining != active.baseline {
            report_leak(&SceneError::ResourceLeakOnClose {
                scene: name,
                before: active.baseline,
                after: remaining,
            });
        }
    }
}

impl Drop for SceneManager {
    fn drop(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.scene.close(&mut self.context);
        }
    }
}

/// Leaks are fatal in debug builds and logged in release builds
fn report_leak(leak: &SceneError) {
    if cfg!(debug_assertions) {
        panic!("{}", leak);
    }
    error!("{}", leak);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioContext, AudioDevice};
    use crate::input::{KeyCode, PointerSubscription};
    use crate::render::{DrawCommand, RecordingRenderer};
    use crate::scene::WindowState;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Stub {
        name: String,
        log: Rc<RefCell<Vec<String>>>,
        on_update: Transition,
        world: SceneWorld,
        _audio: Option<AudioContext>,
        _pointer: Option<PointerSubscription>,
    }

    impl Scene for Stub {
        fn name(&self) -> &str {
            &self.name
        }

        fn update(&mut self, ctx: &mut SceneContext, _dt: f32) -> Transition {
            self.log.borrow_mut().push(format!("update {}", self.name));
            if ctx.input.was_key_pressed(KeyCode::Enter) {
                return self.on_update;
            }
            Transition::Stay
        }

        fn render(&mut self, _ctx: &mut SceneContext, _dt: f32) {
            self.log.borrow_mut().push(format!("render {}", self.name));
        }

        fn world_mut(&mut self) -> Option<&mut SceneWorld> {
            Some(&mut self.world)
        }

        fn close(&mut self, _ctx: &mut SceneContext) {
            self.log.borrow_mut().push(format!("close {}", self.name));
        }
    }

    fn entry(name: &'static str, on_update: Transition, log: &Rc<RefCell<Vec<String>>>) -> SceneEntry {
        let log = Rc::clone(log);
        SceneEntry::new(name, move |ctx| {
            log.borrow_mut().push(format!("build {}", name));
            Ok(Box::new(Stub {
                name: name.to_string(),
                log: Rc::clone(&log),
                on_update,
                world: SceneWorld::new(),
                _audio: Some(ctx.audio.open_context()?),
                _pointer: Some(ctx.input.subscribe_pointer_down()),
            }) as Box<dyn Scene>)
        })
    }

    fn manager(log: &Rc<RefCell<Vec<String>>>) -> SceneManager {
        SceneManager::new(SceneContext::headless(800, 600))
            .with_scene(entry("menu", Transition::Next, log))
            .with_scene(entry("game", Transition::Next, log))
            .with_scene(entry("over", Transition::Change(0), log))
    }

    #[test]
    fn test_next_scene_wraps_to_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scenes = manager(&log);

        scenes.next_scene().unwrap();
        assert_eq!(scenes.current_index(), Some(0));
        scenes.change_scene(2).unwrap();
        scenes.next_scene().unwrap();
        assert_eq!(scenes.current_index(), Some(0));
        assert_eq!(scenes.active_scene_name(), Some("menu"));
    }

    #[test]
    fn test_change_scene_out_of_bounds_is_an_error() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scenes = manager(&log);
        scenes.change_scene(1).unwrap();

        let result = scenes.change_scene(3);
        assert!(matches!(result, Err(SceneError::IndexOutOfBounds { index: 3, len: 3 })));
        // the active scene is untouched
        assert_eq!(scenes.current_index(), Some(1));
    }

    #[test]
    fn test_old_scene_closes_before_new_one_builds() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scenes = manager(&log);
        scenes.change_scene(0).unwrap();
        scenes.change_scene(1).unwrap();

        assert_eq!(*log.borrow(), vec!["build menu", "close menu", "build game"]);
        assert_eq!(scenes.context().resource_counts().audio_contexts, 1);
    }

    #[test]
    fn test_transition_skips_render_of_old_scene() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scenes = manager(&log);
        scenes.change_scene(0).unwrap();

        assert_eq!(scenes.tick(0.016).unwrap(), TickOutcome::Continue);
        scenes.context().input.press_key(KeyCode::Enter);
        assert_eq!(scenes.tick(0.016).unwrap(), TickOutcome::Continue);

        assert_eq!(
            *log.borrow(),
            vec!["build menu", "update menu", "render menu", "update menu", "close menu", "build game"]
        );
        assert_eq!(scenes.current_index(), Some(1));
    }

    #[test]
    fn test_pending_transition_blocks_world_access() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scenes = manager(&log);
        scenes.change_scene(0).unwrap();
        assert!(scenes.active_world_mut().is_ok());

        scenes.request_transition(Transition::Next).unwrap();
        assert!(matches!(scenes.active_world_mut(), Err(SceneError::TransitionInProgress)));
        assert!(matches!(
            scenes.request_transition(Transition::Change(2)),
            Err(SceneError::TransitionInProgress)
        ));

        // the queued transition is applied on the next tick
        scenes.tick(0.016).unwrap();
        assert_eq!(scenes.current_index(), Some(1));
        assert!(scenes.active_world_mut().is_ok());
    }

    #[test]
    fn test_queued_transition_replaces_scene_without_update() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scenes = manager(&log);
        scenes.change_scene(0).unwrap();
        scenes.request_transition(Transition::Next).unwrap();

        assert_eq!(scenes.tick(0.016).unwrap(), TickOutcome::Continue);
        assert_eq!(*log.borrow(), vec!["build menu", "close menu", "build game"]);
        assert_eq!(scenes.current_index(), Some(1));
    }

    #[test]
    fn test_change_scene_drops_queued_transition() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scenes = manager(&log);
        scenes.change_scene(0).unwrap();
        scenes.request_transition(Transition::Change(2)).unwrap();
        scenes.change_scene(1).unwrap();

        assert!(scenes.active_world_mut().is_ok());
        scenes.tick(0.016).unwrap();
        assert_eq!(scenes.current_index(), Some(1));
        assert_eq!(scenes.active_scene_name(), Some("game"));
    }

    #[test]
    fn test_tick_without_active_scene_fails() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scenes = manager(&log);
        assert!(matches!(scenes.tick(0.016), Err(SceneError::NoActiveScene)));
    }

    #[test]
    fn test_frame_is_bracketed_by_begin_and_end() {
        let renderer = RecordingRenderer::new();
        let draws = renderer.log();
        let context = SceneContext::new(WindowState::new(800, 600, "t"), AudioDevice::silent(), Box::new(renderer));
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scenes = SceneManager::new(context).with_scene(entry("menu", Transition::Quit, &log));
        scenes.change_scene(0).unwrap();

        scenes.tick(0.016).unwrap();
        let commands = draws.take();
        assert!(matches!(commands.first(), Some(DrawCommand::BeginFrame(_))));
        assert_eq!(commands.last(), Some(&DrawCommand::EndFrame));

        scenes.context().input.press_key(KeyCode::Enter);
        assert_eq!(scenes.tick(0.016).unwrap(), TickOutcome::Quit);
        assert!(draws.is_empty());
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scenes = manager(&log);
        scenes.change_scene(1).unwrap();
        scenes.shutdown();

        assert_eq!(scenes.current_index(), None);
        assert_eq!(scenes.context().resource_counts(), ResourceCounts::default());
    }

    struct Leaky;

    impl Scene for Leaky {
        fn name(&self) -> &str {
            "leaky"
        }

        fn update(&mut self, _ctx: &mut SceneContext, _dt: f32) -> Transition {
            Transition::Stay
        }
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "leaked resources"))]
    fn test_leak_on_close_is_fatal_in_debug() {
        let stash: Rc<RefCell<Vec<AudioContext>>> = Rc::new(RefCell::new(Vec::new()));
        let outside = Rc::clone(&stash);
        let mut scenes = SceneManager::new(SceneContext::headless(800, 600)).with_scene(SceneEntry::new(
            "leaky",
            move |ctx| {
                // the context escapes the scene, so closing the scene cannot release it
                outside.borrow_mut().push(ctx.audio.open_context()?);
                Ok(Box::new(Leaky) as Box<dyn Scene>)
            },
        ));
        scenes.change_scene(0).unwrap();
        scenes.shutdown();
        assert_eq!(stash.borrow().len(), 1);
    }
}
