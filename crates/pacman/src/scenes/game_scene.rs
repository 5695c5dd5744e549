//! The maze
//!
//! Per update, in order: win check, power-up timer, system delta times,
//! ghost targets, trigger handling, then player input. Anything that ends
//! the scene returns immediately so nothing further touches its world.

use std::rc::Rc;

use log::{debug, info, warn};
use maze_engine::audio::{AudioContext, Emitter};
use maze_engine::ecs::components::{ColliderComponent, PositionComponent};
use maze_engine::ecs::systems::{
    assign_targets, AiSystem, AnimationSystem, AudioSystem, CollisionSystem, RenderingSystem, SkyBoxSystem,
};
use maze_engine::ecs::{ComponentMask, EntityRegistry, LoadReport, System};
use maze_engine::foundation::math::{Vec2, Vec3};
use maze_engine::input::KeyCode;
use maze_engine::render::{Camera, Rect, TextAlign};
use maze_engine::scene::{Scene, SceneContext, SceneError, SceneWorld, Transition};

use super::{GAME_WIN, MAIN_MENU, PACMAN_IMAGE};
use crate::config::{GameConfig, SoundEffect};

/// A sound effect that may have failed to load
struct Sfx {
    emitter: Option<Emitter>,
    volume: f32,
}

impl Sfx {
    fn load(audio: &AudioContext, config: &GameConfig, effect: &SoundEffect) -> Self {
        let emitter = audio
            .load(config.asset(&effect.path))
            .map_err(|e| warn!("Sound effect unavailable: {}", e))
            .ok();
        Self {
            emitter,
            volume: effect.volume,
        }
    }

    fn play_at(&self, position: Vec3) {
        if let Some(emitter) = &self.emitter {
            emitter.set_position(position);
            emitter.set_volume(self.volume);
            emitter.play();
        }
    }

    fn follow(&self, position: Vec3) {
        if let Some(emitter) = &self.emitter {
            emitter.set_position(position);
        }
    }

    fn start_loop(&self) {
        if let Some(emitter) = &self.emitter {
            emitter.set_volume(self.volume);
            emitter.set_looping(true);
            emitter.play();
        }
    }

    fn stop(&self) {
        if let Some(emitter) = &self.emitter {
            emitter.stop();
        }
    }
}

struct SoundEffects {
    coin: Sfx,
    player_hit: Sfx,
    power_up: Sfx,
    ghost_eaten: Sfx,
    power_up_alarm: Sfx,
}

/// Gameplay scene
pub struct GameScene {
    config: Rc<GameConfig>,
    world: SceneWorld,
    sounds: SoundEffects,
    _audio: AudioContext,
    ghost_count: usize,
    total_coins: usize,
    coins_collected: usize,
    lives: i32,
    score: u32,
    power_up_timer: f32,
    alarm_playing: bool,
    frozen_ghosts: bool,
    disabled_colliders: Vec<String>,
}

/// Load one descriptor file, logging whatever it skipped
fn load_entities(registry: &mut EntityRegistry, config: &GameConfig, file: &str) -> Result<LoadReport, SceneError> {
    let report = registry.load_file(config.asset(file))?;
    for skipped in &report.skipped {
        warn!("{}: skipped entity: {}", file, skipped);
    }
    Ok(report)
}

impl GameScene {
    /// Build the maze: entities, systems and sounds
    pub fn new(ctx: &mut SceneContext, config: Rc<GameConfig>) -> Result<Self, SceneError> {
        ctx.window.title = "Game".to_string();
        ctx.window.show_cursor = false;
        ctx.window.mouse_camera = true;

        let gameplay = &config.gameplay;
        ctx.camera = Camera::new(gameplay.player_start);
        ctx.camera.tilt(-0.1);

        let mut world = SceneWorld::new();
        load_entities(&mut world.registry, &config, &config.entities.static_entities)?;
        load_entities(&mut world.registry, &config, &config.entities.dynamic_entities)?;
        load_entities(&mut world.registry, &config, &config.entities.collectable_entities)?;

        let markers = &config.markers;
        let systems = &mut world.systems;
        systems.register(Box::new(SkyBoxSystem::new()));
        systems.register(Box::new(RenderingSystem::new(gameplay.lights.clone())));
        systems.register(Box::new(
            CollisionSystem::new(gameplay.player_radius, gameplay.player_start)
                .with_pickable_markers([markers.coin.clone(), markers.power_up.clone()]),
        ));
        systems.register(Box::new(AiSystem::new(
            gameplay.ai_grid_width,
            gameplay.ai_grid_depth,
            &world.registry,
        )));
        systems.register(Box::new(AudioSystem::new()));
        systems.register(Box::new(AnimationSystem::new()));

        let audio = ctx.audio.open_context()?;
        let sounds = SoundEffects {
            coin: Sfx::load(&audio, &config, &config.sounds.coin),
            player_hit: Sfx::load(&audio, &config, &config.sounds.player_hit),
            power_up: Sfx::load(&audio, &config, &config.sounds.power_up),
            ghost_eaten: Sfx::load(&audio, &config, &config.sounds.ghost_eaten),
            power_up_alarm: Sfx::load(&audio, &config, &config.sounds.power_up_alarm),
        };

        let ghost_count = world.registry.find_by_mask(ComponentMask::AI).len();
        let total_coins = world
            .registry
            .iter()
            .filter(|e| markers.is_pickable(e.name()))
            .count();
        info!(
            "Maze loaded: {} entities, {} ghosts, {} pickups",
            world.registry.len(),
            ghost_count,
            total_coins
        );

        let lives = gameplay.starting_lives;
        Ok(Self {
            config,
            world,
            sounds,
            _audio: audio,
            ghost_count,
            total_coins,
            coins_collected: 0,
            lives,
            score: 0,
            power_up_timer: 0.0,
            alarm_playing: false,
            frozen_ghosts: false,
            disabled_colliders: Vec::new(),
        })
    }

    /// Remaining lives
    pub fn lives(&self) -> i32 {
        self.lives
    }

    /// Current score, before the HUD multiplier
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Pickups collected so far
    pub fn coins_collected(&self) -> usize {
        self.coins_collected
    }

    /// Pickups needed to win
    pub fn total_coins(&self) -> usize {
        self.total_coins
    }

    /// Ghosts in the maze
    pub fn ghost_count(&self) -> usize {
        self.ghost_count
    }

    /// Whether a power-up is active
    pub fn is_empowered(&self) -> bool {
        self.power_up_timer > 0.0
    }

    fn collision(&mut self) -> Option<&mut CollisionSystem> {
        self.world.systems.find_as::<CollisionSystem>(CollisionSystem::NAME)
    }

    fn set_position(&mut self, name: &str, position: Vec3) {
        if let Some(pos) = self
            .world
            .registry
            .find_by_name_mut(name)
            .and_then(|e| e.get_mut::<PositionComponent>())
        {
            pos.position = position;
        }
    }

    fn tick_power_up(&mut self, ctx: &SceneContext, dt: f32) {
        if self.power_up_timer <= 0.0 {
            return;
        }
        self.power_up_timer -= dt;
        self.sounds.power_up_alarm.follow(ctx.camera.position);
        if !self.alarm_playing {
            self.sounds.power_up_alarm.start_loop();
            self.alarm_playing = true;
        }
        if self.power_up_timer <= 0.0 {
            debug!("Power-up expired");
            self.power_up_timer = 0.0;
            self.alarm_playing = false;
            self.sounds.power_up_alarm.stop();
        }
    }

    fn set_system_delta_times(&mut self, dt: f32) {
        let ai_dt = if self.frozen_ghosts { 0.0 } else { dt };
        if let Some(ai) = self.world.systems.find_as::<AiSystem>(AiSystem::NAME) {
            ai.set_delta_time(ai_dt);
        }
        if let Some(animation) = self.world.systems.find_as::<AnimationSystem>(AnimationSystem::NAME) {
            animation.set_delta_time(dt);
        }
    }

    /// Act on the trigger the collision system recorded last frame
    fn handle_trigger(&mut self, ctx: &mut SceneContext) -> Transition {
        let Some(trigger) = self.collision().and_then(|c| c.last_trigger().map(str::to_string)) else {
            return Transition::Stay;
        };
        let config = Rc::clone(&self.config);
        let markers = &config.markers;
        let gameplay = &config.gameplay;

        if trigger.contains(&markers.ghost) {
            if self.is_empowered() {
                self.sounds.ghost_eaten.play_at(ctx.camera.position);
                self.set_position(&trigger, gameplay.ghost_start);
                self.score += gameplay.ghost_score;
                info!("Ate {}", trigger);
            } else {
                self.lives -= 1;
                info!("Caught by {}; {} lives left", trigger, self.lives);
                let player_start = gameplay.player_start;
                let ghost_start = gameplay.ghost_start;
                ctx.camera.position = player_start;
                self.sounds.player_hit.play_at(player_start);
                for ghost in self.world.registry.iter_mask_mut(ComponentMask::AI | ComponentMask::POSITION) {
                    if let Some(pos) = ghost.get_mut::<PositionComponent>() {
                        pos.position = ghost_start;
                    }
                }
                if let Some(collision) = self.collision() {
                    collision.update_last_position(player_start);
                    collision.clear_last_trigger();
                }
                if self.lives <= 0 {
                    return Transition::Next;
                }
            }
            if let Some(collision) = self.collision() {
                collision.clear_last_trigger();
            }
        } else if trigger.contains(&markers.coin) || trigger.contains(&markers.power_up) {
            if trigger.contains(&markers.coin) {
                self.sounds.coin.play_at(ctx.camera.position);
                self.score += gameplay.coin_score;
            } else {
                self.power_up_timer = gameplay.power_up_duration;
                self.sounds.power_up.play_at(ctx.camera.position);
                self.score += gameplay.power_up_score;
                info!("Powered up for {}s", gameplay.power_up_duration);
            }
            self.coins_collected += 1;
            self.world.registry.remove(&trigger);
            if let Some(collision) = self.collision() {
                collision.clear_last_trigger();
                collision.clear_last_pickable();
            }
        } else {
            debug!("Ignoring trigger {}", trigger);
            if let Some(collision) = self.collision() {
                collision.clear_last_trigger();
            }
        }
        Transition::Stay
    }

    fn handle_movement(&mut self, ctx: &mut SceneContext, dt: f32) -> Transition {
        let input = &ctx.input;
        if input.was_key_pressed(KeyCode::Escape) {
            return Transition::Change(MAIN_MENU);
        }

        let gameplay = &self.config.gameplay;
        let step = gameplay.move_speed * dt;
        let turn = gameplay.turn_speed * dt;
        if input.is_key_down(KeyCode::Up) || input.is_key_down(KeyCode::W) {
            ctx.camera.move_forward(step);
        }
        if input.is_key_down(KeyCode::Down) || input.is_key_down(KeyCode::S) {
            ctx.camera.move_forward(-step);
        }
        if input.is_key_down(KeyCode::Left) || input.is_key_down(KeyCode::A) {
            ctx.camera.turn(-turn);
        }
        if input.is_key_down(KeyCode::Right) || input.is_key_down(KeyCode::D) {
            ctx.camera.turn(turn);
        }

        if input.was_key_pressed(KeyCode::G) {
            self.frozen_ghosts = !self.frozen_ghosts;
            info!("Ghosts {}", if self.frozen_ghosts { "frozen" } else { "released" });
        }
        if input.was_key_pressed(KeyCode::C) {
            self.toggle_rigid_colliders();
        }
        Transition::Stay
    }

    /// Disable every enabled rigid collider, or re-enable the ones disabled last time
    fn toggle_rigid_colliders(&mut self) {
        let registry = &mut self.world.registry;
        if self.disabled_colliders.is_empty() {
            for entity in registry.iter_mask_mut(ComponentMask::COLLIDER) {
                let name = entity.name().to_string();
                if let Some(collider) = entity.get_mut::<ColliderComponent>() {
                    if collider.rigid && collider.enabled {
                        collider.enabled = false;
                        self.disabled_colliders.push(name);
                    }
                }
            }
            info!("Disabled {} rigid colliders", self.disabled_colliders.len());
        } else {
            for name in self.disabled_colliders.drain(..) {
                if let Some(collider) = registry
                    .find_by_name_mut(&name)
                    .and_then(|e| e.get_mut::<ColliderComponent>())
                {
                    collider.enabled = true;
                }
            }
            info!("Re-enabled rigid colliders");
        }
    }
}

impl Scene for GameScene {
    fn name(&self) -> &str {
        "GameScene"
    }

    fn update(&mut self, ctx: &mut SceneContext, dt: f32) -> Transition {
        if self.coins_collected >= self.total_coins {
            info!("All {} pickups collected", self.total_coins);
            return Transition::Change(GAME_WIN);
        }

        self.tick_power_up(ctx, dt);
        self.set_system_delta_times(dt);

        let gameplay = &self.config.gameplay;
        assign_targets(
            &mut self.world.registry,
            ctx.camera.position,
            self.power_up_timer > 0.0,
            gameplay.ghost_start,
        );

        match self.handle_trigger(ctx) {
            Transition::Stay => self.handle_movement(ctx, dt),
            transition => transition,
        }
    }

    fn render(&mut self, ctx: &mut SceneContext, _dt: f32) {
        let width = ctx.window.width as f32;
        let height = ctx.window.height as f32;
        let font_size = width.min(height) / 30.0;
        let renderer = ctx.renderer.as_mut();

        renderer.draw_label(
            Rect::new(-width / 2.0 + 128.0, font_size / 2.0, width, font_size * 2.0),
            &format!("Score: {}", self.score * self.config.gameplay.hud_score_multiplier),
            font_size,
            TextAlign::Center,
        );
        for i in 0..self.lives.max(0) {
            let offset = 96.0 * i as f32;
            renderer.draw_image(Vec2::new(width * 0.03 + offset, height * 0.85), PACMAN_IMAGE, false, 1.0);
        }
    }

    fn world_mut(&mut self) -> Option<&mut SceneWorld> {
        Some(&mut self.world)
    }

    fn close(&mut self, _ctx: &mut SceneContext) {
        self.sounds.power_up_alarm.stop();
        info!(
            "Leaving maze with score {} ({} of {} pickups)",
            self.score, self.coins_collected, self.total_coins
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::test_support::Maze;
    use maze_engine::ecs::components::AiComponent;
    use maze_engine::scene::ResourceCounts;

    const DT: f32 = 0.016;

    fn start() -> Vec3 {
        Vec3::new(12.0, 1.3, 20.0)
    }

    /// One frame the way the scene manager runs it
    fn frame(scene: &mut GameScene, ctx: &mut SceneContext) -> Transition {
        let transition = scene.update(ctx, DT);
        if transition == Transition::Stay {
            scene.render(ctx, DT);
            if let Some(world) = scene.world_mut() {
                world.systems.run_frame(&mut world.registry, ctx);
            }
        }
        transition
    }

    fn ghost_position(scene: &GameScene) -> Vec3 {
        scene
            .world
            .registry
            .find_by_name("ghost_1")
            .and_then(|e| e.get::<PositionComponent>())
            .map(|p| p.position)
            .unwrap()
    }

    fn ghost_target(scene: &GameScene) -> Vec3 {
        scene
            .world
            .registry
            .find_by_name("ghost_1")
            .and_then(|e| e.get::<AiComponent>())
            .map(|ai| ai.target)
            .unwrap()
    }

    #[test]
    fn test_setup_counts_ghosts_and_pickups() {
        let config = Maze {
            pickups: vec![("coin_1", Vec3::new(0.0, 1.0, 0.0)), ("power_1", Vec3::new(1.0, 1.0, 0.0))],
            ..Default::default()
        }
        .write("setup");
        let mut ctx = SceneContext::headless(800, 600);
        let mut scene = GameScene::new(&mut ctx, config).unwrap();

        assert_eq!(scene.ghost_count(), 1);
        assert_eq!(scene.total_coins(), 2);
        assert_eq!(scene.lives(), 3);
        assert_eq!(ctx.camera.position, start());
        assert_eq!(
            scene.world_mut().unwrap().systems.names(),
            vec!["skybox", "rendering", "collision", "ai", "audio", "animation"]
        );
    }

    #[test]
    fn test_shipped_maze_loads_every_record() {
        let config = Rc::new(GameConfig::default());
        let mut registry = EntityRegistry::new();
        for file in [
            &config.entities.static_entities,
            &config.entities.dynamic_entities,
            &config.entities.collectable_entities,
        ] {
            assert!(load_entities(&mut registry, &config, file).unwrap().is_clean());
        }

        let mut ctx = SceneContext::headless(800, 600);
        let mut scene = GameScene::new(&mut ctx, config).unwrap();
        assert_eq!(scene.ghost_count(), 4);
        assert_eq!(scene.total_coins(), 92);
        assert_eq!(scene.world_mut().unwrap().registry.len(), 109);
    }

    #[test]
    fn test_coin_pickup_scores_once() {
        let config = Maze {
            pickups: vec![("coin_1", Vec3::new(12.0, 1.0, 20.0)), ("coin_2", Vec3::new(0.0, 1.0, 0.0))],
            ..Default::default()
        }
        .write("coin");
        let mut ctx = SceneContext::headless(800, 600);
        let mut scene = GameScene::new(&mut ctx, config).unwrap();

        frame(&mut scene, &mut ctx);
        frame(&mut scene, &mut ctx);
        frame(&mut scene, &mut ctx);

        assert_eq!(scene.coins_collected(), 1);
        assert_eq!(scene.score(), 1);
        assert!(scene.world.registry.find_by_name("coin_1").is_none());
        let collision = scene.collision().unwrap();
        assert_eq!(collision.last_trigger(), None);
        assert_eq!(collision.last_pickable(), None);
    }

    #[test]
    fn test_power_up_sends_ghosts_home_until_it_expires() {
        let config = Maze {
            pickups: vec![("power_1", Vec3::new(12.0, 1.0, 20.0)), ("coin_1", Vec3::new(0.0, 1.0, 0.0))],
            ..Default::default()
        }
        .write("power");
        let ghost_start = config.gameplay.ghost_start;
        let mut ctx = SceneContext::headless(800, 600);
        let mut scene = GameScene::new(&mut ctx, config).unwrap();

        frame(&mut scene, &mut ctx);
        frame(&mut scene, &mut ctx);
        assert!(scene.is_empowered());
        assert_eq!(scene.score(), 5);

        frame(&mut scene, &mut ctx);
        assert_eq!(ghost_target(&scene), ghost_start);

        scene.update(&mut ctx, 10.0);
        assert!(!scene.is_empowered());
        scene.update(&mut ctx, DT);
        assert_eq!(ghost_target(&scene), Vec3::new(12.0, 1.3, 20.0));
    }

    #[test]
    fn test_empowered_player_eats_ghost() {
        let config = Maze {
            ghost: Vec3::new(12.0, 0.0, 20.0),
            pickups: vec![("coin_1", Vec3::new(0.0, 1.0, 0.0))],
            ..Default::default()
        }
        .write("eat");
        let ghost_start = config.gameplay.ghost_start;
        let mut ctx = SceneContext::headless(800, 600);
        let mut scene = GameScene::new(&mut ctx, config).unwrap();
        scene.power_up_timer = 5.0;

        frame(&mut scene, &mut ctx);
        frame(&mut scene, &mut ctx);

        assert_eq!(scene.score(), 10);
        assert_eq!(scene.lives(), 3);
        assert_eq!(ghost_position(&scene), ghost_start);
    }

    #[test]
    fn test_ghost_takes_a_life_and_resets_positions() {
        let config = Maze {
            ghost: Vec3::new(12.0, 0.0, 20.0),
            pickups: vec![("coin_1", Vec3::new(0.0, 1.0, 0.0))],
            ..Default::default()
        }
        .write("caught");
        let ghost_start = config.gameplay.ghost_start;
        let mut ctx = SceneContext::headless(800, 600);
        let mut scene = GameScene::new(&mut ctx, config).unwrap();

        frame(&mut scene, &mut ctx);
        ctx.camera.position = Vec3::new(12.0, 1.3, 19.9);
        assert_eq!(scene.update(&mut ctx, DT), Transition::Stay);

        assert_eq!(scene.lives(), 2);
        assert_eq!(ctx.camera.position, start());
        assert_eq!(ghost_position(&scene), ghost_start);
        assert_eq!(scene.collision().unwrap().last_position(), start());
    }

    #[test]
    fn test_last_life_ends_the_game() {
        let config = Maze {
            ghost: Vec3::new(12.0, 0.0, 20.0),
            pickups: vec![("coin_1", Vec3::new(0.0, 1.0, 0.0))],
            starting_lives: 1,
        }
        .write("last_life");
        let mut ctx = SceneContext::headless(800, 600);
        let mut scene = GameScene::new(&mut ctx, config).unwrap();

        assert_eq!(frame(&mut scene, &mut ctx), Transition::Stay);
        assert_eq!(frame(&mut scene, &mut ctx), Transition::Next);
        assert_eq!(scene.lives(), 0);
    }

    #[test]
    fn test_ghost_freeze_toggles_on_key_press() {
        let config = Maze {
            pickups: vec![("coin_1", Vec3::new(0.0, 1.0, 0.0))],
            ..Default::default()
        }
        .write("freeze");
        let mut ctx = SceneContext::headless(800, 600);
        let mut scene = GameScene::new(&mut ctx, config).unwrap();

        ctx.input.press_key(KeyCode::G);
        frame(&mut scene, &mut ctx);
        ctx.input.end_frame();
        let before = ghost_position(&scene);

        // held key does not toggle back
        frame(&mut scene, &mut ctx);
        frame(&mut scene, &mut ctx);
        assert_eq!(ghost_position(&scene), before);

        ctx.input.release_key(KeyCode::G);
        ctx.input.press_key(KeyCode::G);
        frame(&mut scene, &mut ctx);
        ctx.input.end_frame();
        frame(&mut scene, &mut ctx);
        assert_ne!(ghost_position(&scene), before);
    }

    #[test]
    fn test_collision_toggle_disables_and_restores_walls() {
        let config = Maze {
            pickups: vec![("coin_1", Vec3::new(0.0, 1.0, 0.0))],
            ..Default::default()
        }
        .write("walls");
        let mut ctx = SceneContext::headless(800, 600);
        let mut scene = GameScene::new(&mut ctx, config).unwrap();
        let wall_enabled = |scene: &GameScene| {
            scene
                .world
                .registry
                .find_by_name("wall_1")
                .and_then(|e| e.get::<ColliderComponent>())
                .map(|c| c.enabled)
                .unwrap()
        };

        ctx.input.press_key(KeyCode::C);
        scene.update(&mut ctx, DT);
        assert!(!wall_enabled(&scene));
        // triggers stay live
        let ghost = scene.world.registry.find_by_name("ghost_1").unwrap();
        assert!(ghost.get::<ColliderComponent>().unwrap().enabled);

        ctx.input.end_frame();
        ctx.input.release_key(KeyCode::C);
        ctx.input.press_key(KeyCode::C);
        scene.update(&mut ctx, DT);
        assert!(wall_enabled(&scene));
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let config = Maze {
            pickups: vec![("coin_1", Vec3::new(0.0, 1.0, 0.0))],
            ..Default::default()
        }
        .write("escape");
        let mut ctx = SceneContext::headless(800, 600);
        let mut scene = GameScene::new(&mut ctx, config).unwrap();
        ctx.input.press_key(KeyCode::Escape);
        assert_eq!(scene.update(&mut ctx, DT), Transition::Change(MAIN_MENU));
    }

    #[test]
    fn test_walking_forward_moves_toward_the_maze() {
        let config = Maze {
            pickups: vec![("coin_1", Vec3::new(0.0, 1.0, 0.0))],
            ..Default::default()
        }
        .write("walk");
        let mut ctx = SceneContext::headless(800, 600);
        let mut scene = GameScene::new(&mut ctx, config).unwrap();
        ctx.input.press_key(KeyCode::W);
        scene.update(&mut ctx, 0.5);
        assert!((ctx.camera.position.z - 17.0).abs() < 1e-4);
    }

    #[test]
    fn test_dropping_scene_releases_audio() {
        let config = Maze {
            pickups: vec![("coin_1", Vec3::new(0.0, 1.0, 0.0))],
            ..Default::default()
        }
        .write("release");
        let mut ctx = SceneContext::headless(800, 600);
        let mut scene = GameScene::new(&mut ctx, config).unwrap();
        frame(&mut scene, &mut ctx);
        assert_eq!(ctx.audio.live_contexts(), 1);
        assert_eq!(ctx.audio.live_emitters(), 5);

        scene.close(&mut ctx);
        drop(scene);
        assert_eq!(ctx.resource_counts(), ResourceCounts::default());
    }
}
