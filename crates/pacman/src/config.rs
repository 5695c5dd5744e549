//! Game configuration
//!
//! Every tunable the scenes read. Loaded from `pacman.toml` when present;
//! any section or field missing from the file keeps its default.

use std::path::PathBuf;

use maze_engine::config::Config;
use maze_engine::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Window settings
    pub window: WindowSettings,

    /// Gameplay settings
    pub gameplay: GameplaySettings,

    /// Entity naming markers
    pub markers: NamingMarkers,

    /// Entity descriptor files
    pub entities: EntityFiles,

    /// Sound effects
    pub sounds: SoundSettings,

    /// Headless demo run
    pub demo: DemoSettings,
}

impl Config for GameConfig {}

impl GameConfig {
    /// Resolve a path relative to the asset root
    pub fn asset(&self, relative: &str) -> PathBuf {
        self.entities.asset_root.join(relative)
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,

    /// Title shown before the first scene sets its own
    pub title: String,

    /// Frames per second the loop paces to
    pub target_fps: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Pacman 3D".to_string(),
            target_fps: 60,
        }
    }
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Lives at the start of a game
    pub starting_lives: i32,

    /// Seconds a power-up lasts
    pub power_up_duration: f32,

    /// Radius of the player's bounding sphere
    pub player_radius: f32,

    /// Walking speed in units per second
    pub move_speed: f32,

    /// Turning speed in radians per second
    pub turn_speed: f32,

    /// Where the player starts and respawns
    pub player_start: Vec3,

    /// Where ghosts start, respawn, and retreat to while the player is powered up
    pub ghost_start: Vec3,

    /// Navigation grid width in cells
    pub ai_grid_width: usize,

    /// Navigation grid depth in cells
    pub ai_grid_depth: usize,

    /// Score for a coin
    pub coin_score: u32,

    /// Score for a power-up
    pub power_up_score: u32,

    /// Score for eating a ghost
    pub ghost_score: u32,

    /// Multiplier applied to the score on the HUD
    pub hud_score_multiplier: u32,

    /// Point lights for the maze
    pub lights: Vec<Vec3>,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            power_up_duration: 10.0,
            player_radius: 0.3,
            move_speed: 6.0,
            turn_speed: 4.0,
            player_start: Vec3::new(12.0, 1.3, 20.0),
            ghost_start: Vec3::new(0.0, 0.0, -1.0),
            ai_grid_width: 50,
            ai_grid_depth: 50,
            coin_score: 1,
            power_up_score: 5,
            ghost_score: 10,
            hud_score_multiplier: 10,
            lights: vec![
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(17.0, 1.0, 15.0),
                Vec3::new(17.0, 1.0, -15.0),
                Vec3::new(-17.0, 1.0, 15.0),
                Vec3::new(-17.0, 1.0, -15.0),
            ],
        }
    }
}

/// Substrings that classify entities by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingMarkers {
    /// Ghost entities
    pub ghost: String,

    /// Coin pickups
    pub coin: String,

    /// Power-up pickups
    pub power_up: String,
}

impl Default for NamingMarkers {
    fn default() -> Self {
        Self {
            ghost: "ghost".to_string(),
            coin: "coin".to_string(),
            power_up: "power".to_string(),
        }
    }
}

impl NamingMarkers {
    /// Whether `name` is a coin or power-up
    pub fn is_pickable(&self, name: &str) -> bool {
        name.contains(&self.coin) || name.contains(&self.power_up)
    }
}

/// Entity descriptor files, relative to the asset root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityFiles {
    /// Directory every asset path is relative to
    pub asset_root: PathBuf,

    /// Walls and floor
    pub static_entities: String,

    /// Ghosts
    pub dynamic_entities: String,

    /// Coins and power-ups
    pub collectable_entities: String,
}

impl Default for EntityFiles {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"),
            static_entities: "entities/static.ron".to_string(),
            dynamic_entities: "entities/dynamic.ron".to_string(),
            collectable_entities: "entities/collectable.ron".to_string(),
        }
    }
}

/// One sound effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundEffect {
    /// Path relative to the asset root
    pub path: String,

    /// Playback volume
    pub volume: f32,
}

impl SoundEffect {
    fn new(path: &str, volume: f32) -> Self {
        Self {
            path: path.to_string(),
            volume,
        }
    }
}

/// Sound effects used by the scenes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    /// Menu click
    pub menu_select: SoundEffect,

    /// Coin collected
    pub coin: SoundEffect,

    /// Player caught by a ghost
    pub player_hit: SoundEffect,

    /// Power-up collected
    pub power_up: SoundEffect,

    /// Ghost eaten while powered up
    pub ghost_eaten: SoundEffect,

    /// Loops while a power-up is active
    pub power_up_alarm: SoundEffect,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            menu_select: SoundEffect::new("audio/sfx_menu_select4.wav", 1.0),
            coin: SoundEffect::new("audio/sfx_coin_single5.wav", 0.2),
            player_hit: SoundEffect::new("audio/sfx_wpn_laser.wav", 1.0),
            power_up: SoundEffect::new("audio/sfx_sounds_powerup9.wav", 0.4),
            ghost_eaten: SoundEffect::new("audio/sfx_sounds_powerup4.wav", 1.0),
            power_up_alarm: SoundEffect::new("audio/sfx_alarm_loop6.wav", 0.4),
        }
    }
}

/// Headless demo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Stop after this many frames
    pub frame_limit: Option<u64>,

    /// Click through the main menu on the first frame
    pub auto_start: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            frame_limit: Some(600),
            auto_start: true,
        }
    }
}
