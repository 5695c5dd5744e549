//! Small mazes written to a temp directory for scene tests

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use maze_engine::foundation::math::Vec3;

use crate::config::GameConfig;

/// Ghost, pickups and lives for a test maze
pub struct Maze {
    pub ghost: Vec3,
    pub pickups: Vec<(&'static str, Vec3)>,
    pub starting_lives: i32,
}

impl Default for Maze {
    fn default() -> Self {
        Self {
            ghost: Vec3::new(-10.0, 0.0, -10.0),
            pickups: Vec::new(),
            starting_lives: 3,
        }
    }
}

fn entity(name: &str, components: &[String]) -> String {
    format!("(name: \"{}\", components: [{}])", name, components.join(", "))
}

fn position(p: Vec3) -> String {
    format!("(kind: \"position\", position: Some(({:.2}, {:.2}, {:.2})))", p.x, p.y, p.z)
}

impl Maze {
    /// Write the maze under a directory unique to `tag` and return a config pointing at it
    pub fn write(&self, tag: &str) -> Rc<GameConfig> {
        let root = std::env::temp_dir().join(format!("pacman_{}_{}", tag, std::process::id()));
        let entities = root.join("entities");
        fs::create_dir_all(&entities).unwrap();

        let wall = entity(
            "wall_1",
            &[
                position(Vec3::new(5.0, 1.0, 5.0)),
                "(kind: \"collider\", shape: Some(Box(half_extents: (0.5, 1.5, 0.5))))".to_string(),
                "(kind: \"renderable\", mesh: Some(\"geometry/wall.obj\"))".to_string(),
            ],
        );
        let ghost = entity(
            "ghost_1",
            &[
                position(self.ghost),
                "(kind: \"ai\", speed: Some(2.0))".to_string(),
                "(kind: \"collider\", shape: Some(Box(half_extents: (0.4, 1.5, 0.4))), rigid: Some(false))".to_string(),
                "(kind: \"renderable\", mesh: Some(\"geometry/ghost.obj\"))".to_string(),
            ],
        );
        let mut pickups = String::new();
        for (name, at) in &self.pickups {
            let record = entity(
                name,
                &[
                    position(*at),
                    "(kind: \"collider\", shape: Some(Sphere(radius: 0.3)), rigid: Some(false))".to_string(),
                    "(kind: \"animation\", spin_speed: Some(2.0))".to_string(),
                ],
            );
            write!(pickups, "{},", record).unwrap();
        }

        fs::write(entities.join("static.ron"), format!("(entities: [{}])", wall)).unwrap();
        fs::write(entities.join("dynamic.ron"), format!("(entities: [{}])", ghost)).unwrap();
        fs::write(entities.join("collectable.ron"), format!("(entities: [{}])", pickups)).unwrap();

        let mut config = GameConfig::default();
        config.entities.asset_root = PathBuf::from(&root);
        config.gameplay.starting_lives = self.starting_lives;
        Rc::new(config)
    }
}
