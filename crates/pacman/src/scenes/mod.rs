//! Game scenes and the catalog that orders them

mod end_screen;
mod game_scene;
mod main_menu;
#[cfg(test)]
mod test_support;

use std::rc::Rc;

use maze_engine::scene::{Scene, SceneEntry};

use crate::config::GameConfig;

pub use end_screen::EndScreen;
pub use game_scene::GameScene;
pub use main_menu::MainMenu;

/// Catalog index of the main menu
pub const MAIN_MENU: usize = 0;
/// Catalog index of the maze
pub const GAME: usize = 1;
/// Catalog index of the game-over screen; follows the maze
pub const GAME_OVER: usize = 2;
/// Catalog index of the win screen
pub const GAME_WIN: usize = 3;

/// Pacman image used by the menus and the HUD
pub(crate) const PACMAN_IMAGE: &str = "textures/pacman.png";

/// Every scene, in catalog order
pub fn catalog(config: &Rc<GameConfig>) -> Vec<SceneEntry> {
    let menu_config = Rc::clone(config);
    let game_config = Rc::clone(config);
    vec![
        SceneEntry::new("MainMenu", move |ctx| {
            Ok(Box::new(MainMenu::new(ctx, &menu_config)?) as Box<dyn Scene>)
        }),
        SceneEntry::new("GameScene", move |ctx| {
            Ok(Box::new(GameScene::new(ctx, Rc::clone(&game_config))?) as Box<dyn Scene>)
        }),
        SceneEntry::new("GameOver", |ctx| Ok(Box::new(EndScreen::game_over(ctx)) as Box<dyn Scene>)),
        SceneEntry::new("GameWin", |ctx| Ok(Box::new(EndScreen::game_win(ctx)) as Box<dyn Scene>)),
    ]
}
