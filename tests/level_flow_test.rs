use std::fs;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyModifiers};
use tempfile::TempDir;

use streamline::application::App;
use streamline::domain::Cell;
use streamline::infrastructure::{AnimationSettings, GameSettings, LevelRepository};
use streamline::presentation::InputHandler;

const CORRIDOR: &str = "1 3\n0 0\n0 2\n\n";
const SQUARE: &str = "2 2\n1 0\n0 1\n\n\n";

fn press(app: &mut App, key: KeyCode) {
    InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
}

fn run_animation(app: &mut App) {
    for _ in 0..100 {
        if !app.is_animating() || app.should_quit {
            return;
        }
        app.tick(Duration::from_millis(20));
    }
    panic!("animation did not finish");
}

fn level_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("01_corridor"), CORRIDOR).unwrap();
    fs::write(dir.path().join("02_square"), SQUARE).unwrap();
    dir
}

fn settings_saving_to(path: &Path) -> GameSettings {
    GameSettings {
        save_path: path.to_path_buf(),
        ..GameSettings::default()
    }
}

#[test]
fn test_play_through_level_directory() {
    let dir = level_dir();
    let levels = LevelRepository::load_levels(Some(dir.path()), &GameSettings::default(), None)
        .unwrap();
    let mut app = App::from_levels(levels, AnimationSettings::default()).unwrap();
    app.resize(300.0, 200.0);
    assert_eq!(app.level_count, 2);

    press(&mut app, KeyCode::Right);
    assert!(app.game.current_state.level_passed);
    assert_eq!(app.game.current_state.board.count(Cell::Trail), 2);
    assert!(app.is_animating());

    run_animation(&mut app);
    assert!(!app.should_quit);
    assert_eq!(app.level_number, 2);
    assert_eq!(app.game.current_state.player(), (1, 0));

    press(&mut app, KeyCode::Char('w'));
    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('d'));
    assert!(app.game.current_state.level_passed);

    run_animation(&mut app);
    assert!(app.should_quit);
}

#[test]
fn test_undo_then_save_and_reload() {
    let dir = level_dir();
    let save_path = dir.path().join("saves").join("game");
    let settings = settings_saving_to(&save_path);
    let level = dir.path().join("02_square");

    let levels = LevelRepository::load_levels(Some(&level), &settings, None).unwrap();
    let mut app = App::from_levels(levels, AnimationSettings::default()).unwrap();

    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Char('u'));
    press(&mut app, KeyCode::Up);
    assert_eq!(app.game.undo_depth(), 1);
    press(&mut app, KeyCode::Char('o'));
    assert!(app.status_message.as_deref().unwrap().starts_with("Saved to"));

    let reloaded = LevelRepository::load_levels(Some(&save_path), &settings, None).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].current_state, app.game.current_state);
    assert_eq!(reloaded[0].current_state.player(), (0, 0));
    assert_eq!(reloaded[0].undo_depth(), 0);
}

#[test]
fn test_quit_key_stops_the_game() {
    let dir = level_dir();
    let levels = LevelRepository::load_levels(Some(dir.path()), &GameSettings::default(), None)
        .unwrap();
    let mut app = App::from_levels(levels, AnimationSettings::default()).unwrap();

    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
    assert_eq!(app.level_number, 1);
}
