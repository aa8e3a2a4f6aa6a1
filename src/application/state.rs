//! Application state for the terminal game.
//!
//! [`App`] owns the level being played, the levels still to come, and the
//! scene that mirrors the board on screen. Every key press arrives here as
//! a [`GameAction`]; the scene is then brought up to date from the new game
//! state.

use crate::application::{AnimatedGoal, AnimationPhase, Scene, WinAnimation};
use crate::domain::{Direction, Streamline};
use crate::infrastructure::AnimationSettings;
use std::collections::VecDeque;
use std::time::Duration;

pub const HELP_TEXT: &str = "Possible commands:
 w / Up    - up
 a / Left  - left
 s / Down  - down
 d / Right - right
 u         - undo
 o         - save
 q / Esc   - quit";

/// What the player asked for with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Move(Direction),
    Undo,
    Save,
    Quit,
    /// Unrecognized input; shows the key reference.
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Playing,
    /// Key reference popup is open
    Help,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use streamline::application::{App, GameAction};
/// use streamline::domain::{Direction, GameState, Streamline};
/// use streamline::infrastructure::AnimationSettings;
///
/// let game = Streamline::new(GameState::new(1, 3, (0, 0), (0, 2)));
/// let mut app = App::new(game, Vec::new(), AnimationSettings::default());
/// app.apply(GameAction::Move(Direction::Right));
/// assert!(app.is_animating());
/// ```
#[derive(Debug)]
pub struct App {
    /// The level being played
    pub game: Streamline,
    /// Levels still to play, in order
    pub next_games: VecDeque<Streamline>,
    pub scene: Scene,
    pub mode: AppMode,
    /// Running win animation, if the level was just passed
    pub animation: Option<WinAnimation>,
    pub animation_settings: AnimationSettings,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// 1-based number of the current level
    pub level_number: usize,
    pub level_count: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        game: Streamline,
        next_games: Vec<Streamline>,
        animation_settings: AnimationSettings,
    ) -> Self {
        let level_count = next_games.len() + 1;
        let mut app = Self {
            game,
            next_games: next_games.into(),
            scene: Scene::default(),
            mode: AppMode::Playing,
            animation: None,
            animation_settings,
            status_message: None,
            level_number: 1,
            level_count,
            should_quit: false,
        };
        app.on_level_loaded();
        app.finish_if_already_passed();
        app
    }

    /// Builds the app from an ordered level list. Returns `None` if the
    /// list is empty.
    pub fn from_levels(levels: Vec<Streamline>, animation_settings: AnimationSettings) -> Option<Self> {
        let mut levels = levels.into_iter();
        let first = levels.next()?;
        Some(Self::new(first, levels.collect(), animation_settings))
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Matches the scene to the drawing area, laying everything out again
    /// when the size changed.
    pub fn resize(&mut self, width: f64, height: f64) {
        if self.scene.resize(width, height) {
            tracing::debug!(width, height, "scene resized");
            self.on_level_loaded();
            if let Some(clone) = self.scene.animated_goal.as_mut() {
                let rescaled = AnimatedGoal::covering(self.scene.goal, width, height);
                *clone = AnimatedGoal { opacity: clone.opacity, ..rescaled };
            }
            self.sync_animated_goal();
        }
    }

    /// Redoes the whole scene for the current level.
    pub fn on_level_loaded(&mut self) {
        let state = &self.game.current_state;
        self.scene.reset_grid(state);
        self.scene.place_markers(state);
    }

    /// Brings the scene up to date after the player moved from `from` to
    /// `to` (both `(row, col)`).
    pub fn on_player_moved(&mut self, from: (usize, usize), to: (usize, usize), is_undo: bool) {
        if from == to {
            return;
        }

        let state = &self.game.current_state;
        let changed = self.scene.update_trail_colors(state);
        self.scene.move_player_marker(state, to.1, to.0);
        tracing::debug!(?from, ?to, is_undo, changed, "player moved");

        if self.game.current_state.level_passed {
            self.on_level_finished();
        }
    }

    /// Starts the win animation on a copy of the goal marker.
    pub fn on_level_finished(&mut self) {
        tracing::info!(level = self.level_number, "level passed");
        self.scene.animated_goal = Some(AnimatedGoal::covering(
            self.scene.goal,
            self.scene.width(),
            self.scene.height(),
        ));
        self.animation = Some(WinAnimation::new(self.animation_settings));
    }

    /// Runs one key press worth of game logic.
    ///
    /// While the win animation plays only [`GameAction::Quit`] has an effect.
    pub fn apply(&mut self, action: GameAction) {
        if action == GameAction::Quit {
            tracing::info!("quit requested");
            self.should_quit = true;
            return;
        }
        if self.is_animating() {
            tracing::debug!(?action, "ignored during animation");
            return;
        }

        tracing::debug!(?action, "dispatch");
        self.mode = AppMode::Playing;
        self.status_message = None;

        let before = self.game.current_state.player();
        let mut is_undo = false;
        match action {
            GameAction::Move(direction) => self.game.record_and_move(direction),
            GameAction::Undo => {
                is_undo = true;
                if !self.game.undo() {
                    self.status_message = Some("Nothing to undo".to_string());
                }
            }
            GameAction::Save => self.save(),
            GameAction::Help => self.mode = AppMode::Help,
            // handled above
            GameAction::Quit => {}
        }

        let after = self.game.current_state.player();
        self.on_player_moved(before, after, is_undo);
    }

    fn save(&mut self) {
        match self.game.save_to_file() {
            Ok(path) => {
                tracing::info!(path = %path.display(), "game saved");
                self.status_message = Some(format!("Saved to {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.status_message = Some(format!("Save failed: {}", e));
            }
        }
    }

    /// Advances the win animation by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };

        match animation.advance(dt) {
            Some(AnimationPhase::Scaling) => self.on_scale_finished(),
            Some(AnimationPhase::Fading) => {
                self.animation = None;
                self.scene.animated_goal = None;
                self.finish_if_already_passed();
                return;
            }
            None => {}
        }
        self.sync_animated_goal();
    }

    /// The screen is covered: switch to the next level, or quit when there
    /// is none, and start fading the cover.
    fn on_scale_finished(&mut self) {
        let Some(next) = self.next_games.pop_front() else {
            tracing::info!("no levels left");
            self.should_quit = true;
            return;
        };

        self.game = next;
        self.level_number += 1;
        tracing::info!(level = self.level_number, of = self.level_count, "next level");
        self.on_level_loaded();

        if let Some(animation) = self.animation.as_mut() {
            animation.start_fade();
        }
    }

    /// A level whose player starts on the goal is won as soon as it shows,
    /// since no move can change it.
    fn finish_if_already_passed(&mut self) {
        if self.game.current_state.level_passed && !self.is_animating() {
            self.on_level_finished();
        }
    }

    fn sync_animated_goal(&mut self) {
        if let (Some(animation), Some(clone)) =
            (self.animation.as_ref(), self.scene.animated_goal.as_mut())
        {
            clone.update(animation.scale_progress(), animation.opacity());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Shape;
    use crate::domain::{GameState, parse_level};
    use tempfile::TempDir;

    fn level(text: &str) -> Streamline {
        Streamline::new(parse_level(text).unwrap())
    }

    // 3x3, obstacle in the middle, player bottom-left, goal top-right
    const RING: &str = "3 3\n2 0\n0 2\n\n X\n\n";

    fn app_with(levels: &[&str]) -> App {
        let games = levels.iter().map(|text| level(text)).collect();
        App::from_levels(games, AnimationSettings::default()).unwrap()
    }

    fn finish_animation(app: &mut App) {
        for _ in 0..100 {
            if !app.is_animating() || app.should_quit {
                return;
            }
            app.tick(Duration::from_millis(50));
        }
        panic!("animation did not finish");
    }

    #[test]
    fn test_new_lays_out_first_level() {
        let app = app_with(&[RING, RING]);
        assert_eq!(app.level_number, 1);
        assert_eq!(app.level_count, 2);
        assert_eq!(app.next_games.len(), 1);
        assert_eq!(app.scene.grid.len(), 3);
        assert!(matches!(app.scene.grid[1][1], Shape::Obstacle(_)));
        assert!(!app.is_animating());
        assert!(matches!(app.mode, AppMode::Playing));
    }

    #[test]
    fn test_from_levels_empty() {
        assert!(App::from_levels(Vec::new(), AnimationSettings::default()).is_none());
    }

    #[test]
    fn test_move_updates_marker_and_trail() {
        let mut app = app_with(&[RING]);
        app.apply(GameAction::Move(Direction::Up));

        let expected = app.scene.board_idx_to_scene_pos(&app.game.current_state, 0, 0);
        assert_eq!((app.scene.player.body.center_x, app.scene.player.body.center_y), expected);
        assert!(matches!(app.scene.grid[2][0], Shape::Trail(dot) if dot.fill.is_some()));
        assert!(matches!(app.scene.grid[1][0], Shape::Trail(dot) if dot.fill.is_some()));
        assert!(!app.is_animating());
    }

    #[test]
    fn test_undo_restores_marker_and_hides_trail() {
        let mut app = app_with(&[RING]);
        app.apply(GameAction::Move(Direction::Up));
        app.apply(GameAction::Undo);

        assert_eq!(app.game.current_state.player(), (2, 0));
        let expected = app.scene.board_idx_to_scene_pos(&app.game.current_state, 0, 2);
        assert_eq!((app.scene.player.body.center_x, app.scene.player.body.center_y), expected);
        assert!(matches!(app.scene.grid[1][0], Shape::Trail(dot) if dot.fill.is_none()));
    }

    #[test]
    fn test_undo_with_empty_history() {
        let mut app = app_with(&[RING]);
        app.apply(GameAction::Undo);
        assert_eq!(app.status_message.as_deref(), Some("Nothing to undo"));
    }

    #[test]
    fn test_help_changes_nothing_else() {
        let mut app = app_with(&[RING]);
        let before = app.game.current_state.clone();
        app.apply(GameAction::Help);

        assert!(matches!(app.mode, AppMode::Help));
        assert_eq!(app.game.current_state, before);
        assert_eq!(app.game.undo_depth(), 0);

        // the next real action closes the popup
        app.apply(GameAction::Move(Direction::Up));
        assert!(matches!(app.mode, AppMode::Playing));
    }

    #[test]
    fn test_quit() {
        let mut app = app_with(&[RING]);
        app.apply(GameAction::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_save_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saved");
        let game = level(RING).with_save_path(&path);
        let mut app = App::new(game, Vec::new(), AnimationSettings::default());

        app.apply(GameAction::Save);
        assert_eq!(
            app.status_message,
            Some(format!("Saved to {}", path.display()))
        );
        assert!(path.exists());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // the save path is an existing directory, so writing fails
        let game = level(RING).with_save_path(dir.path());
        let mut app = App::new(game, Vec::new(), AnimationSettings::default());

        app.apply(GameAction::Save);
        assert!(app.status_message.as_deref().unwrap().starts_with("Save failed"));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_win_advances_to_next_level() {
        let second = "2 2\n1 0\n0 1\n\n\n";
        let mut app = app_with(&[RING, second]);

        app.apply(GameAction::Move(Direction::Up));
        app.apply(GameAction::Move(Direction::Right));
        assert!(app.game.current_state.level_passed);
        assert!(app.is_animating());
        assert!(app.scene.animated_goal.is_some());

        // input is ignored while the animation runs
        app.apply(GameAction::Undo);
        assert!(app.game.current_state.level_passed);

        // scale step: the cover grows, level unchanged
        app.tick(Duration::from_millis(100));
        let clone = app.scene.animated_goal.unwrap();
        assert!(clone.scale_x > 1.0);
        assert_eq!(clone.opacity, 1.0);
        assert_eq!(app.level_number, 1);

        // scale done: next level is loaded under the cover
        app.tick(Duration::from_millis(100));
        assert_eq!(app.level_number, 2);
        assert_eq!(app.game.current_state.board.height(), 2);
        assert_eq!(app.scene.grid.len(), 2);
        assert!(app.scene.animated_goal.unwrap().covers_scene(app.scene.width(), app.scene.height()));
        assert!(matches!(app.animation.as_ref().map(|a| a.phase()), Some(AnimationPhase::Fading)));

        // fade done: cover removed
        app.tick(Duration::from_millis(300));
        assert!(!app.is_animating());
        assert!(app.scene.animated_goal.is_none());
        assert!(!app.should_quit);

        app.apply(GameAction::Move(Direction::Up));
        assert_eq!(app.game.current_state.player(), (0, 0));
    }

    #[test]
    fn test_win_on_last_level_quits() {
        let mut app = app_with(&[RING]);
        app.apply(GameAction::Move(Direction::Up));
        app.apply(GameAction::Move(Direction::Right));
        finish_animation(&mut app);
        assert!(app.should_quit);
    }

    #[test]
    fn test_level_starting_on_goal_is_won_at_once() {
        let solved = "1 1\n0 0\n0 0\n\n";
        let mut app = app_with(&[solved]);
        assert!(app.game.current_state.level_passed);
        assert!(app.is_animating());

        finish_animation(&mut app);
        assert!(app.should_quit);
    }

    #[test]
    fn test_chain_skips_over_level_starting_on_goal() {
        let solved = "2 2\n0 1\n0 1\n\n\n";
        let mut app = app_with(&[RING, solved, RING]);

        app.apply(GameAction::Move(Direction::Up));
        app.apply(GameAction::Move(Direction::Right));
        app.tick(Duration::from_millis(200));
        app.tick(Duration::from_millis(300));
        // the fade into the solved level ends by starting its own win
        assert_eq!(app.level_number, 2);
        assert!(matches!(app.animation.as_ref().map(|a| a.phase()), Some(AnimationPhase::Scaling)));

        app.tick(Duration::from_millis(200));
        app.tick(Duration::from_millis(300));
        assert_eq!(app.level_number, 3);
        assert!(!app.is_animating());
        assert!(!app.should_quit);
        assert!(!app.game.current_state.level_passed);
    }

    #[test]
    fn test_quit_during_animation() {
        let mut app = app_with(&[RING, RING]);
        app.apply(GameAction::Move(Direction::Up));
        app.apply(GameAction::Move(Direction::Right));
        assert!(app.is_animating());
        app.apply(GameAction::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_resize_relays_out_scene() {
        let mut app = App::new(
            Streamline::new(GameState::new(2, 4, (1, 0), (0, 3))),
            Vec::new(),
            AnimationSettings::default(),
        );
        app.resize(400.0, 100.0);
        assert_eq!(app.scene.square_size(&app.game.current_state), 50.0);
        assert_eq!(app.scene.goal.size, 40.0);
    }
}
