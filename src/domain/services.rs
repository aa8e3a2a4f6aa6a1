//! Game engine for a single level.
//!
//! [`Streamline`] owns the live [`GameState`] together with the stack of
//! earlier states used for undo, and knows where the level is saved.

use crate::domain::{Cell, Direction, GameResult, GameState, format_level, parse_level};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_WIDTH: usize = 5;
pub const DEFAULT_OBSTACLE_COUNT: usize = 3;
pub const DEFAULT_SAVE_PATH: &str = "saved_streamline_game";

#[derive(Debug, Clone)]
pub struct Streamline {
    pub current_state: GameState,
    previous_states: Vec<GameState>,
    save_path: PathBuf,
}

impl Streamline {
    pub fn new(state: GameState) -> Self {
        Self {
            current_state: state,
            previous_states: Vec::new(),
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
        }
    }

    /// Builds a random level with the player in the bottom-left corner and
    /// the goal in the top-right corner.
    ///
    /// Obstacles land on distinct empty squares other than the player and
    /// goal squares; the count is clamped to the number of such squares.
    pub fn new_random<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        obstacle_count: usize,
        rng: &mut R,
    ) -> Self {
        let height = height.max(1);
        let width = width.max(1);
        let mut state = GameState::new(height, width, (height - 1, 0), (0, width - 1));

        let mut free: Vec<(usize, usize)> = (0..height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .filter(|pos| *pos != state.player() && *pos != state.goal())
            .collect();

        for _ in 0..obstacle_count.min(free.len()) {
            let (row, col) = free.swap_remove(rng.gen_range(0..free.len()));
            state.board.set(row, col, Cell::Obstacle);
        }

        tracing::debug!(height, width, obstacle_count, "generated random level");
        Self::new(state)
    }

    /// Loads a level saved in the level text format.
    pub fn from_file(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let state = parse_level(&text)?;
        tracing::debug!(path = %path.display(), "parsed level");
        Ok(Self::new(state))
    }

    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Moves the player and remembers the previous state for [`undo`].
    ///
    /// A move that leaves the state unchanged is not recorded.
    ///
    /// [`undo`]: Streamline::undo
    pub fn record_and_move(&mut self, direction: Direction) {
        let previous = self.current_state.clone();
        self.current_state.move_player(direction);
        if self.current_state != previous {
            self.previous_states.push(previous);
        }
    }

    /// Restores the state before the last recorded move.
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.previous_states.pop() {
            Some(state) => {
                self.current_state = state;
                true
            }
            None => false,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.previous_states.len()
    }

    /// Writes the current state to the save path and returns that path.
    pub fn save_to_file(&self) -> GameResult<PathBuf> {
        if let Some(parent) = self.save_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.save_path, format_level(&self.current_state))?;
        Ok(self.save_path.clone())
    }
}
