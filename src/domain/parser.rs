//! Level text format.
//!
//! A level file looks like this:
//!
//! ```text
//! 6 5
//! 5 0
//! 0 4
//!     X
//!  X
//! ...
//! ```
//!
//! The first three lines hold the board size (`height width`), the player
//! position and the goal position, each as `row col`. They are followed by
//! `height` board lines made of `' '` (empty), `'X'` (obstacle) and `'.'`
//! (trail). Board lines may be shorter than the width; the missing squares
//! are empty, so trailing whitespace stripped by an editor is harmless.

use crate::domain::{Cell, GameError, GameResult, GameState};

/// Parses a level from its text form.
///
/// # Errors
///
/// Returns [`GameError::Parse`] with the 1-based line number when a header
/// line is missing or malformed, a coordinate lies outside the board, or a
/// board line is too long or holds an unknown character.
///
/// # Examples
///
/// ```
/// use streamline::domain::parse_level;
///
/// let state = parse_level("2 3\n1 0\n0 2\n\n X\n").unwrap();
/// assert_eq!(state.board.height(), 2);
/// assert_eq!(state.player(), (1, 0));
/// ```
pub fn parse_level(text: &str) -> GameResult<GameState> {
    let mut lines = text.lines();

    let (height, width) = parse_pair(lines.next(), 1, "board size")?;
    if height == 0 || width == 0 {
        return Err(GameError::parse(1, "board must have at least one row and column"));
    }

    let player = parse_pair(lines.next(), 2, "player position")?;
    check_in_bounds(player, height, width, 2, "player")?;
    let goal = parse_pair(lines.next(), 3, "goal position")?;
    check_in_bounds(goal, height, width, 3, "goal")?;

    let mut state = GameState::new(height, width, player, goal);

    for row in 0..height {
        let line_number = row + 4;
        let line = lines.next().ok_or_else(|| {
            GameError::parse(line_number, format!("expected {} board rows, found {}", height, row))
        })?;
        let line = line.strip_suffix('\r').unwrap_or(line);

        let chars: Vec<char> = line.chars().collect();
        if chars.len() > width {
            return Err(GameError::parse(
                line_number,
                format!("board row is {} wide, expected at most {}", chars.len(), width),
            ));
        }
        for (col, c) in chars.into_iter().enumerate() {
            let cell = Cell::from_char(c).ok_or_else(|| {
                GameError::parse(line_number, format!("unknown board character {:?}", c))
            })?;
            state.board.set(row, col, cell);
        }
    }

    Ok(state)
}

/// Renders a level in the form [`parse_level`] reads back.
pub fn format_level(state: &GameState) -> String {
    let board = &state.board;
    let mut out = format!(
        "{} {}\n{} {}\n{} {}\n",
        board.height(),
        board.width(),
        state.player_row,
        state.player_col,
        state.goal_row,
        state.goal_col
    );
    for row in 0..board.height() {
        out.extend(board.row(row).iter().map(|cell| cell.to_char()));
        out.push('\n');
    }
    out
}

fn parse_pair(line: Option<&str>, line_number: usize, what: &str) -> GameResult<(usize, usize)> {
    let line = line.ok_or_else(|| GameError::parse(line_number, format!("missing {}", what)))?;
    let numbers: Vec<usize> = line
        .split_whitespace()
        .map(|token| token.parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|e| GameError::parse(line_number, format!("bad {}: {}", what, e)))?;

    match numbers.as_slice() {
        [a, b] => Ok((*a, *b)),
        _ => Err(GameError::parse(
            line_number,
            format!("expected two numbers for {}, found {}", what, numbers.len()),
        )),
    }
}

fn check_in_bounds(
    (row, col): (usize, usize),
    height: usize,
    width: usize,
    line_number: usize,
    what: &str,
) -> GameResult<()> {
    if row >= height || col >= width {
        return Err(GameError::parse(
            line_number,
            format!("{} at ({}, {}) is outside the {}x{} board", what, row, col, height, width),
        ));
    }
    Ok(())
}
