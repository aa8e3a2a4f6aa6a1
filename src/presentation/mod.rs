//! Presentation layer handling terminal UI and user input.
//!
//! This module maps key presses to game actions and draws the scene on a
//! ratatui canvas, and owns the terminal modes while the game runs.

pub mod ui;
pub mod input;
pub mod terminal;

pub use ui::*;
pub use input::*;
pub use terminal::*;
