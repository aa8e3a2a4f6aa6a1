//! Streamline - terminal grid puzzle
//!
//! Slide a token across a board, leaving a trail behind, and reach the goal
//! without getting boxed in. Levels can be chained from a directory.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
