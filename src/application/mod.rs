//! Application layer managing state and game flow.
//!
//! This module coordinates between the domain layer and presentation layer:
//! it dispatches actions to the game engine, keeps the scene in step with
//! the board, and sequences the win animation between levels.

pub mod animation;
pub mod scene;
pub mod state;

pub use animation::*;
pub use scene::*;
pub use state::*;
