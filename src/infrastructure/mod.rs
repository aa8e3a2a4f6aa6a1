//! Infrastructure layer providing external service integrations.
//!
//! Level files on disk, the settings file, command line arguments and the
//! log subscriber.

pub mod cli;
pub mod config;
pub mod logger;
pub mod persistence;

pub use cli::*;
pub use config::*;
pub use logger::*;
pub use persistence::*;
