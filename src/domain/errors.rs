use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid level file (line {line}): {message}")]
    Parse { line: usize, message: String },

    #[error("File {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("No level files found in {}", .0.display())]
    NoLevels(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GameError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        GameError::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;
