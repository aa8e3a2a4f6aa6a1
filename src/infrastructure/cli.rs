use crate::domain::GameResult;
use crate::infrastructure::Settings;
use clap::Parser;
use std::path::PathBuf;

const USAGE_NOTES: &str = "\
Usage:
> streamline               - to start a game with default size 6*5 and random obstacles
> streamline <filename>    - to start a game by reading game state from the specified file
> streamline <directory>   - to start a game by reading all game states from files in
                             the specified directory and playing them in order";

#[derive(Debug, Clone, Parser)]
#[command(name = "streamline")]
#[command(about = "Slide through the grid, leave a trail, reach the goal")]
#[command(after_help = USAGE_NOTES)]
pub struct Cli {
    /// Level file, or directory of level files played in name order
    pub path: Option<PathBuf>,

    /// TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Seed for the random default level
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Loads the settings file (if any) and applies command line overrides.
    pub fn settings(&self) -> GameResult<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        if let Some(file) = &self.log_file {
            settings.logging.file = Some(file.clone());
        }
        if self.verbose {
            settings.logging.verbose = true;
        }

        Ok(settings)
    }
}
