use crate::domain::{
    DEFAULT_HEIGHT, DEFAULT_OBSTACLE_COUNT, DEFAULT_SAVE_PATH, DEFAULT_WIDTH, GameError, GameResult,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings read from an optional TOML file. Every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub game: GameSettings,
    pub animation: AnimationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    pub default_height: usize,
    pub default_width: usize,
    pub obstacle_count: usize,
    pub save_path: PathBuf,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            default_height: DEFAULT_HEIGHT,
            default_width: DEFAULT_WIDTH,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
        }
    }
}

/// Durations of the two win animation steps, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSettings {
    pub scale_ms: u64,
    pub fade_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            scale_ms: 175,
            fade_ms: 250,
        }
    }
}

impl AnimationSettings {
    pub fn scale_duration(&self) -> Duration {
        Duration::from_millis(self.scale_ms)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub file: Option<PathBuf>,
    pub verbose: bool,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> GameResult<Self> {
        toml::from_str(text).map_err(|e| GameError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> GameResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            GameError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.game.default_height, 6);
        assert_eq!(settings.game.default_width, 5);
        assert_eq!(settings.game.obstacle_count, 3);
        assert_eq!(settings.animation.scale_duration(), Duration::from_millis(175));
        assert_eq!(settings.animation.fade_duration(), Duration::from_millis(250));
        assert!(settings.logging.file.is_none());
    }

    #[test]
    fn test_partial_config() {
        let settings = Settings::from_toml_str(
            r#"
            [game]
            obstacle_count = 5
            save_path = "saves/level.txt"

            [animation]
            fade_ms = 400
            "#,
        )
        .unwrap();

        assert_eq!(settings.game.obstacle_count, 5);
        assert_eq!(settings.game.default_height, 6);
        assert_eq!(settings.game.save_path, PathBuf::from("saves/level.txt"));
        assert_eq!(settings.animation.scale_ms, 175);
        assert_eq!(settings.animation.fade_ms, 400);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Settings::from_toml_str("[game]\nspeed = 3\n").unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "[logging]\nverbose = true\nfile = \"game.log\"\n").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert!(settings.logging.verbose);
        assert_eq!(settings.logging.file, Some(PathBuf::from("game.log")));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Settings::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }
}
