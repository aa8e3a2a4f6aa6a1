use crate::domain::{GameError, GameResult, Streamline};
use crate::infrastructure::GameSettings;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves the level argument into the ordered list of levels to play.
pub struct LevelRepository;

impl LevelRepository {
    /// Loads the levels named by `path`, or a random default level when no
    /// path is given. The first level returned is the one to start with.
    ///
    /// Progress is reported on the console before the UI takes over the
    /// terminal.
    ///
    /// # Errors
    ///
    /// [`GameError::NotFound`] when `path` does not exist,
    /// [`GameError::NoLevels`] for a directory without level files, and any
    /// IO or parse error from reading a level.
    pub fn load_levels(
        path: Option<&Path>,
        settings: &GameSettings,
        seed: Option<u64>,
    ) -> GameResult<Vec<Streamline>> {
        let Some(path) = path else {
            println!("Starting a default-sized random game...");
            return Ok(vec![Self::random_level(settings, seed)]);
        };

        if !path.exists() {
            return Err(GameError::NotFound(path.to_path_buf()));
        }

        if !path.is_dir() {
            println!("Loading single game from file {}...", path.display());
            tracing::info!(path = %path.display(), "loading single level");
            let game = Streamline::from_file(path)?.with_save_path(&settings.save_path);
            return Ok(vec![game]);
        }

        let entries = Self::sorted_entries(path)?;
        let total = entries.len();
        let mut games = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            if entry.is_dir() {
                continue;
            }
            println!("Loading game {}/{} from file {}...", index + 1, total, entry.display());
            tracing::info!(path = %entry.display(), index = index + 1, total, "loading level");
            games.push(Streamline::from_file(entry)?.with_save_path(&settings.save_path));
        }

        if games.is_empty() {
            return Err(GameError::NoLevels(path.to_path_buf()));
        }
        Ok(games)
    }

    pub fn random_level(settings: &GameSettings, seed: Option<u64>) -> Streamline {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Streamline::new_random(
            settings.default_height,
            settings.default_width,
            settings.obstacle_count,
            &mut rng,
        )
        .with_save_path(&settings.save_path)
    }

    fn sorted_entries(dir: &Path) -> GameResult<Vec<PathBuf>> {
        let mut entries = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Cell;
    use tempfile::TempDir;

    fn write_level(dir: &Path, name: &str, player_col: usize) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("1 3\n0 {}\n0 2\n\n", player_col)).unwrap();
        path
    }

    #[test]
    fn test_random_default_level() {
        let settings = GameSettings::default();
        let games = LevelRepository::load_levels(None, &settings, Some(3)).unwrap();
        assert_eq!(games.len(), 1);

        let state = &games[0].current_state;
        assert_eq!(state.board.height(), settings.default_height);
        assert_eq!(state.board.width(), settings.default_width);
        assert_eq!(state.board.count(Cell::Obstacle), settings.obstacle_count);
        assert_eq!(games[0].save_path(), settings.save_path.as_path());
    }

    #[test]
    fn test_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = LevelRepository::load_levels(Some(&missing), &GameSettings::default(), None)
            .unwrap_err();
        assert!(matches!(err, GameError::NotFound(p) if p == missing));
    }

    #[test]
    fn test_single_file() {
        let dir = TempDir::new().unwrap();
        let path = write_level(dir.path(), "only", 1);

        let games = LevelRepository::load_levels(Some(&path), &GameSettings::default(), None).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].current_state.player(), (0, 1));
    }

    #[test]
    fn test_directory_sorted_and_skips_subdirectories() {
        let dir = TempDir::new().unwrap();
        write_level(dir.path(), "b_second", 1);
        write_level(dir.path(), "a_first", 0);
        fs::create_dir(dir.path().join("aa_nested")).unwrap();

        let games = LevelRepository::load_levels(Some(dir.path()), &GameSettings::default(), None)
            .unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].current_state.player(), (0, 0));
        assert_eq!(games[1].current_state.player(), (0, 1));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let err = LevelRepository::load_levels(Some(dir.path()), &GameSettings::default(), None)
            .unwrap_err();
        assert!(matches!(err, GameError::NoLevels(_)));
    }

    #[test]
    fn test_bad_level_in_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken"), "not a level\n").unwrap();
        let err = LevelRepository::load_levels(Some(dir.path()), &GameSettings::default(), None)
            .unwrap_err();
        assert!(matches!(err, GameError::Parse { line: 1, .. }));
    }
}
