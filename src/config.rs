use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::entity::{Size, DEFAULT_NOTE_SIZE};
use crate::error::{CorkboardError, Result};
use crate::storage::NOTES_KEY;
use crate::warnings::{check_size_input, format_warning, Warning};

pub const CORKBOARD_DIR: &str = ".corkboard";
const CONFIG_FILE: &str = "config.yaml";

/// Where the board's notes are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Json,
    Sqlite,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Json => write!(f, "json"),
            Backend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Backend::Json),
            "sqlite" => Ok(Backend::Sqlite),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Board configuration, stored as `.corkboard/config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Width given to newly created notes
    pub default_width: f64,
    /// Height given to newly created notes
    pub default_height: f64,
    pub backend: Backend,
    /// Store key holding the note collection
    pub key: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_NOTE_SIZE,
            default_height: DEFAULT_NOTE_SIZE,
            backend: Backend::default(),
            key: NOTES_KEY.to_string(),
        }
    }
}

impl BoardConfig {
    pub fn with_backend(backend: Backend) -> Self {
        Self {
            backend,
            ..Self::default()
        }
    }

    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    /// Set the default width. Out-of-range values leave the config unchanged.
    pub fn set_default_width(&mut self, value: f64) -> std::result::Result<(), Warning> {
        self.default_width = check_size_input(value)?;
        Ok(())
    }

    /// Set the default height. Out-of-range values leave the config unchanged.
    pub fn set_default_height(&mut self, value: f64) -> std::result::Result<(), Warning> {
        self.default_height = check_size_input(value)?;
        Ok(())
    }

    /// Replace out-of-range defaults read from disk with the built-in ones.
    fn sanitized(mut self) -> Self {
        let fallback = Self::default();
        if let Err(w) = check_size_input(self.default_width) {
            warn!(value = self.default_width, "default_width ignored: {}", format_warning(&w));
            self.default_width = fallback.default_width;
        }
        if let Err(w) = check_size_input(self.default_height) {
            warn!(value = self.default_height, "default_height ignored: {}", format_warning(&w));
            self.default_height = fallback.default_height;
        }
        if self.key.trim().is_empty() {
            warn!("empty store key in config, using '{}'", NOTES_KEY);
            self.key = fallback.key;
        }
        self
    }

    /// Load the config from a board directory. A missing file yields defaults.
    pub fn load(board_dir: &Path) -> Result<Self> {
        let path = board_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)?;
        let config: BoardConfig = serde_yaml::from_str(&contents)?;
        Ok(config.sanitized())
    }

    pub fn save(&self, board_dir: &Path) -> Result<()> {
        let contents = serde_yaml::to_string(self)?;
        fs::write(board_dir.join(CONFIG_FILE), contents)?;
        Ok(())
    }
}

/// Create `.corkboard/` under `root` and write the initial config.
pub fn init_project(root: &Path, config: &BoardConfig) -> Result<PathBuf> {
    let board_dir = root.join(CORKBOARD_DIR);
    if board_dir.exists() {
        return Err(CorkboardError::AlreadyInitialized);
    }
    fs::create_dir_all(&board_dir)?;
    config.save(&board_dir)?;
    Ok(board_dir)
}

/// Locate `.corkboard/` under `root` and load its config.
pub fn open_project(root: &Path) -> Result<(PathBuf, BoardConfig)> {
    let board_dir = root.join(CORKBOARD_DIR);
    if !board_dir.is_dir() {
        return Err(CorkboardError::NotInitialized);
    }
    let config = BoardConfig::load(&board_dir)?;
    Ok((board_dir, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.default_size(), Size::new(240.0, 240.0));
        assert_eq!(config.backend, Backend::Json);
        assert_eq!(config.key, "notes");
    }

    #[test]
    fn test_rejected_width_keeps_previous_value() {
        let mut config = BoardConfig::default();
        config.set_default_width(300.0).unwrap();

        let err = config.set_default_width(90.0).unwrap_err();
        assert_eq!(format_warning(&err), "Value cannot be less than 150");
        assert_eq!(config.default_width, 300.0);

        assert!(config.set_default_height(701.0).is_err());
        assert_eq!(config.default_height, 240.0);
    }

    #[test]
    fn test_init_and_open_project() {
        let tmp = TempDir::new().unwrap();
        let config = BoardConfig::with_backend(Backend::Sqlite);

        init_project(tmp.path(), &config).unwrap();
        assert!(tmp.path().join(".corkboard/config.yaml").exists());

        let (dir, loaded) = open_project(tmp.path()).unwrap();
        assert_eq!(dir, tmp.path().join(CORKBOARD_DIR));
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_init_twice_fails() {
        let tmp = TempDir::new().unwrap();
        init_project(tmp.path(), &BoardConfig::default()).unwrap();

        let result = init_project(tmp.path(), &BoardConfig::default());
        assert!(matches!(result, Err(CorkboardError::AlreadyInitialized)));
    }

    #[test]
    fn test_open_without_init_fails() {
        let tmp = TempDir::new().unwrap();
        let result = open_project(tmp.path());
        assert!(matches!(result, Err(CorkboardError::NotInitialized)));
    }

    #[test]
    fn test_out_of_range_file_values_fall_back() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "default_width: 20\ndefault_height: 500\nbackend: sqlite\n",
        )
        .unwrap();

        let config = BoardConfig::load(tmp.path()).unwrap();
        assert_eq!(config.default_width, DEFAULT_NOTE_SIZE);
        assert_eq!(config.default_height, 500.0);
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.key, "notes");
    }
}
