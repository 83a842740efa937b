//! Filesystem storage.
//!
//! The data directory holds:
//! - `games.json`, the append-only list of recorded games
//! - the rendered statistics report (`stats.txt` by default)

mod games;

pub use games::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::GameId;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate game id {0} in store")]
    DuplicateId(GameId),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn games_path(&self) -> PathBuf {
        self.data_dir.join("games.json")
    }

    /// Path of the rendered report, relative to the data directory.
    pub fn report_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(config.games_path(), PathBuf::from("/data/games.json"));
        assert_eq!(
            config.report_path("stats.txt"),
            PathBuf::from("/data/stats.txt")
        );
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }
}
