//! JSON game store.
//!
//! `games.json` is the source of truth: a pretty-printed JSON array of
//! [`GameRecord`]s in the order they were recorded. Appends rewrite the whole
//! file through a temporary sibling and a rename.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::{StorageConfig, StorageError};
use crate::entry::GameEntry;
use crate::models::{GameId, GameRecord};

/// Id for the next game: one past the current maximum, or 1.
pub fn next_id(games: &[GameRecord]) -> GameId {
    games.iter().map(|g| g.id).max().map_or(1, |max| max + 1)
}

/// File-backed list of recorded games.
#[derive(Debug, Clone)]
pub struct GameStore {
    path: PathBuf,
}

impl GameStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the configured data directory.
    pub fn open(config: &StorageConfig) -> Self {
        Self::new(config.games_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all games. A missing or blank file is an empty store.
    pub fn load(&self) -> Result<Vec<GameRecord>, StorageError> {
        if !self.path.exists() {
            debug!("No game store at {:?}, starting empty", self.path);
            return Ok(Vec::new());
        }

        if fs::metadata(&self.path)?.len() == 0 {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let games: Vec<GameRecord> = serde_json::from_reader(reader)?;

        let mut ids = HashSet::with_capacity(games.len());
        if let Some(dup) = games.iter().find(|g| !ids.insert(g.id)) {
            return Err(StorageError::DuplicateId(dup.id));
        }

        debug!("Read {} games from {:?}", games.len(), self.path);
        Ok(games)
    }

    /// Assign the next id to `entry`, persist it and return the stored record.
    pub fn append(&self, entry: GameEntry) -> Result<GameRecord, StorageError> {
        let mut games = self.load()?;
        let record = entry.into_record(next_id(&games));
        games.push(record.clone());
        self.write_all(&games)?;

        info!(
            "Added game {} ({} players, {} rounds) to {:?}",
            record.id,
            record.player_count(),
            record.rounds,
            self.path
        );
        Ok(record)
    }

    /// Replace the store contents.
    pub fn write_all(&self, games: &[GameRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
            games.serialize(&mut ser)?;
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;

        debug!("Wrote {} games to {:?}", games.len(), self.path);
        Ok(())
    }
}
