//! Validation of user-entered games.
//!
//! Everything that reaches the game store goes through [`GameEntry::new`],
//! which enforces the store invariants: at least four distinct players, a
//! positive round count, one score per player summing to zero and a
//! non-empty place. The statistics engine relies on these and does not
//! re-check them.

mod prompt;

pub use prompt::*;

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::models::{GameId, GameRecord, Scores};

/// Minimum number of players in a recorded game.
pub const MIN_PLAYERS: usize = 4;

/// Reasons an entered game is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("At least {min} players are required, got {found}")]
    TooFewPlayers { min: usize, found: usize },

    #[error("Player names must not be empty")]
    EmptyPlayerName,

    #[error("Player '{0}' is listed more than once")]
    DuplicatePlayer(String),

    #[error("Rounds must be a positive integer, got '{0}'")]
    InvalidRounds(String),

    #[error("Expected {expected} scores, got {found}")]
    ScoreCountMismatch { expected: usize, found: usize },

    #[error("Score '{0}' is not an integer")]
    InvalidScore(String),

    #[error("Scores must sum to zero, got {0}")]
    NonZeroSum(i64),

    #[error("Place must not be empty")]
    EmptyPlace,
}

fn split_list(input: &str) -> Vec<&str> {
    input.split(',').map(str::trim).collect()
}

/// Parse a comma-separated list of player names.
pub fn parse_players(input: &str) -> Result<Vec<String>, EntryError> {
    let names = split_list(input);
    validate_players(&names)?;
    Ok(names.into_iter().map(String::from).collect())
}

fn validate_players<S: AsRef<str>>(names: &[S]) -> Result<(), EntryError> {
    if names.len() < MIN_PLAYERS {
        return Err(EntryError::TooFewPlayers {
            min: MIN_PLAYERS,
            found: names.len(),
        });
    }

    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        if name.trim().is_empty() {
            return Err(EntryError::EmptyPlayerName);
        }
        if !seen.insert(name) {
            return Err(EntryError::DuplicatePlayer(name.to_string()));
        }
    }
    Ok(())
}

/// Parse a positive round count.
pub fn parse_rounds(input: &str) -> Result<u32, EntryError> {
    let input = input.trim();
    match input.parse::<u32>() {
        Ok(rounds) if rounds > 0 => Ok(rounds),
        _ => Err(EntryError::InvalidRounds(input.to_string())),
    }
}

/// Parse one comma-separated integer score per player.
pub fn parse_scores(input: &str, player_count: usize) -> Result<Vec<i64>, EntryError> {
    let scores = split_list(input)
        .into_iter()
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| EntryError::InvalidScore(s.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    validate_scores(&scores, player_count)?;
    Ok(scores)
}

fn validate_scores(scores: &[i64], player_count: usize) -> Result<(), EntryError> {
    if scores.len() != player_count {
        return Err(EntryError::ScoreCountMismatch {
            expected: player_count,
            found: scores.len(),
        });
    }
    let sum: i64 = scores.iter().sum();
    if sum != 0 {
        return Err(EntryError::NonZeroSum(sum));
    }
    Ok(())
}

/// Parse the place a game was played at.
pub fn parse_place(input: &str) -> Result<String, EntryError> {
    let place = input.trim();
    if place.is_empty() {
        return Err(EntryError::EmptyPlace);
    }
    Ok(place.to_string())
}

/// A validated game, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEntry {
    players: Vec<String>,
    rounds: u32,
    scores: Vec<i64>,
    place: String,
}

impl GameEntry {
    pub fn new(
        players: Vec<String>,
        rounds: u32,
        scores: Vec<i64>,
        place: String,
    ) -> Result<Self, EntryError> {
        let players: Vec<String> = players.into_iter().map(|p| p.trim().to_string()).collect();
        validate_players(&players)?;
        if rounds == 0 {
            return Err(EntryError::InvalidRounds(rounds.to_string()));
        }
        validate_scores(&scores, players.len())?;
        let place = parse_place(&place)?;

        Ok(Self {
            players,
            rounds,
            scores,
            place,
        })
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn scores(&self) -> &[i64] {
        &self.scores
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    /// Build the stored record under `id`.
    pub fn into_record(self, id: GameId) -> GameRecord {
        let scores: Scores = self.players.into_iter().zip(self.scores).collect();
        GameRecord::new(id, scores, self.rounds, self.place)
    }
}

impl fmt::Display for GameEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scores: Vec<String> = self.scores.iter().map(|s| s.to_string()).collect();
        write!(
            f,
            "Players: {}, Rounds: {}, Scores: {}, Place: {}",
            self.players.join(", "),
            self.rounds,
            scores.join(", "),
            self.place
        )
    }
}
