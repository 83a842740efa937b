//! Derived row models produced by tabulation.

use serde::{Deserialize, Serialize};

use super::GameId;

/// One player's participation in one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: GameId,
    pub player: String,
    pub score: i64,

    /// Effective rounds after the five-player correction
    pub rounds: u32,

    pub place: String,
}

/// One game, rounds unscaled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRow {
    pub id: GameId,
    pub rounds: u32,
    pub place: String,
}

/// The two tables every evaluation works from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    pub player_rows: Vec<PlayerRow>,
    pub game_rows: Vec<GameRow>,
}

impl Tables {
    pub fn is_empty(&self) -> bool {
        self.game_rows.is_empty() && self.player_rows.is_empty()
    }
}
