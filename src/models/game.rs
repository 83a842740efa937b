//! Recorded game model.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a recorded game. Assigned as `max(existing) + 1`.
pub type GameId = u64;

/// Per-player scores of one game, in the order they were entered.
///
/// Serializes as a JSON object. Entry order is significant: it is the row
/// order the tie-break in "Games won" relies on, so it survives a round trip
/// through the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scores(Vec<(String, i64)>);

impl Scores {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a score, replacing the value if the player is already present.
    pub fn insert(&mut self, player: impl Into<String>, score: i64) {
        let player = player.into();
        match self.0.iter_mut().find(|(name, _)| *name == player) {
            Some(entry) => entry.1 = score,
            None => self.0.push((player, score)),
        }
    }

    pub fn get(&self, player: &str) -> Option<i64> {
        self.0
            .iter()
            .find(|(name, _)| name == player)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.0.iter().map(|(_, score)| score).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for Scores {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut scores = Scores::new();
        for (player, score) in iter {
            scores.insert(player, score);
        }
        scores
    }
}

impl Serialize for Scores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (player, score) in &self.0 {
            map.serialize_entry(player, score)?;
        }
        map.end()
    }
}

struct ScoresVisitor;

impl<'de> Visitor<'de> for ScoresVisitor {
    type Value = Scores;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of player name to integer score")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Scores, A::Error> {
        let mut entries: Vec<(String, i64)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((player, score)) = access.next_entry::<String, i64>()? {
            if entries.iter().any(|(name, _)| *name == player) {
                return Err(de::Error::custom(format!("duplicate player '{}'", player)));
            }
            entries.push((player, score));
        }
        Ok(Scores(entries))
    }
}

impl<'de> Deserialize<'de> for Scores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ScoresVisitor)
    }
}

/// One recorded game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,

    /// Player name to score; sums to zero
    pub scores: Scores,

    /// Number of rounds played
    pub rounds: u32,

    /// Where the game took place
    pub place: String,
}

impl GameRecord {
    pub fn new(id: GameId, scores: Scores, rounds: u32, place: impl Into<String>) -> Self {
        Self {
            id,
            scores,
            rounds,
            place: place.into(),
        }
    }

    pub fn player_count(&self) -> usize {
        self.scores.len()
    }
}
