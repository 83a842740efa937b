//! Average placement normalized onto a four-player table.

use std::collections::BTreeMap;

use crate::models::{PlayerRow, TableRow};

use super::{rows_by_game, sort_rows, SortOrder};

/// Reference table size placements are scaled to.
pub const REFERENCE_PLAYERS: u32 = 4;

/// Competition ranks ("1224") for scores, highest score ranked 1.
pub fn competition_ranks(scores: &[i64]) -> Vec<u32> {
    scores
        .iter()
        .map(|score| 1 + scores.iter().filter(|other| *other > score).count() as u32)
        .collect()
}

/// Scale a rank among `players` onto the four-player range 1..=4.
pub fn normalize_placement(rank: u32, players: usize) -> f64 {
    let spread = players.saturating_sub(1).max(1) as f64;
    1.0 + (rank as f64 - 1.0) * (REFERENCE_PLAYERS - 1) as f64 / spread
}

/// Mean normalized placement per player, best (lowest) first.
pub fn average_placement(rows: &[PlayerRow]) -> Vec<TableRow> {
    let mut totals: BTreeMap<&str, (f64, u32)> = BTreeMap::new();

    for (_, game_rows) in rows_by_game(rows) {
        let scores: Vec<i64> = game_rows.iter().map(|row| row.score).collect();
        let ranks = competition_ranks(&scores);
        for (row, rank) in game_rows.iter().zip(ranks) {
            let entry = totals.entry(row.player.as_str()).or_default();
            entry.0 += normalize_placement(rank, game_rows.len());
            entry.1 += 1;
        }
    }

    let mut table: Vec<TableRow> = totals
        .into_iter()
        .map(|(player, (sum, games))| TableRow::new(player, sum / games as f64))
        .collect();
    sort_rows(&mut table, SortOrder::Ascending);
    table
}
