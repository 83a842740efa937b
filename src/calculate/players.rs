//! Totals and per-player score and participation tables.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{GameId, GameRow, PlayerRow, StatValue, TableRow};

use super::{round_to, sort_rows, SortOrder};

/// Distinct player names in first-seen order.
pub fn included_players(rows: &[PlayerRow]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    rows.iter()
        .filter(|row| seen.insert(row.player.as_str()))
        .map(|row| row.player.clone())
        .collect()
}

/// Places with their game counts, most frequent first.
///
/// Places with equal counts stay in first-seen order.
pub fn included_places(games: &[GameRow]) -> Vec<(String, u64)> {
    let mut places: Vec<(String, u64)> = Vec::new();
    for game in games {
        match places.iter_mut().find(|(place, _)| *place == game.place) {
            Some(entry) => entry.1 += 1,
            None => places.push((game.place.clone(), 1)),
        }
    }
    places.sort_by(|a, b| b.1.cmp(&a.1));
    places
}

pub fn total_games(games: &[GameRow]) -> i64 {
    games.len() as i64
}

/// Sum of unscaled rounds over all games.
pub fn total_rounds(games: &[GameRow]) -> i64 {
    games.iter().map(|game| game.rounds as i64).sum()
}

/// Best single-game score per player, highest first.
pub fn highest_score(rows: &[PlayerRow]) -> Vec<TableRow> {
    score_extreme(rows, i64::max, SortOrder::Descending)
}

/// Worst single-game score per player, lowest first.
pub fn lowest_score(rows: &[PlayerRow]) -> Vec<TableRow> {
    score_extreme(rows, i64::min, SortOrder::Ascending)
}

fn score_extreme(
    rows: &[PlayerRow],
    pick: fn(i64, i64) -> i64,
    order: SortOrder,
) -> Vec<TableRow> {
    let mut extremes: BTreeMap<&str, i64> = BTreeMap::new();
    for row in rows {
        extremes
            .entry(row.player.as_str())
            .and_modify(|best| *best = pick(*best, row.score))
            .or_insert(row.score);
    }

    let mut table: Vec<TableRow> = extremes
        .into_iter()
        .map(|(player, score)| TableRow::new(player, score))
        .collect();
    sort_rows(&mut table, order);
    table
}

/// Total score over total effective rounds, rounded to three decimals.
///
/// Players without any effective rounds have no entry.
pub fn average_score_per_round(rows: &[PlayerRow]) -> Vec<TableRow> {
    let mut sums: BTreeMap<&str, (i64, u64)> = BTreeMap::new();
    for row in rows {
        let entry = sums.entry(row.player.as_str()).or_default();
        entry.0 += row.score;
        entry.1 += row.rounds as u64;
    }

    let mut table: Vec<TableRow> = sums
        .into_iter()
        .filter(|(_, (_, rounds))| *rounds > 0)
        .map(|(player, (score, rounds))| {
            TableRow::new(player, round_to(score as f64 / rounds as f64, 3))
        })
        .collect();
    sort_rows(&mut table, SortOrder::Descending);
    table
}

/// Number of distinct games per player, most first.
pub fn games_played(rows: &[PlayerRow]) -> Vec<TableRow> {
    let mut games: BTreeMap<&str, BTreeSet<GameId>> = BTreeMap::new();
    for row in rows {
        games.entry(row.player.as_str()).or_default().insert(row.id);
    }

    let mut table: Vec<TableRow> = games
        .into_iter()
        .map(|(player, ids)| TableRow::new(player, StatValue::Int(ids.len() as i64)))
        .collect();
    sort_rows(&mut table, SortOrder::Descending);
    table
}

/// Sum of effective rounds per player, most first.
pub fn rounds_played(rows: &[PlayerRow]) -> Vec<TableRow> {
    let mut rounds: BTreeMap<&str, i64> = BTreeMap::new();
    for row in rows {
        *rounds.entry(row.player.as_str()).or_default() += row.rounds as i64;
    }

    let mut table: Vec<TableRow> = rounds
        .into_iter()
        .map(|(player, total)| TableRow::new(player, total))
        .collect();
    sort_rows(&mut table, SortOrder::Descending);
    table
}
