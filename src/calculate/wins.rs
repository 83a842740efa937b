//! Game wins and win ratio.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{PlayerRow, StatValue, TableRow, TiePolicy};

use super::{round_to, rows_by_game, sort_rows, SortOrder};

/// Win credits per player, counting only players with at least one credit.
///
/// Under [`TiePolicy::FirstByRow`] the first top-scoring row of each game
/// wins, so every game is credited exactly once.
pub fn games_won(rows: &[PlayerRow], tie_policy: TiePolicy) -> Vec<TableRow> {
    let mut credits: BTreeMap<&str, f64> = BTreeMap::new();

    for (_, game_rows) in rows_by_game(rows) {
        let Some(top) = game_rows.iter().map(|row| row.score).max() else {
            continue;
        };
        let leaders: Vec<&str> = game_rows
            .iter()
            .filter(|row| row.score == top)
            .map(|row| row.player.as_str())
            .collect();

        match tie_policy {
            TiePolicy::FirstByRow => {
                *credits.entry(leaders[0]).or_default() += 1.0;
            }
            TiePolicy::SplitCredit => {
                let share = 1.0 / leaders.len() as f64;
                for player in leaders {
                    *credits.entry(player).or_default() += share;
                }
            }
            TiePolicy::Exclude => {
                if leaders.len() == 1 {
                    *credits.entry(leaders[0]).or_default() += 1.0;
                }
            }
        }
    }

    let mut table: Vec<TableRow> = credits
        .into_iter()
        .map(|(player, credit)| TableRow::new(player, win_value(credit, tie_policy)))
        .collect();
    sort_rows(&mut table, SortOrder::Descending);
    table
}

/// Join win credits with games played, giving every player without a win zero.
pub fn merge_games_won(
    won: &[TableRow],
    played: &[TableRow],
    tie_policy: TiePolicy,
) -> Vec<TableRow> {
    let players: BTreeSet<&str> = won
        .iter()
        .chain(played.iter())
        .map(|row| row.player.as_str())
        .collect();

    let mut table: Vec<TableRow> = players
        .into_iter()
        .map(|player| {
            let value = won
                .iter()
                .find(|row| row.player == player)
                .map(|row| row.value)
                .unwrap_or_else(|| win_value(0.0, tie_policy));
            TableRow::new(player, value)
        })
        .collect();
    sort_rows(&mut table, SortOrder::Descending);
    table
}

/// Wins divided by games played, rounded to three decimals.
///
/// Only players present in both tables are reported.
pub fn games_won_per_game(won: &[TableRow], played: &[TableRow]) -> Vec<TableRow> {
    let mut table: Vec<TableRow> = won
        .iter()
        .filter_map(|win| {
            let games = played.iter().find(|row| row.player == win.player)?;
            let games = games.value.as_f64();
            if games <= 0.0 {
                return None;
            }
            Some(TableRow::new(
                win.player.clone(),
                round_to(win.value.as_f64() / games, 3),
            ))
        })
        .collect();
    sort_rows(&mut table, SortOrder::Descending);
    table
}

fn win_value(credit: f64, tie_policy: TiePolicy) -> StatValue {
    match tie_policy {
        TiePolicy::SplitCredit => StatValue::Float(round_to(credit, 3)),
        TiePolicy::FirstByRow | TiePolicy::Exclude => StatValue::Int(credit as i64),
    }
}
