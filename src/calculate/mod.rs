//! Statistics calculation engine.
//!
//! Computes the ordered statistics set from the player and game tables:
//! - Totals and included players/places
//! - Per-player score extremes, averages and participation
//! - Games won (with a configurable tie policy) and win ratio
//! - Average placement normalized onto a four-player scale
//!
//! "Games won" is merged with "Games played" before it is reported, and
//! "Games won per game" is derived from both, so the order below matters.

mod placement;
mod players;
mod wins;

pub use placement::*;
pub use players::*;
pub use wins::*;

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{
    GameId, GameRecord, NamedStatistic, PlayerRow, StatValue, Statistic, StatsReport, TableRow,
    Tables, TiePolicy,
};
use crate::tabulate;

pub const INCLUDED_PLAYERS: &str = "Included players";
pub const INCLUDED_PLACES: &str = "Included places";
pub const TOTAL_GAMES: &str = "Total games";
pub const TOTAL_ROUNDS: &str = "Total rounds";
pub const HIGHEST_SCORE: &str = "Highest total score";
pub const LOWEST_SCORE: &str = "Lowest total score";
pub const AVERAGE_SCORE_PER_ROUND: &str = "Average score per round";
pub const GAMES_WON: &str = "Games won";
pub const GAMES_PLAYED: &str = "Games played";
pub const ROUNDS_PLAYED: &str = "Rounds played";
pub const AVERAGE_PLACEMENT: &str = "Average placement (4P normalized)";
pub const GAMES_WON_PER_GAME: &str = "Games won per game";

/// Report order of all statistics.
pub const STATISTIC_NAMES: [&str; 12] = [
    INCLUDED_PLAYERS,
    INCLUDED_PLACES,
    TOTAL_GAMES,
    TOTAL_ROUNDS,
    HIGHEST_SCORE,
    LOWEST_SCORE,
    AVERAGE_SCORE_PER_ROUND,
    GAMES_WON,
    GAMES_PLAYED,
    ROUNDS_PLAYED,
    AVERAGE_PLACEMENT,
    GAMES_WON_PER_GAME,
];

/// Broken links between player rows and game rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculateError {
    #[error("Player row for game {0} has no matching game row")]
    OrphanPlayerRow(GameId),

    #[error("Game {0} has no player rows")]
    GameWithoutPlayers(GameId),

    #[error("Duplicate game id: {0}")]
    DuplicateGame(GameId),
}

/// Sort direction for a statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sort table rows by value; equal values fall back to player name.
pub fn sort_rows(rows: &mut [TableRow], order: SortOrder) {
    rows.sort_by(|a, b| {
        let by_value = a
            .value
            .as_f64()
            .partial_cmp(&b.value.as_f64())
            .unwrap_or(Ordering::Equal);
        let by_value = match order {
            SortOrder::Ascending => by_value,
            SortOrder::Descending => by_value.reverse(),
        };
        by_value.then_with(|| a.player.cmp(&b.player))
    });
}

/// Round to `places` decimals, exact halves going to the even digit.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Group player rows by game id, keeping row order inside each game.
pub fn rows_by_game(rows: &[PlayerRow]) -> BTreeMap<GameId, Vec<&PlayerRow>> {
    let mut games: BTreeMap<GameId, Vec<&PlayerRow>> = BTreeMap::new();
    for row in rows {
        games.entry(row.id).or_default().push(row);
    }
    games
}

/// Verify every player row belongs to exactly one game row and vice versa.
pub fn check_integrity(tables: &Tables) -> Result<(), CalculateError> {
    let mut game_ids = HashSet::with_capacity(tables.game_rows.len());
    for game in &tables.game_rows {
        if !game_ids.insert(game.id) {
            return Err(CalculateError::DuplicateGame(game.id));
        }
    }

    let mut seen = HashSet::with_capacity(game_ids.len());
    for row in &tables.player_rows {
        if !game_ids.contains(&row.id) {
            return Err(CalculateError::OrphanPlayerRow(row.id));
        }
        seen.insert(row.id);
    }

    if let Some(game) = tables.game_rows.iter().find(|g| !seen.contains(&g.id)) {
        return Err(CalculateError::GameWithoutPlayers(game.id));
    }

    Ok(())
}

/// Compute the full ordered statistics set from both tables.
pub fn compute_statistics(
    tables: &Tables,
    tie_policy: TiePolicy,
) -> Result<StatsReport, CalculateError> {
    check_integrity(tables)?;

    let rows = &tables.player_rows;
    let games = &tables.game_rows;

    let played = games_played(rows);
    let won = merge_games_won(&games_won(rows, tie_policy), &played, tie_policy);
    let won_per_game = games_won_per_game(&won, &played);

    let statistics = vec![
        named(INCLUDED_PLAYERS, Statistic::List(included_players(rows))),
        named(INCLUDED_PLACES, Statistic::NamedList(included_places(games))),
        named(TOTAL_GAMES, Statistic::Scalar(StatValue::Int(total_games(games)))),
        named(TOTAL_ROUNDS, Statistic::Scalar(StatValue::Int(total_rounds(games)))),
        named(HIGHEST_SCORE, Statistic::Table(highest_score(rows))),
        named(LOWEST_SCORE, Statistic::Table(lowest_score(rows))),
        named(
            AVERAGE_SCORE_PER_ROUND,
            Statistic::Table(average_score_per_round(rows)),
        ),
        named(GAMES_WON, Statistic::Table(won)),
        named(GAMES_PLAYED, Statistic::Table(played)),
        named(ROUNDS_PLAYED, Statistic::Table(rounds_played(rows))),
        named(AVERAGE_PLACEMENT, Statistic::Table(average_placement(rows))),
        named(GAMES_WON_PER_GAME, Statistic::Table(won_per_game)),
    ];

    debug!("Computed {} statistics", statistics.len());
    Ok(StatsReport::new(tie_policy, statistics))
}

/// Tabulate the games and compute their statistics.
pub fn evaluate(
    games: &[GameRecord],
    tie_policy: TiePolicy,
) -> Result<StatsReport, CalculateError> {
    info!(
        "Evaluating {} games (tie policy: {})",
        games.len(),
        tie_policy
    );
    let tables = tabulate::expand(games);
    compute_statistics(&tables, tie_policy)
}

fn named(name: &str, statistic: Statistic) -> NamedStatistic {
    NamedStatistic {
        name: name.to_string(),
        statistic,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{GameRecord, PlayerRow, Scores};
    use crate::tabulate;

    pub fn game(id: u64, scores: &[(&str, i64)], rounds: u32, place: &str) -> GameRecord {
        GameRecord::new(id, scores.iter().copied().collect::<Scores>(), rounds, place)
    }

    pub fn rows(games: &[GameRecord]) -> Vec<PlayerRow> {
        tabulate::expand(games).player_rows
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::game;
    use super::*;
    use crate::models::GameRow;
    use pretty_assertions::assert_eq;

    fn single_game() -> Vec<GameRecord> {
        vec![game(1, &[("A", 10), ("B", -10), ("C", 5), ("D", -5)], 3, "X")]
    }

    fn int(report: &StatsReport, name: &str, player: &str) -> i64 {
        match report.get(name).and_then(|s| s.value_for(player)) {
            Some(StatValue::Int(v)) => v,
            other => panic!("expected int for {} / {}, got {:?}", name, player, other),
        }
    }

    fn float(report: &StatsReport, name: &str, player: &str) -> f64 {
        report
            .get(name)
            .and_then(|s| s.value_for(player))
            .map(|v| v.as_f64())
            .unwrap_or_else(|| panic!("missing {} / {}", name, player))
    }

    #[test]
    fn test_report_order() {
        let report = evaluate(&single_game(), TiePolicy::FirstByRow).unwrap();
        assert_eq!(report.names(), STATISTIC_NAMES.to_vec());
    }

    #[test]
    fn test_single_four_player_game() {
        let report = evaluate(&single_game(), TiePolicy::FirstByRow).unwrap();

        assert_eq!(
            report.get(TOTAL_GAMES),
            Some(&Statistic::Scalar(StatValue::Int(1)))
        );
        assert_eq!(
            report.get(TOTAL_ROUNDS),
            Some(&Statistic::Scalar(StatValue::Int(3)))
        );
        for player in ["A", "B", "C", "D"] {
            assert_eq!(int(&report, GAMES_PLAYED, player), 1);
        }
        assert_eq!(int(&report, GAMES_WON, "A"), 1);
        assert_eq!(int(&report, GAMES_WON, "B"), 0);
        assert_eq!(int(&report, GAMES_WON, "C"), 0);
        assert_eq!(int(&report, GAMES_WON, "D"), 0);

        let placement = report.get(AVERAGE_PLACEMENT).unwrap().as_table().unwrap();
        let order: Vec<(&str, f64)> = placement
            .iter()
            .map(|r| (r.player.as_str(), r.value.as_f64()))
            .collect();
        assert_eq!(order, vec![("A", 1.0), ("C", 2.0), ("D", 3.0), ("B", 4.0)]);
    }

    #[test]
    fn test_five_player_game_rounds() {
        let games = vec![game(
            1,
            &[("A", 20), ("B", -10), ("C", 5), ("D", -5), ("E", -10)],
            10,
            "X",
        )];
        let report = evaluate(&games, TiePolicy::FirstByRow).unwrap();

        for player in ["A", "B", "C", "D", "E"] {
            assert_eq!(int(&report, ROUNDS_PLAYED, player), 8);
        }
        assert_eq!(
            report.get(TOTAL_ROUNDS),
            Some(&Statistic::Scalar(StatValue::Int(10)))
        );
        assert_eq!(float(&report, AVERAGE_SCORE_PER_ROUND, "A"), 2.5);
    }

    #[test]
    fn test_empty_store() {
        let report = evaluate(&[], TiePolicy::FirstByRow).unwrap();

        assert_eq!(report.get(INCLUDED_PLAYERS), Some(&Statistic::List(vec![])));
        assert_eq!(report.get(INCLUDED_PLACES), Some(&Statistic::NamedList(vec![])));
        assert_eq!(
            report.get(TOTAL_GAMES),
            Some(&Statistic::Scalar(StatValue::Int(0)))
        );
        assert_eq!(
            report.get(TOTAL_ROUNDS),
            Some(&Statistic::Scalar(StatValue::Int(0)))
        );
        assert_eq!(report.get(GAMES_WON), Some(&Statistic::Table(vec![])));
        assert_eq!(report.get(GAMES_WON_PER_GAME), Some(&Statistic::Table(vec![])));
    }

    #[test]
    fn test_games_won_never_exceeds_games_played() {
        let games = vec![
            game(1, &[("A", 10), ("B", -10), ("C", 5), ("D", -5)], 3, "X"),
            game(2, &[("A", 4), ("B", 4), ("C", -4), ("D", -4)], 3, "X"),
            game(3, &[("B", 9), ("C", -3), ("D", -3), ("E", -3)], 2, "Y"),
        ];

        for policy in [
            TiePolicy::FirstByRow,
            TiePolicy::SplitCredit,
            TiePolicy::Exclude,
        ] {
            let report = evaluate(&games, policy).unwrap();
            for player in ["A", "B", "C", "D", "E"] {
                let won = float(&report, GAMES_WON, player);
                let played = float(&report, GAMES_PLAYED, player);
                assert!(won <= played, "{} under {}", player, policy);
            }
        }
    }

    #[test]
    fn test_orphan_player_row_is_fatal() {
        let mut tables = tabulate::expand(&single_game());
        tables.game_rows.clear();
        tables.game_rows.push(GameRow {
            id: 2,
            rounds: 1,
            place: "X".to_string(),
        });

        assert_eq!(
            compute_statistics(&tables, TiePolicy::FirstByRow).unwrap_err(),
            CalculateError::OrphanPlayerRow(1)
        );
    }

    #[test]
    fn test_game_without_players_is_fatal() {
        let mut tables = tabulate::expand(&single_game());
        tables.game_rows.push(GameRow {
            id: 9,
            rounds: 1,
            place: "X".to_string(),
        });

        assert_eq!(
            check_integrity(&tables),
            Err(CalculateError::GameWithoutPlayers(9))
        );
    }

    #[test]
    fn test_duplicate_game_is_fatal() {
        let games = vec![single_game().remove(0), single_game().remove(0)];
        assert_eq!(
            evaluate(&games, TiePolicy::FirstByRow).unwrap_err(),
            CalculateError::DuplicateGame(1)
        );
    }

    #[test]
    fn test_sort_rows_ties_by_name() {
        let mut rows = vec![
            TableRow::new("C", 1i64),
            TableRow::new("A", 1i64),
            TableRow::new("B", 2i64),
        ];
        sort_rows(&mut rows, SortOrder::Descending);
        let names: Vec<&str> = rows.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);

        sort_rows(&mut rows, SortOrder::Ascending);
        let names: Vec<&str> = rows.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.0 / 3.0, 3), 0.333);
        assert_eq!(round_to(2.0 / 3.0, 3), 0.667);
        assert_eq!(round_to(-0.12345, 3), -0.123);
        assert_eq!(round_to(5.0, 3), 5.0);
    }

    #[test]
    fn test_round_to_halves_go_to_even() {
        assert_eq!(round_to(0.0625, 3), 0.062);
        assert_eq!(round_to(0.3125, 3), 0.312);
        assert_eq!(round_to(-0.0625, 3), -0.062);
        assert_eq!(round_to(0.1875, 3), 0.188);
        assert_eq!(round_to(2.5, 0), 2.0);
    }

    #[test]
    fn test_rows_by_game_keeps_row_order() {
        let rows = test_support::rows(&[
            game(2, &[("Z", 1), ("A", -1), ("M", 0), ("B", 0)], 1, "X"),
            game(1, &[("Q", 1), ("R", -1), ("S", 0), ("T", 0)], 1, "X"),
        ]);
        let grouped = rows_by_game(&rows);

        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        let players: Vec<&str> = grouped[&2].iter().map(|r| r.player.as_str()).collect();
        assert_eq!(players, vec!["Z", "A", "M", "B"]);
    }
}
