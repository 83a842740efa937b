//! Expansion of recorded games into player and game tables.
//!
//! Every game yields one [`GameRow`] and one [`PlayerRow`] per participant.
//! Five-player games are scaled to 80% of their rounds for the player rows,
//! truncated, since each player sits out one round in five.

use crate::models::{GameRecord, GameRow, PlayerRow, Tables};

/// Player count at which the round correction applies.
pub const SCALED_PLAYER_COUNT: usize = 5;

/// Round multiplier for five-player games.
pub const FIVE_PLAYER_ROUND_MULTIPLIER: f64 = 0.8;

/// Effective rounds a player is credited with in a game of `player_count`.
pub fn effective_rounds(rounds: u32, player_count: usize) -> u32 {
    if player_count == SCALED_PLAYER_COUNT {
        (rounds as f64 * FIVE_PLAYER_ROUND_MULTIPLIER) as u32
    } else {
        rounds
    }
}

/// Expand games into the player-round table and the game table.
pub fn expand(games: &[GameRecord]) -> Tables {
    let player_count: usize = games.iter().map(GameRecord::player_count).sum();
    let mut tables = Tables {
        player_rows: Vec::with_capacity(player_count),
        game_rows: Vec::with_capacity(games.len()),
    };

    for game in games {
        tables.game_rows.push(GameRow {
            id: game.id,
            rounds: game.rounds,
            place: game.place.clone(),
        });

        let rounds = effective_rounds(game.rounds, game.player_count());
        for (player, score) in game.scores.iter() {
            tables.player_rows.push(PlayerRow {
                id: game.id,
                player: player.to_string(),
                score,
                rounds,
                place: game.place.clone(),
            });
        }
    }

    tracing::debug!(
        "Expanded {} games into {} player rows",
        tables.game_rows.len(),
        tables.player_rows.len()
    );
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scores;
    use pretty_assertions::assert_eq;

    fn game(id: u64, scores: &[(&str, i64)], rounds: u32, place: &str) -> GameRecord {
        GameRecord::new(id, scores.iter().copied().collect::<Scores>(), rounds, place)
    }

    #[test]
    fn test_effective_rounds() {
        assert_eq!(effective_rounds(10, 4), 10);
        assert_eq!(effective_rounds(10, 5), 8);
        assert_eq!(effective_rounds(10, 6), 10);
        // Truncated, not rounded
        assert_eq!(effective_rounds(9, 5), 7);
        assert_eq!(effective_rounds(1, 5), 0);
    }

    #[test]
    fn test_expand_four_players() {
        let games = vec![game(
            1,
            &[("A", 10), ("B", -10), ("C", 5), ("D", -5)],
            3,
            "X",
        )];

        let tables = expand(&games);

        assert_eq!(
            tables.game_rows,
            vec![GameRow {
                id: 1,
                rounds: 3,
                place: "X".to_string()
            }]
        );
        assert_eq!(tables.player_rows.len(), 4);
        assert_eq!(
            tables.player_rows[1],
            PlayerRow {
                id: 1,
                player: "B".to_string(),
                score: -10,
                rounds: 3,
                place: "X".to_string(),
            }
        );
    }

    #[test]
    fn test_expand_five_players_scales_rounds() {
        let games = vec![game(
            1,
            &[("A", 20), ("B", -10), ("C", 5), ("D", -5), ("E", -10)],
            10,
            "X",
        )];

        let tables = expand(&games);

        assert_eq!(tables.game_rows[0].rounds, 10);
        assert!(tables.player_rows.iter().all(|row| row.rounds == 8));
    }

    #[test]
    fn test_expand_preserves_zero_sum_per_game() {
        let games = vec![
            game(1, &[("A", 3), ("B", -1), ("C", -1), ("D", -1)], 5, "X"),
            game(2, &[("A", -4), ("B", 2), ("C", 2), ("E", 0), ("F", 0)], 5, "Y"),
        ];

        let tables = expand(&games);

        for id in [1, 2] {
            let sum: i64 = tables
                .player_rows
                .iter()
                .filter(|row| row.id == id)
                .map(|row| row.score)
                .sum();
            assert_eq!(sum, 0);
        }
    }

    #[test]
    fn test_expand_row_count_matches_player_count() {
        let games = vec![
            game(1, &[("A", 3), ("B", -1), ("C", -1), ("D", -1)], 5, "X"),
            game(
                2,
                &[("A", 5), ("B", -1), ("C", -1), ("D", -1), ("E", -1), ("F", -1)],
                4,
                "X",
            ),
        ];

        let tables = expand(&games);

        assert_eq!(tables.player_rows.iter().filter(|r| r.id == 1).count(), 4);
        assert_eq!(tables.player_rows.iter().filter(|r| r.id == 2).count(), 6);
        // Six players: no correction
        assert!(tables
            .player_rows
            .iter()
            .filter(|r| r.id == 2)
            .all(|r| r.rounds == 4));
    }

    #[test]
    fn test_expand_keeps_score_order() {
        let games = vec![game(1, &[("Zoe", 1), ("Adam", -1), ("Max", 0), ("Eva", 0)], 1, "X")];
        let tables = expand(&games);
        let players: Vec<&str> = tables.player_rows.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(players, vec!["Zoe", "Adam", "Max", "Eva"]);
    }

    #[test]
    fn test_expand_empty() {
        let tables = expand(&[]);
        assert!(tables.is_empty());
    }
}
