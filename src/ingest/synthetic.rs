//! Synthetic schedule generation for demo runs and benchmarks

use crate::types::{GameId, GameRow};
use rand::Rng;

/// Placeholder team names: `Team1`, `Team2`, …
pub fn placeholder_teams(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Team{}", i)).collect()
}

/// All-pairs home-and-away round robin with random final scores in `10..=40`
pub fn synthetic_schedule(teams: &[String], rng: &mut impl Rng) -> Vec<GameRow> {
    let mut games = Vec::new();
    let mut game_id: GameId = 1;

    for (i, home) in teams.iter().enumerate() {
        for (j, away) in teams.iter().enumerate() {
            if i == j {
                continue;
            }
            games.push(GameRow {
                game_id,
                home_team: home.clone(),
                away_team: away.clone(),
                home_score: rng.random_range(10..=40),
                away_score: rng.random_range(10..=40),
                played_on: None,
            });
            game_id += 1;
        }
    }

    games
}
