//! CSV results loader
//!
//! Reads the flat results table produced by the data-preparation collaborator:
//! one row per game with `game_id,home_team,away_team,home_score,away_score`
//! and an optional `played_on` date column.

use crate::error::{RatingError, Result};
use crate::types::{GameId, GameRow};
use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Raw CSV row. Scores stay strings so malformed input is rejected here, at
/// the boundary, instead of surfacing mid-replay.
#[derive(Debug, Deserialize)]
struct RawResultRow {
    game_id: GameId,
    home_team: String,
    away_team: String,
    home_score: String,
    away_score: String,
    #[serde(default)]
    played_on: Option<NaiveDate>,
}

fn parse_score(raw: &str, field: &str, game_id: GameId) -> Result<u32> {
    raw.trim().parse::<u32>().map_err(|_| {
        RatingError::InvalidScore {
            record: format!("game {}", game_id),
            reason: format!("{} is not a non-negative integer: {:?}", field, raw),
        }
        .into()
    })
}

/// Load and validate every result row from a CSV file
pub fn read_results_csv(path: &Path) -> Result<Vec<GameRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open results file: {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let raw: RawResultRow = record.context("Malformed results row")?;

        rows.push(GameRow {
            home_score: parse_score(&raw.home_score, "home_score", raw.game_id)?,
            away_score: parse_score(&raw.away_score, "away_score", raw.game_id)?,
            game_id: raw.game_id,
            home_team: raw.home_team,
            away_team: raw.away_team,
            played_on: raw.played_on,
        });
    }

    info!(rows = rows.len(), path = %path.display(), "loaded results file");
    Ok(rows)
}
