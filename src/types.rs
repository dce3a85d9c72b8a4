//! Common types used throughout the rating engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use skillratings::elo::EloRating;

/// Unique identifier for teams
pub type TeamName = String;

/// Unique identifier for games
pub type GameId = u64;

/// Side of a fixture a team occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "Home"),
            Side::Away => write!(f, "Away"),
        }
    }
}

/// Rating information for a team
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamRating {
    pub rating: f64,
}

impl Default for TeamRating {
    fn default() -> Self {
        Self { rating: 1500.0 }
    }
}

impl From<EloRating> for TeamRating {
    fn from(rating: EloRating) -> Self {
        Self {
            rating: rating.rating,
        }
    }
}

impl From<TeamRating> for EloRating {
    fn from(rating: TeamRating) -> Self {
        Self {
            rating: rating.rating,
        }
    }
}

/// One ingested game result row from the results collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRow {
    pub game_id: GameId,
    pub home_team: TeamName,
    pub away_team: TeamName,
    pub home_score: u32,
    pub away_score: u32,
    /// Calendar date of the game, when the source provides one
    pub played_on: Option<NaiveDate>,
}

/// A fully recorded game reconstructed from its matched pair of played edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedResult {
    pub game_id: GameId,
    pub home_team: TeamName,
    pub home_score: u32,
    pub away_team: TeamName,
    pub away_score: u32,
}

/// Outcome of a favorite query for an upcoming fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub winner: TeamName,
    pub side: Side,
    /// Win probability of the favored side
    pub probability: f64,
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Predicted winner: {} ({})", self.winner, self.side)
    }
}
