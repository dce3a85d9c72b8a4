//! Elo rating model
//!
//! This module provides the pairwise win-probability and rating-update math,
//! backed by the Elo implementation from the skillratings crate.

use crate::error::{RatingError, Result};
use crate::types::TeamRating;
use serde::{Deserialize, Serialize};
use skillratings::elo::{elo, expected_score, EloConfig};
use skillratings::Outcomes;
use std::cmp::Ordering;

/// Extended configuration for the Elo rating system
/// This wraps the skillratings EloConfig with the replay baseline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedEloConfig {
    /// Core Elo parameters (k-factor)
    pub elo_config: EloConfig,
    /// Rating every team starts a replay from
    pub baseline_rating: f64,
}

impl Default for ExtendedEloConfig {
    fn default() -> Self {
        Self {
            // NFL-style seasons run short, so k stays below the chess-default 32
            elo_config: EloConfig { k: 20.0 },
            baseline_rating: 1500.0,
        }
    }
}

impl From<&crate::config::RatingSettings> for ExtendedEloConfig {
    fn from(settings: &crate::config::RatingSettings) -> Self {
        Self {
            elo_config: EloConfig {
                k: settings.k_factor,
            },
            baseline_rating: settings.baseline_rating,
        }
    }
}

impl ExtendedEloConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.elo_config.k.is_finite() || self.elo_config.k <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if !self.baseline_rating.is_finite() {
            return Err(RatingError::ConfigurationError {
                message: "Baseline rating must be finite".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Elo rating model
#[derive(Debug, Clone)]
pub struct EloModel {
    config: ExtendedEloConfig,
}

impl EloModel {
    /// Create a new Elo model
    pub fn new(config: ExtendedEloConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Current configuration
    pub fn config(&self) -> &ExtendedEloConfig {
        &self.config
    }

    /// Configured k-factor
    pub fn k_factor(&self) -> f64 {
        self.config.elo_config.k
    }

    /// Rating assigned to teams at the start of a replay
    pub fn baseline_rating(&self) -> TeamRating {
        TeamRating {
            rating: self.config.baseline_rating,
        }
    }

    /// Win probability of `a` against `b`
    ///
    /// `expected_score(a, b) + expected_score(b, a) == 1.0` for all finite
    /// ratings, and equal ratings give exactly 0.5.
    pub fn expected_score(&self, a: TeamRating, b: TeamRating) -> f64 {
        let (expected_a, _expected_b) = expected_score(&a.into(), &b.into());
        expected_a
    }

    /// Move a rating toward the observed outcome: `rating + k * (actual - expected)`
    ///
    /// `actual` is 1.0 for a win, 0.5 for a tie and 0.0 for a loss.
    pub fn update_rating(&self, rating: f64, expected: f64, actual: f64) -> f64 {
        rating + self.config.elo_config.k * (actual - expected)
    }

    /// Actual score of the home side derived from the final points
    pub fn actual_score(home_score: u32, away_score: u32) -> f64 {
        match home_score.cmp(&away_score) {
            Ordering::Greater => 1.0,
            Ordering::Less => 0.0,
            Ordering::Equal => 0.5,
        }
    }

    /// Game-level rating update for both sides, delegated to skillratings.
    ///
    /// Numerically identical to calling [`Self::update_rating`] per side with
    /// that side's own expected score.
    pub fn rate_game(
        &self,
        home: TeamRating,
        away: TeamRating,
        home_score: u32,
        away_score: u32,
    ) -> (TeamRating, TeamRating) {
        let outcome = match home_score.cmp(&away_score) {
            Ordering::Greater => Outcomes::WIN,
            Ordering::Less => Outcomes::LOSS,
            Ordering::Equal => Outcomes::DRAW,
        };

        let (new_home, new_away) = elo(
            &home.into(),
            &away.into(),
            &outcome,
            &self.config.elo_config,
        );

        (new_home.into(), new_away.into())
    }
}
