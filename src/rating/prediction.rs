//! Favorite queries over settled ratings

use crate::error::Result;
use crate::graph::GraphStore;
use crate::rating::elo::EloModel;
use crate::types::{Prediction, Side, TeamRating};
use std::sync::Arc;
use tracing::debug;

/// Answers win-probability queries from the store's current ratings
///
/// Predictions are only meaningful after a completed processor run; this
/// service never mutates the store.
pub struct PredictionService {
    store: Arc<dyn GraphStore>,
    model: EloModel,
}

impl PredictionService {
    pub fn new(store: Arc<dyn GraphStore>, model: EloModel) -> Self {
        Self { store, model }
    }

    /// Favored side for an upcoming fixture.
    ///
    /// The home side is favored only when its win probability strictly
    /// exceeds 0.5; an exact coin flip counts for the away side. Unknown
    /// teams are an error, never defaulted.
    pub fn predict_favorite(&self, home_team: &str, away_team: &str) -> Result<Prediction> {
        let home_rating = self.store.get_rating(home_team)?;
        let away_rating = self.store.get_rating(away_team)?;

        let expected_home = self.model.expected_score(
            TeamRating {
                rating: home_rating,
            },
            TeamRating {
                rating: away_rating,
            },
        );

        debug!(
            home = %home_team,
            away = %away_team,
            home_rating,
            away_rating,
            expected_home,
            "favorite query"
        );

        let prediction = if expected_home > 0.5 {
            Prediction {
                winner: home_team.to_string(),
                side: Side::Home,
                probability: expected_home,
            }
        } else {
            Prediction {
                winner: away_team.to_string(),
                side: Side::Away,
                probability: 1.0 - expected_home,
            }
        };

        Ok(prediction)
    }
}
