//! Test fixtures for integration testing

use gridiron_elo::config::RatingSettings;
use gridiron_elo::graph::InMemoryGraphStore;
use gridiron_elo::rating::{EloModel, ExtendedEloConfig, PredictionService, RatingProcessor};
use gridiron_elo::types::GameRow;
use std::sync::Arc;

/// A complete engine wired over a fresh in-memory store
pub struct TestEngine {
    pub store: Arc<InMemoryGraphStore>,
    pub processor: RatingProcessor,
    pub predictions: PredictionService,
}

/// Build an engine with the default k-factor of 20 and a 1500 baseline
pub fn create_test_engine() -> TestEngine {
    create_test_engine_with_k(20.0)
}

pub fn create_test_engine_with_k(k_factor: f64) -> TestEngine {
    let settings = RatingSettings {
        k_factor,
        baseline_rating: 1500.0,
    };
    let store = Arc::new(InMemoryGraphStore::new(settings.baseline_rating));
    let model = EloModel::new(ExtendedEloConfig::from(&settings)).unwrap();

    TestEngine {
        store: store.clone(),
        processor: RatingProcessor::new(store.clone(), model.clone()),
        predictions: PredictionService::new(store, model),
    }
}

/// Shorthand for a result row without a date
pub fn game_row(game_id: u64, home: &str, away: &str, home_score: u32, away_score: u32) -> GameRow {
    GameRow {
        game_id,
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_score,
        away_score,
        played_on: None,
    }
}
