//! Rating system configuration

use serde::{Deserialize, Serialize};

/// Elo replay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// K-factor: rating sensitivity per game
    pub k_factor: f64,
    /// Rating every team starts a replay from
    pub baseline_rating: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: 20.0,
            baseline_rating: 1500.0,
        }
    }
}
