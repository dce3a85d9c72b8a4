//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

use crate::types::GameId;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating-engine scenarios
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Team not found: {name}")]
    TeamNotFound { name: String },

    #[error("Game {game_id} references unregistered team: {name}")]
    UnregisteredTeam { game_id: GameId, name: String },

    #[error("Invalid score in record {record}: {reason}")]
    InvalidScore { record: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal storage error: {message}")]
    InternalError { message: String },
}
