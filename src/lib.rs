//! Gridiron Elo - team rating engine over a graph of game results
//!
//! This crate ingests head-to-head game results into a graph of team nodes
//! and played edges, replays them through an Elo rating model, and answers
//! favorite queries for upcoming fixtures.

pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use graph::{GraphStore, InMemoryGraphStore};
pub use rating::{EloModel, PredictionService, RatingProcessor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
