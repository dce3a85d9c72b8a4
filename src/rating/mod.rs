//! Elo rating engine
//!
//! This module provides the pairwise Elo model, the replay processor that
//! settles ratings through the graph store, and the favorite-query service.

pub mod elo;
pub mod prediction;
pub mod processor;

// Re-export commonly used types
pub use elo::{EloModel, ExtendedEloConfig};
pub use prediction::PredictionService;
pub use processor::{RatingProcessor, ReplaySummary};
