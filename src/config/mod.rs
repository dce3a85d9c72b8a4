//! Configuration management for the rating engine
//!
//! This module handles all configuration loading from environment variables
//! and TOML files, validation, and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, IngestSettings, ServiceSettings};
pub use rating::RatingSettings;
