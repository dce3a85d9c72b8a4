//! Main application configuration
//!
//! This module defines the primary configuration structures for the rating
//! engine, including environment variable loading and validation.

use crate::config::rating::RatingSettings;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub ingest: IngestSettings,
    pub rating: RatingSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Results input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// CSV results file; when unset a synthetic schedule is generated
    pub results_path: Option<PathBuf>,
    /// Number of teams in the synthetic schedule
    pub synthetic_teams: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "gridiron-elo".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            results_path: None,
            synthetic_teams: 5,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Ingest settings
        if let Ok(path) = env::var("RESULTS_PATH") {
            config.ingest.results_path = Some(PathBuf::from(path));
        }
        if let Ok(teams) = env::var("SYNTHETIC_TEAMS") {
            config.ingest.synthetic_teams = teams
                .parse()
                .map_err(|_| anyhow!("Invalid SYNTHETIC_TEAMS value: {}", teams))?;
        }

        // Rating settings
        if let Ok(k) = env::var("ELO_K_FACTOR") {
            config.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_K_FACTOR value: {}", k))?;
        }
        if let Ok(baseline) = env::var("ELO_BASELINE_RATING") {
            config.rating.baseline_rating = baseline
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_BASELINE_RATING value: {}", baseline))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate ingest settings
    if config.ingest.results_path.is_none() && config.ingest.synthetic_teams < 2 {
        return Err(anyhow!("Synthetic schedule needs at least 2 teams"));
    }

    // Validate rating settings
    if !config.rating.k_factor.is_finite() || config.rating.k_factor <= 0.0 {
        return Err(anyhow!("K-factor must be positive"));
    }
    if !config.rating.baseline_rating.is_finite() {
        return Err(anyhow!("Baseline rating must be finite"));
    }

    Ok(())
}
