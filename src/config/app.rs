//! Main application configuration
//!
//! This module defines the configuration of the `elo-history` binary,
//! including environment variable loading, TOML files and validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
}

/// Process-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name shown in the startup banner
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "elo-history".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        if let Ok(initial) = env::var("ELO_INITIAL_RATING") {
            self.rating.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_INITIAL_RATING value: {}", initial))?;
        }
        if let Ok(k) = env::var("ELO_K_FACTOR") {
            self.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_K_FACTOR value: {}", k))?;
        }
        if let Ok(mode) = env::var("ELO_ARITHMETIC") {
            self.rating.arithmetic = mode.parse()?;
        }
        if let Ok(openers) = env::var("ELO_SEASON_OPENERS") {
            self.rating.emit_season_openers = openers
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_SEASON_OPENERS value: {}", openers))?;
        }
        if let Ok(strict) = env::var("ELO_STRICT_ORDERING") {
            self.rating.strict_ordering = strict
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_STRICT_ORDERING value: {}", strict))?;
        }
        if let Ok(regression) = env::var("ELO_SEASON_REGRESSION") {
            self.rating.season_regression = regression
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_SEASON_REGRESSION value: {}", regression))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.rating.validate()
}
