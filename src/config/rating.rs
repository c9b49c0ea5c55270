//! Rating tracker configuration

use crate::error::TrackerError;
use serde::{Deserialize, Serialize};

/// How rating deltas are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticMode {
    /// Deltas are kept as floating point values
    #[default]
    Continuous,
    /// Deltas are truncated toward zero to whole rating points
    Truncated,
}

impl ArithmeticMode {
    /// Shape a raw delta according to the mode
    pub fn apply(self, delta: f64) -> f64 {
        match self {
            ArithmeticMode::Continuous => delta,
            ArithmeticMode::Truncated => delta.trunc(),
        }
    }
}

impl std::fmt::Display for ArithmeticMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithmeticMode::Continuous => write!(f, "continuous"),
            ArithmeticMode::Truncated => write!(f, "truncated"),
        }
    }
}

impl std::str::FromStr for ArithmeticMode {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "continuous" => Ok(ArithmeticMode::Continuous),
            "truncated" | "integer" => Ok(ArithmeticMode::Truncated),
            other => Err(TrackerError::ConfigurationError {
                message: format!("Unknown arithmetic mode: {}", other),
            }),
        }
    }
}

/// Parameters of a single tracker instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating every team starts from, and the baseline seasons regress toward
    pub initial_rating: f64,
    /// Sensitivity of a single game result
    pub k_factor: f64,
    pub arithmetic: ArithmeticMode,
    /// Append an explicit season-opener entry before a team's first game of a season
    pub emit_season_openers: bool,
    /// Reject games that move a team backwards in time or season
    pub strict_ordering: bool,
    /// Share of the distance to `initial_rating` recovered at a season rollover
    pub season_regression: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_rating: 1500.0,
            k_factor: 25.0,
            arithmetic: ArithmeticMode::Continuous,
            emit_season_openers: true,
            strict_ordering: true,
            season_regression: 1.0 / 3.0,
        }
    }
}

impl RatingConfig {
    /// Configuration with a custom baseline and K factor, other settings default
    pub fn new(initial_rating: f64, k_factor: f64) -> Self {
        Self {
            initial_rating,
            k_factor,
            ..Self::default()
        }
    }

    /// Whole-point deltas and no materialized openers
    pub fn compact() -> Self {
        Self {
            arithmetic: ArithmeticMode::Truncated,
            emit_season_openers: false,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.initial_rating.is_finite() {
            return Err(TrackerError::ConfigurationError {
                message: "Initial rating must be a finite number".to_string(),
            }
            .into());
        }

        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(TrackerError::ConfigurationError {
                message: "K factor must be positive".to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.season_regression) {
            return Err(TrackerError::ConfigurationError {
                message: "Season regression must be within [0, 1]".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
