//! Elo rating update step
//!
//! `EloCalculator` turns a pair of ratings and a game outcome into the pair of
//! updated ratings, and applies the season-boundary regression. Both honour
//! the configured `ArithmeticMode`.

use crate::config::{ArithmeticMode, RatingConfig};
use crate::error::TrackerError;
use crate::rating::probability::{LogisticElo, WinProbability};
use crate::types::GameRecord;
use serde::{Deserialize, Serialize};

/// Outcome of rating one game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    /// Probability the home side was given before the game
    pub home_win_probability: f64,
    pub home_before: f64,
    pub home_after: f64,
    pub away_before: f64,
    pub away_after: f64,
}

impl RatingUpdate {
    pub fn home_delta(&self) -> f64 {
        self.home_after - self.home_before
    }

    pub fn away_delta(&self) -> f64 {
        self.away_after - self.away_before
    }
}

/// Elo rating calculator
pub struct EloCalculator {
    k_factor: f64,
    arithmetic: ArithmeticMode,
    probability: Box<dyn WinProbability>,
}

impl std::fmt::Debug for EloCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EloCalculator")
            .field("k_factor", &self.k_factor)
            .field("arithmetic", &self.arithmetic)
            .finish_non_exhaustive()
    }
}

impl EloCalculator {
    /// Create a calculator using the logistic Elo curve
    pub fn new(config: &RatingConfig) -> crate::error::Result<Self> {
        Self::with_win_probability(config, LogisticElo)
    }

    /// Create a calculator with a custom win probability model
    pub fn with_win_probability(
        config: &RatingConfig,
        probability: impl WinProbability + 'static,
    ) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self {
            k_factor: config.k_factor,
            arithmetic: config.arithmetic,
            probability: Box::new(probability),
        })
    }

    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }

    pub fn arithmetic(&self) -> ArithmeticMode {
        self.arithmetic
    }

    /// Ask the model for the home side's chance, rejecting anything outside `[0, 1]`
    pub fn home_win_probability(
        &self,
        home_rating: f64,
        away_rating: f64,
        game: &GameRecord,
    ) -> crate::error::Result<f64> {
        let probability = self
            .probability
            .home_win_probability(home_rating, away_rating, game);

        if !(0.0..=1.0).contains(&probability) {
            return Err(TrackerError::InvalidProbability { probability }.into());
        }

        Ok(probability)
    }

    /// Apply one game to the two starting ratings
    pub fn calculate(
        &self,
        home_rating: f64,
        away_rating: f64,
        game: &GameRecord,
    ) -> crate::error::Result<RatingUpdate> {
        let home_win_probability = self.home_win_probability(home_rating, away_rating, game)?;

        // The away side moves by exactly the opposite amount, truncated or not
        let home_delta = self
            .arithmetic
            .apply(self.k_factor * (game.home_score() - home_win_probability));
        let away_delta = -home_delta;

        Ok(RatingUpdate {
            home_win_probability,
            home_before: home_rating,
            home_after: home_rating + home_delta,
            away_before: away_rating,
            away_after: away_rating + away_delta,
        })
    }

    /// Pull `previous` part of the way back toward `baseline`
    pub fn regress(&self, previous: f64, baseline: f64, fraction: f64) -> f64 {
        previous + self.arithmetic.apply((baseline - previous) * fraction)
    }
}
