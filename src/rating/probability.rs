//! Win probability models
//!
//! The tracker asks a `WinProbability` implementation for the chance that the
//! home side wins. The default is the classical logistic Elo curve computed
//! through the skillratings crate; any `Fn(f64, f64, &GameRecord) -> f64`
//! closure can be plugged in as well.

use crate::types::GameRecord;
use skillratings::elo::{expected_score, EloRating};

/// Capability for estimating the home team's win probability
#[cfg_attr(test, mockall::automock)]
pub trait WinProbability: Send + Sync {
    /// Probability in `[0, 1]` that the home team wins
    ///
    /// # Arguments
    /// * `home_rating` - Current rating of the home team
    /// * `away_rating` - Current rating of the away team
    /// * `game` - The game being rated, for models that use extra context
    fn home_win_probability(&self, home_rating: f64, away_rating: f64, game: &GameRecord) -> f64;
}

impl<F> WinProbability for F
where
    F: Fn(f64, f64, &GameRecord) -> f64 + Send + Sync,
{
    fn home_win_probability(&self, home_rating: f64, away_rating: f64, game: &GameRecord) -> f64 {
        self(home_rating, away_rating, game)
    }
}

/// `1 / (1 + 10^((Ra - Rh) / 400))`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticElo;

impl LogisticElo {
    /// Probability that a side rated `rating` beats a side rated `opponent`
    pub fn expected(rating: f64, opponent: f64) -> f64 {
        let (expected_one, _expected_two) =
            expected_score(&EloRating { rating }, &EloRating { rating: opponent });
        expected_one
    }
}

impl WinProbability for LogisticElo {
    fn home_win_probability(&self, home_rating: f64, away_rating: f64, _game: &GameRecord) -> f64 {
        Self::expected(home_rating, away_rating)
    }
}

/// Logistic Elo with a fixed bonus added to the home side's rating
#[derive(Debug, Clone, Copy)]
pub struct HomeAdvantageElo {
    pub points: f64,
}

impl HomeAdvantageElo {
    pub fn new(points: f64) -> Self {
        Self { points }
    }
}

impl Default for HomeAdvantageElo {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl WinProbability for HomeAdvantageElo {
    fn home_win_probability(&self, home_rating: f64, away_rating: f64, _game: &GameRecord) -> f64 {
        LogisticElo::expected(home_rating + self.points, away_rating)
    }
}
