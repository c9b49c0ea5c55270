//! Elo rating engine
//!
//! This module provides the win probability models, the rating update step,
//! per-team history storage and the season-aware tracker tying them together.

pub mod calculator;
pub mod history;
pub mod probability;
pub mod tracker;

// Re-export commonly used types
pub use calculator::{EloCalculator, RatingUpdate};
pub use history::TeamHistories;
pub use probability::{HomeAdvantageElo, LogisticElo, WinProbability};
pub use tracker::EloTracker;
