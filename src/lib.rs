//! Elo History - season-aware Elo ratings for team game results
//!
//! This crate folds chronologically ordered game results into a per-team
//! rating history with win/loss tallies and season-boundary regression,
//! and exposes the data needed to chart ratings over time.

pub mod config;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod rating;
pub mod report;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, TrackerError};
pub use types::*;

// Re-export key components
pub use config::RatingConfig;
pub use rating::{EloTracker, WinProbability};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
