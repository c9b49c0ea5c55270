//! Error types for the rating tracker
//!
//! Fallible operations return the anyhow-based `Result` alias; the concrete
//! failure is a `TrackerError` that callers can recover with `downcast_ref`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Unknown team: {team}")]
    UnknownTeam { team: String },

    #[error("Invalid game: {reason}")]
    InvalidGame { reason: String },

    #[error("Out-of-order input for team {team}: {reason}")]
    OutOfOrderInput { team: String, reason: String },

    #[error("Win probability must be within [0, 1], got {probability}")]
    InvalidProbability { probability: f64 },

    #[error("Failed to load games from {path}: {message}")]
    LoadFailed { path: String, message: String },
}
