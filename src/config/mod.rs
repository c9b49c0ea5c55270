//! Configuration management for the rating tracker
//!
//! This module handles tracker parameters, configuration loading from
//! environment variables and TOML files, validation and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use rating::{ArithmeticMode, RatingConfig};
