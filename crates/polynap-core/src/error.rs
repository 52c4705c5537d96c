//! Core error types for polynap-core.
//!
//! The recommender itself never fails: unknown answers fall back to defaults
//! and an empty catalog yields `None`. Errors only arise at the edges, when a
//! catalog, answer file, or configuration file is loaded from outside.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for polynap-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Schedule catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Answer file could not be read as a question/answer mapping
    #[error("Invalid answers: {0}")]
    Answers(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Schedule catalog validation and loading errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Template without an id
    #[error("Schedule template at position {index} has an empty id")]
    EmptyId { index: usize },

    /// Two templates share an id
    #[error("Duplicate schedule id: {0}")]
    DuplicateId(String),

    /// Template without sleep blocks
    #[error("Schedule '{0}' has no sleep blocks")]
    NoBlocks(String),

    /// Block start is not a 24h HH:MM time
    #[error("Schedule '{schedule}' block {block}: invalid start time '{value}' (expected HH:MM)")]
    InvalidStartTime {
        schedule: String,
        block: usize,
        value: String,
    },

    /// Block with zero length
    #[error("Schedule '{schedule}' block {block}: duration must be greater than zero")]
    ZeroDuration { schedule: String, block: usize },

    /// Block longer than a day wraps onto itself
    #[error("Schedule '{schedule}' block {block}: {minutes} minutes is longer than a day")]
    DurationTooLong {
        schedule: String,
        block: usize,
        minutes: u32,
    },

    /// Two blocks of the same template overlap on the 24h clock
    #[error("Schedule '{schedule}': blocks {first} and {second} overlap")]
    OverlappingBlocks {
        schedule: String,
        first: usize,
        second: usize,
    },

    /// Catalog file could not be parsed
    #[error("Failed to parse catalog: {0}")]
    ParseFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
