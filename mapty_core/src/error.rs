//! Error types for the mapty_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for mapty_core operations
///
/// Only infrastructure failures live here. Rejected form input, a missing
/// map location or an unknown workout id are ordinary outcomes of the
/// controller and never surface as an `Error`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Current position could not be determined
    #[error("Geolocation error: {0}")]
    Geolocation(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
