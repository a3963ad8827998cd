//! Domain error types
//!
//! This module defines the error hierarchy for rvanon.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main rvanon error type
///
/// This is the primary error type used by the library layers (domain,
/// adapters, configuration). The anonymization engine and the CLI wrap it
/// with `anyhow` context where a richer message helps the operator.
#[derive(Debug, Error)]
pub enum RvanonError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed or inconsistent tabular data
    #[error("Table error: {0}")]
    Table(String),

    /// Missing or unreadable mapping document
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for RvanonError {
    fn from(err: std::io::Error) -> Self {
        RvanonError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RvanonError {
    fn from(err: serde_json::Error) -> Self {
        RvanonError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RvanonError {
    fn from(err: toml::de::Error) -> Self {
        RvanonError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv reader/writer errors
impl From<csv::Error> for RvanonError {
    fn from(err: csv::Error) -> Self {
        RvanonError::Table(format!("CSV error: {err}"))
    }
}
