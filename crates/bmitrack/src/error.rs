//! Error types for bmitrack.
//!
//! There are two kinds of failure in this crate: validation failures
//! (bad user input, never touches the store) and storage failures (the
//! database could not be opened, written, or read). Both live in the one
//! [`Error`] enum; [`Error::is_validation`] tells them apart.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for bmitrack operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database statement failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Validation errors ===
    /// A required input field was missing or empty.
    #[error("{field} is required")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// An input field did not parse as a number.
    #[error("{field} is not a number: {value:?}")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },

    /// An input value was zero or negative.
    #[error("{field} must be greater than zero, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// An input value exceeded the configured plausibility limit.
    #[error("{field} of {value} exceeds the limit of {max}")]
    LimitExceeded {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// The configured upper bound.
        max: f64,
    },

    // === Configuration errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for bmitrack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Whether this error is a user-input validation failure.
    ///
    /// Validation failures never write to the store; everything else here
    /// is an environment or storage problem.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidNumber { .. }
                | Self::NonPositive { .. }
                | Self::LimitExceeded { .. }
        )
    }

    /// Whether this error came from the storage layer.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOpen { .. } | Self::DatabaseQuery(_) | Self::DirectoryCreate { .. }
        )
    }
}
