//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every user action ends in either a success message or one of these.
/// None of them are fatal; the session stays usable.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-range form input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database connection or write failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Spreadsheet could not be written.
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Returns a stable code for this error, used in log fields.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Export(_) => "EXPORT_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
