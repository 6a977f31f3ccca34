//! Error handling module for streamprep

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for streamprep operations
#[derive(Error, Debug)]
pub enum PrepError {
    /// A decision rule failed for the current file
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// File record or settings file could not be read
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File record is not valid JSON
    #[error("Invalid file record: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Settings file is not valid TOML
    #[error("Invalid settings file: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Settings are readable but inconsistent
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl PrepError {
    pub fn config(message: impl Into<String>) -> Self {
        PrepError::ConfigError {
            message: message.into(),
        }
    }
}

/// Result type alias for streamprep operations
pub type PrepResult<T> = std::result::Result<T, PrepError>;
