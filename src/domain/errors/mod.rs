// Domain errors - Fatal conditions raised by the decision rules

use thiserror::Error;

/// Domain-specific error types
///
/// Every variant aborts processing of the current file. The host is
/// responsible for reporting it; nothing here retries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The probe produced no streams for the file
    #[error("Could not read file streams data. Error!")]
    StreamDataUnreadable,

    /// The current execution node is not in the known node list
    #[error("Unidentified node '{node}' detected. Erroring!")]
    UnidentifiedNode { node: String },

    /// New file is larger than the allowed share of the original
    #[error("New file size exceeds upper limit of '{percentage}%'!")]
    UpperSizeLimitExceeded { percentage: f64 },

    /// New file is smaller than the allowed share of the original
    #[error("New file size exceeds lower limit of '{percentage}%'!")]
    LowerSizeLimitExceeded { percentage: f64 },

    /// A plugin input could not be read as a number
    #[error("Invalid value '{value}' for input '{name}': expected a number")]
    InvalidInput { name: String, value: String },

    /// No plugin is registered under the given id
    #[error("Unknown plugin: {0}")]
    UnknownPlugin(String),

    /// Policy tables are inconsistent
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
}
