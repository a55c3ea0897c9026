//! Error types for market signal operations

use thiserror::Error;

/// Market signal specific errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Fewer observations than an algorithm's hard minimum
    #[error("Insufficient data. Need at least {required} periods, got {actual}")]
    InsufficientData {
        required: usize,
        actual: usize,
    },

    /// A required bar or overview field is absent
    #[error("Missing field: {field}")]
    MissingField {
        field: String,
    },

    /// A field was present but could not be parsed as a number
    #[error("Invalid number in field {field}: {value:?}")]
    InvalidNumber {
        field: String,
        value: String,
    },

    /// A bar timestamp could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable {
        symbol: String,
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File system error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl EngineError {
    /// Stable machine-readable tag for structured error results
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "insufficient_data",
            Self::MissingField { .. } => "missing_field",
            Self::InvalidNumber { .. } => "invalid_number",
            Self::InvalidTimestamp(_) => "invalid_timestamp",
            Self::DataUnavailable { .. } => "data_unavailable",
            Self::ConfigError(_) => "config",
            Self::IoError(_) => "io",
            Self::JsonError(_) => "json",
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Result type alias for market signal operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Convert EngineError to the tool layer's error
impl From<EngineError> for signals_tools::Error {
    fn from(err: EngineError) -> Self {
        signals_tools::Error::ExecutionFailed(err.to_string())
    }
}
