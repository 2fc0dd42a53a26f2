//! Error types for the drawing core.
//!
//! Reaching a history boundary (undo at the start, redo at the end, closing
//! a gesture that never opened) is not an error; those calls return `false`.
//! Errors are reserved for malformed input and bad configuration.

use thiserror::Error;

/// Errors raised when an operation cannot be registered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for activity and history operations.
pub type OperationResult<T> = Result<T, OperationError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
