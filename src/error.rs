//! Error types for score computation.
//!
//! Every variant carries enough context to point at the offending argument
//! or tensor without re-running the computation.

use thiserror::Error;

/// Result type alias for puntaje operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating inputs or configuring a metric.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Unknown task string handed to the dispatcher.
    #[error("Invalid task: '{0}' (must be one of: binary, multiclass, multilabel)")]
    InvalidTask(String),

    /// Argument value outside its valid domain.
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: &'static str, message: String },

    /// Prediction and target tensors disagree in shape.
    #[error("Tensor shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A label value that is neither a valid class nor the ignore sentinel.
    #[error("Invalid {tensor} label {value}: {message}")]
    InvalidLabel {
        tensor: &'static str,
        value: i64,
        message: String,
    },

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build an [`Error::InvalidArgument`].
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    /// Whether the error came from a bad argument rather than bad data.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidTask(_) | Self::InvalidArgument { .. } | Self::Config(_)
        )
    }
}
