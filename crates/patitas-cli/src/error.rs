//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Feature validation failure
    #[error("Feature validation failed: {message}")]
    Validation {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Patitas library error
    #[error("Patitas error: {0}")]
    Patitas(#[from] patitas::PatitasError),
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("bad arg");
        assert!(err.to_string().contains("Invalid argument"));
        assert!(err.to_string().contains("bad arg"));
    }

    #[test]
    fn test_validation_error() {
        let err = CliError::validation("2 problem(s)");
        assert!(err.to_string().contains("Feature validation"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }

    #[test]
    fn test_patitas_error_from() {
        let err: CliError = patitas::PatitasError::InvalidTagExpression {
            expression: "@web and".to_string(),
            message: "dangling operator".to_string(),
        }
        .into();
        assert!(err.to_string().contains("Patitas error"));
    }
}
