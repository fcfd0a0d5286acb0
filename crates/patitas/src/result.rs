//! Result and error types for Patitas.

use thiserror::Error;

/// Result type for Patitas operations
pub type PatitasResult<T> = Result<T, PatitasError>;

/// Errors that can occur in Patitas
#[derive(Debug, Error)]
pub enum PatitasError {
    /// No element matched the locator
    #[error("No element matched locator {locator}")]
    ElementNotFound {
        /// Locator description
        locator: String,
    },

    /// Element handle went stale (page re-rendered underneath it)
    #[error("Stale element for locator {locator}")]
    StaleElement {
        /// Locator description
        locator: String,
    },

    /// Explicit wait timed out
    #[error("Wait timed out after {ms}ms: {waiting_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// Description of the awaited condition
        waiting_for: String,
    },

    /// Navigation failed
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Driver-level failure (session lost, backend error)
    #[error("Driver error: {message}")]
    DriverError {
        /// Error message
        message: String,
    },

    /// No step definition matched a scenario step
    #[error("Undefined step: {text:?} (glue packages: {glue})")]
    UndefinedStep {
        /// The step text that failed to bind
        text: String,
        /// Active glue packages, comma separated
        glue: String,
    },

    /// More than one step definition matched a scenario step
    #[error("Ambiguous step: {text:?} matched {count} definitions")]
    AmbiguousStep {
        /// The step text
        text: String,
        /// Number of matching definitions
        count: usize,
    },

    /// A step assertion failed (panic caught during step execution)
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Panic or assertion message
        message: String,
    },

    /// A step pattern failed to compile
    #[error("Invalid step pattern {pattern:?}: {message}")]
    InvalidStepPattern {
        /// The offending pattern
        pattern: String,
        /// Regex error message
        message: String,
    },

    /// A tag expression failed to parse
    #[error("Invalid tag expression {expression:?}: {message}")]
    InvalidTagExpression {
        /// The offending expression
        expression: String,
        /// Parse error message
        message: String,
    },

    /// A feature file failed to load or deserialize
    #[error("Invalid feature file {path}: {message}")]
    InvalidFeature {
        /// Path or source description
        path: String,
        /// Error message
        message: String,
    },

    /// Report generation failed
    #[error("Report error: {message}")]
    ReportError {
        /// Error message
        message: String,
    },

    /// Suite setup hook failed
    #[error("Suite setup failed: {message}")]
    SetupError {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PatitasError {
    /// True for the read-path failures that verification methods map to a
    /// default value: element absent, handle stale, or the wait timing out.
    /// Everything else is an infrastructure fault and always propagates.
    #[must_use]
    pub const fn is_read_failure(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::StaleElement { .. } | Self::Timeout { .. }
        )
    }
}
