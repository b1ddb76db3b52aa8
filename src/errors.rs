use thiserror::Error;

use crate::models::common::Backend;

/// Custom error types for the Didact pipeline
#[derive(Debug, Error)]
pub enum DidactError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invocation error on {backend}: {message}")]
    InvocationError { backend: Backend, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Document error: {0}")]
    DocumentError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("System error: {0}")]
    SystemError(String),
}

/// Result type specific to Didact operations
pub type DidactResult<T> = Result<T, DidactError>;

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Aborts the whole operation
    Fatal,
    /// Ends the current artifact, other sessions keep going
    Error,
    /// Reported and degraded around
    Warning,
}

/// Recoverable vs. non-recoverable errors
pub trait RecoverableError {
    fn is_recoverable(&self) -> bool;
    fn severity(&self) -> ErrorSeverity;
}

impl RecoverableError for DidactError {
    fn is_recoverable(&self) -> bool {
        !matches!(self.severity(), ErrorSeverity::Fatal)
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            DidactError::ConfigurationError(_) => ErrorSeverity::Fatal,
            DidactError::InvalidInput(_) => ErrorSeverity::Fatal,
            DidactError::SystemError(_) => ErrorSeverity::Fatal,
            DidactError::InvocationError { .. } => ErrorSeverity::Error,
            DidactError::ExportError(_) => ErrorSeverity::Error,
            DidactError::DocumentError(_) => ErrorSeverity::Warning,
        }
    }
}
