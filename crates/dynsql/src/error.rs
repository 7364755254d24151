//! Error types for dynsql

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dynsql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for statement construction and template resolution
#[derive(Debug, Error)]
pub enum SqlError {
    /// Blacklisted token found in a table name, filter key, or filter value
    #[error("SQL injection risk in {context}: {token:?} in {input:?}")]
    Injection {
        context: &'static str,
        token: &'static str,
        input: String,
    },

    /// Filter key already carries a generated-parameter prefix
    #[error("Filter key {key:?} must not start with {prefix:?}")]
    ReservedPrefix { key: String, prefix: &'static str },

    /// Malformed caller input (bad `between` value, empty SET, bad page number)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Statement id with fewer than two dot-separated segments
    #[error("Malformed statement id: {0:?}")]
    MalformedStatementId(String),

    /// No template file matches the statement id's prefix
    #[error("Template file not found for statement id {0:?}")]
    TemplateFileNotFound(String),

    /// Template file exists but holds no statements
    #[error("Template file is empty: {}", .0.display())]
    TemplateFileEmpty(PathBuf),

    /// Template file found but the final id segment is missing
    #[error("Statement id not found: {0:?}")]
    StatementNotFound(String),

    /// Template file could not be parsed
    #[error("Failed to parse template file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Template render error
    #[error("Render error: {0}")]
    Template(#[from] minijinja::Error),

    /// Template root walk or file read error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by the execution collaborator
    #[error("Execution error: {0}")]
    Execution(String),
}

impl SqlError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Check if this is an injection error
    pub fn is_injection(&self) -> bool {
        matches!(self, Self::Injection { .. })
    }

    /// Check if this error came from the execution collaborator
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }
}
