//! Error types for comparison runs and configuration.
//!
//! The alignment engine itself cannot fail. Errors come from input
//! validation at the caller boundary and from loading configuration.

use thiserror::Error;

/// Errors that can occur around a comparison.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompareError {
    /// The input is not a list of strings.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Fewer documents with content than the policy requires.
    #[error("at least {required} non-empty documents are required, found {found}")]
    TooFewDocuments { found: usize, required: usize },

    /// More documents than the policy allows.
    #[error("at most {limit} documents are allowed, found {found}")]
    TooManyDocuments { found: usize, limit: usize },

    /// Invalid configuration value or unparsable configuration.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Configuration file could not be read.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

/// Result type for comparison operations.
pub type CompareResult<T> = Result<T, CompareError>;
