// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for convlint.
//!
//! Rule failures are not errors: they are reported as
//! [`Violation`](crate::rules::Violation) values. The types here cover
//! everything that stops a lint run from producing a report at all.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for convlint operations.
#[derive(Error, Debug)]
pub enum LintError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Commit message parsing errors
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Lint outcome errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Commit message parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitError {
    #[error("Empty commit message")]
    EmptyMessage,

    #[error("Header '{header}' has no ':' separating type and subject")]
    MissingSeparator { header: String },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

/// Lint outcome errors, raised by the CLI once the report has been printed.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{errors} error(s), {warnings} warning(s) found")]
    Failed { errors: usize, warnings: usize },

    #[error("{count} message(s) could not be parsed")]
    Unparseable { count: usize },
}

/// Result type alias for convlint operations.
pub type Result<T> = std::result::Result<T, LintError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| LintError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
