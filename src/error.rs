//! Error types for the autoserver CLI.
//!
//! Every failure is fatal for the run and nothing is retried. Each variant
//! maps to a distinct exit code.

use crate::exit_codes;
use std::path::Path;
use thiserror::Error;

/// Main error type for autoserver operations.
#[derive(Error, Debug)]
pub enum AutoserverError {
    /// Invalid arguments, config file, or host state.
    #[error("{0}")]
    UserError(String),

    /// Template source missing/unreadable, or a placeholder could not be resolved.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Writing, renaming, linking, or creating a directory failed.
    #[error("Filesystem error: {0}")]
    FilesystemError(String),

    /// An external tool could not be spawned or exited non-zero.
    #[error("Command failed: {0}")]
    CommandError(String),
}

impl AutoserverError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            AutoserverError::UserError(_) => exit_codes::USER_ERROR,
            AutoserverError::ConfigurationError(_) => exit_codes::CONFIGURATION_FAILURE,
            AutoserverError::FilesystemError(_) => exit_codes::FILESYSTEM_FAILURE,
            AutoserverError::CommandError(_) => exit_codes::COMMAND_FAILURE,
        }
    }

    /// Build a `FilesystemError` naming the action and path that failed.
    pub fn fs(action: &str, path: &Path, err: std::io::Error) -> Self {
        AutoserverError::FilesystemError(format!(
            "failed to {} '{}': {}",
            action,
            path.display(),
            err
        ))
    }
}

/// Result type alias for autoserver operations.
pub type Result<T> = std::result::Result<T, AutoserverError>;
