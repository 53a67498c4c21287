//! Error types for devstrap operations.
//!
//! This module defines [`DevstrapError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! Nothing is recovered. Every error aborts the bootstrap at the step that
//! raised it, is printed to stderr together with its [`DevstrapError::hint`],
//! and the process exits with code 1. A re-run after fixing the cause picks
//! up from the beginning.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for devstrap operations.
#[derive(Debug, Error)]
pub enum DevstrapError {
    /// A required executable is not available.
    #[error("{tool} is not installed or not on PATH")]
    MissingTool { tool: String, hint: String },

    /// The dependency manifest does not exist.
    #[error("Dependency manifest not found: {path}")]
    ManifestMissing { path: PathBuf },

    /// An external command exited unsuccessfully.
    #[error("Command failed ({}): {command}", exit_status(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// An external command could not be started at all.
    #[error("Failed to start {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// The environment file has not been materialized yet.
    #[error("Environment file not found: {path}")]
    EnvFileMissing { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DevstrapError {
    /// Remediation text shown under the error message, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingTool { hint, .. } => Some(hint.clone()),
            Self::ManifestMissing { path } => Some(format!(
                "Create {} listing the project's Python dependencies",
                path.display()
            )),
            Self::EnvFileMissing { .. } => {
                Some("Run `devstrap` to create it from the template or defaults".to_string())
            }
            Self::CommandFailed { .. } => {
                Some("Fix the reported problem and run devstrap again".to_string())
            }
            Self::SpawnFailed { .. } => {
                Some("Check that the program is executable and not a broken link".to_string())
            }
            _ => None,
        }
    }
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Result type alias for devstrap operations.
pub type Result<T> = std::result::Result<T, DevstrapError>;
