// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//! anyhow::Error (Result<T>)
//!   root cause, recoverable via downcast_ref:
//!     ToolError     InvalidArgument, ToolNotFound, ToolPathNotFound,
//!                   ProcessFailed, TimedOut, Interrupted
//!     ProcessError  SpawnFailed, Wait, NonZeroExit
//!     ConfigError   ParseError, InvalidValue, NotFound
//! ```

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

// --- Tool Errors ---

/// Errors raised while invoking an external tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A required argument was missing or empty. Raised before lookup or spawn.
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// Neither the locator nor any alternative path produced an executable.
    #[error("{tool}: could not locate executable (probed: {})", display_paths(.probed))]
    ToolNotFound { tool: String, probed: Vec<PathBuf> },

    /// An explicit tool path was configured but does not exist.
    #[error("{tool}: could not find tool at '{}'", .path.display())]
    ToolPathNotFound { tool: String, path: PathBuf },

    /// The tool exited with a failure code.
    #[error("{tool}: process returned an error (exit code {code})")]
    ProcessFailed { tool: String, code: i32 },

    /// The tool was killed after exceeding its timeout.
    #[error("{tool}: process timed out after {timeout:?}")]
    TimedOut { tool: String, timeout: Duration },

    /// The tool was interrupted by cancellation.
    #[error("{tool}: process was interrupted")]
    Interrupted { tool: String },
}

impl ToolError {
    /// Creates an [`ToolError::InvalidArgument`].
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "none".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed while waiting for the process to exit.
    #[error("failed waiting for process '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a non-zero code.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}
