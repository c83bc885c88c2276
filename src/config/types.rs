// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! [global]   log levels, log file
//! [metrics]  MetricsSettings (+ [metrics.tool] ToolSettings)
//! [locator]  search paths, installation candidates, Program Files (x86)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::tool::metrics::installations::{Installation, MetricsInstallations};

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Where to look for metrics.exe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocatorConfig {
    /// Directories searched before `PATH`.
    pub search_paths: Vec<PathBuf>,
    /// Replaces the well-known Visual Studio installations when non-empty.
    pub installations: Vec<Installation>,
    /// Overrides the "Program Files (x86)" special folder.
    pub program_files_x86: Option<PathBuf>,
}

impl LocatorConfig {
    /// Configured installation candidates, if any.
    #[must_use]
    pub fn installations(&self) -> Option<MetricsInstallations> {
        (!self.installations.is_empty())
            .then(|| MetricsInstallations::new(self.installations.clone()))
    }
}
