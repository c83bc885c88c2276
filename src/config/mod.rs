// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for vsmetrics.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. vsmetrics.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. VSMETRICS_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! VSMETRICS_GLOBAL__LOG_LEVEL=4            → global.log_level = 4
//! VSMETRICS_METRICS__QUIET=true            → metrics.quiet = true
//! VSMETRICS_METRICS__TOOL__TIMEOUT_SECS=60 → metrics.tool.timeout_secs = 60
//! ```
//!
//! # Example
//!
//! ```toml
//! [metrics]
//! search_gac = true
//! tool_version = "vs2015"
//!
//! [metrics.tool]
//! timeout_secs = 600
//!
//! [[locator.installations]]
//! version = "vs2015"
//! path = 'D:\VS14\Team Tools\Static Analysis Tools\FxCop\metrics.exe'
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::tool::metrics::settings::MetricsSettings;

use loader::ConfigLoader;
use types::{GlobalConfig, LocatorConfig};

/// Default configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "vsmetrics.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "VSMETRICS";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    /// Default metrics.exe settings; CLI flags are layered on top.
    pub metrics: MetricsSettings,
    pub locator: LocatorConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vsmetrics::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("ci/metrics.toml")
    ///     .add_toml_file_optional("vsmetrics.toml")
    ///     .with_env_prefix("VSMETRICS")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, is not valid TOML, or does not
    /// match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for empty installation paths or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self
            .locator
            .installations
            .iter()
            .position(|installation| installation.path.as_os_str().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                section: "locator".to_string(),
                key: format!("installations[{index}].path"),
                message: "path cannot be empty".to_string(),
            }
            .into());
        }

        if self.metrics.tool.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(ConfigError::InvalidValue {
                section: "metrics.tool".to_string(),
                key: "timeout_secs".to_string(),
                message: "timeout must be at least one second".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Format configuration options for display, one `key = value` per line.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert("global.log_level".to_string(), self.global.log_level.as_u8().to_string());
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(log_file) = &self.global.log_file {
            options.insert("global.log_file".to_string(), log_file.display().to_string());
        }

        let metrics = &self.metrics;
        options.insert("metrics.search_gac".to_string(), metrics.search_gac.to_string());
        options.insert(
            "metrics.ignore_invalid_targets".to_string(),
            metrics.ignore_invalid_targets.to_string(),
        );
        options.insert(
            "metrics.ignore_generated_code".to_string(),
            metrics.ignore_generated_code.to_string(),
        );
        options.insert("metrics.success_file".to_string(), metrics.success_file.to_string());
        options.insert("metrics.quiet".to_string(), metrics.quiet.to_string());
        options.insert("metrics.tool_version".to_string(), metrics.tool_version.to_string());
        if let Some(tool_path) = &metrics.tool.tool_path {
            options.insert("metrics.tool.tool_path".to_string(), tool_path.display().to_string());
        }
        options.insert(
            "metrics.tool.output_encoding".to_string(),
            metrics.tool.output_encoding.to_string(),
        );
        if let Some(timeout) = metrics.tool.timeout {
            options.insert("metrics.tool.timeout_secs".to_string(), timeout.as_secs().to_string());
        }

        for (index, path) in self.locator.search_paths.iter().enumerate() {
            options.insert(format!("locator.search_paths[{index}]"), path.display().to_string());
        }
        for (index, installation) in self.locator.installations.iter().enumerate() {
            options.insert(
                format!("locator.installations[{index}]"),
                format!("{} {}", installation.version, installation.path.display()),
            );
        }
        if let Some(program_files) = &self.locator.program_files_x86 {
            options.insert(
                "locator.program_files_x86".to_string(),
                program_files.display().to_string(),
            );
        }

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
