// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Visual Studio Code Metrics Power Tool (metrics.exe).
//!
//! ```text
//! MetricsRunner::run(inputs, output, settings)
//!   validate      empty inputs / output --> InvalidArgument (nothing else happens)
//!   arguments     args::build_arguments
//!   lookup        "metrics.exe" + installations (skipped on Unix)
//!   ToolRunner    resolve --> spawn --> exit code
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::host::{ProcessRequest, SpecialPath, ToolHost};
use crate::core::process::builder::ProcessOutput;
use crate::error::{Result, ToolError};
use crate::tool::{ToolLookup, ToolRunner};

pub mod args;
pub mod installations;
pub mod settings;


use installations::MetricsInstallations;
use settings::{MetricsSettings, ToolVersion};

/// Display name of the tool.
pub const TOOL_NAME: &str = "Metrics";

/// Executable file name.
pub const METRICS_EXE: &str = "metrics.exe";

/// Runs metrics.exe for a set of assemblies.
#[derive(Debug, Clone)]
pub struct MetricsRunner {
    tool: ToolRunner,
    installations: Option<MetricsInstallations>,
}

impl MetricsRunner {
    #[must_use]
    pub const fn new(host: ToolHost) -> Self {
        Self {
            tool: ToolRunner::new(host),
            installations: None,
        }
    }

    /// Replaces the well-known installation directories.
    #[must_use]
    pub fn with_installations(mut self, installations: MetricsInstallations) -> Self {
        self.installations = Some(installations);
        self
    }

    /// Calculates code metrics for `inputs` and has metrics.exe write the report to `output`.
    ///
    /// `None` settings behave exactly like `MetricsSettings::default()`.
    ///
    /// # Errors
    ///
    /// - [`ToolError::InvalidArgument`] if `inputs` is empty or any path is empty,
    ///   before anything is looked up or started;
    /// - resolution and process errors of [`ToolRunner::run`].
    pub async fn run(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        settings: Option<&MetricsSettings>,
    ) -> Result<ProcessOutput> {
        validate(inputs, output)?;
        let settings = with_defaults(settings);

        let arguments = self.build_arguments(inputs, output, &settings);
        let lookup = self.lookup(settings.tool_version);
        self.tool.run(&lookup, arguments, &settings.tool).await
    }

    /// Validates the request and returns the argument tokens metrics.exe would receive.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidArgument`] for an empty input list or empty paths.
    pub fn arguments(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        settings: Option<&MetricsSettings>,
    ) -> Result<Vec<String>> {
        validate(inputs, output)?;
        let settings = with_defaults(settings);
        Ok(self.build_arguments(inputs, output, &settings))
    }

    /// Validates the request, resolves metrics.exe and assembles the process request.
    ///
    /// # Errors
    ///
    /// Same as [`MetricsRunner::run`], minus process errors.
    pub fn plan(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        settings: Option<&MetricsSettings>,
    ) -> Result<ProcessRequest> {
        validate(inputs, output)?;
        let settings = with_defaults(settings);

        let arguments = self.build_arguments(inputs, output, &settings);
        let lookup = self.lookup(settings.tool_version);
        self.tool.plan(&lookup, arguments, &settings.tool)
    }

    /// Finds metrics.exe without running it.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::ToolNotFound`] or [`ToolError::ToolPathNotFound`].
    pub fn locate(&self, settings: Option<&MetricsSettings>) -> Result<PathBuf> {
        let settings = with_defaults(settings);
        self.tool
            .resolve(&self.lookup(settings.tool_version), &settings.tool)
    }

    /// Installation paths probed for `version` after the locator fails.
    ///
    /// Always empty on Unix-like hosts: metrics.exe is Windows-only.
    #[must_use]
    pub fn alternative_paths(&self, version: ToolVersion) -> Vec<PathBuf> {
        let environment = self.tool.host().environment();
        if environment.is_unix() {
            return Vec::new();
        }

        let installations = match &self.installations {
            Some(configured) => Cow::Borrowed(configured),
            None => match environment.special_path(SpecialPath::ProgramFilesX86) {
                Some(program_files) => Cow::Owned(MetricsInstallations::well_known(&program_files)),
                None => {
                    debug!("no Program Files (x86) directory, skipping installation probes");
                    return Vec::new();
                }
            },
        };

        installations.paths_for(version)
    }

    fn lookup(&self, version: ToolVersion) -> ToolLookup {
        ToolLookup {
            name: TOOL_NAME,
            executable_names: &[METRICS_EXE],
            alternative_paths: self.alternative_paths(version),
        }
    }

    fn build_arguments(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        settings: &MetricsSettings,
    ) -> Vec<String> {
        let arguments =
            args::build_arguments(inputs, output, settings, self.tool.host().environment());
        debug!(tool = TOOL_NAME, arguments = %arguments.render(), "built arguments");
        arguments.into_vec()
    }
}

fn with_defaults(settings: Option<&MetricsSettings>) -> Cow<'_, MetricsSettings> {
    settings.map_or_else(|| Cow::Owned(MetricsSettings::default()), Cow::Borrowed)
}

fn validate(inputs: &[PathBuf], output: &Path) -> Result<()> {
    if inputs.is_empty() {
        return Err(ToolError::invalid_argument("input_file_paths", "at least one input is required").into());
    }
    if inputs.iter().any(|input| input.as_os_str().is_empty()) {
        return Err(ToolError::invalid_argument("input_file_paths", "input paths cannot be empty").into());
    }
    if output.as_os_str().is_empty() {
        return Err(ToolError::invalid_argument("output_file_path", "cannot be empty").into());
    }
    Ok(())
}
