// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generic external tool invocation.
//!
//! ```text
//! MetricsRunner --(ToolLookup, arguments, ToolSettings)--> ToolRunner
//!   resolve():  tool_path override | ToolLocator | alternative paths
//!   plan():     ProcessRequest { program, args + extra_arguments, cwd, env, timeout, encoding }
//!   run():      ProcessRunner --> exit code policy (0 = success)
//! ```
//!
//! Specific tools supply what differs (name, executable names, alternative
//! paths, argument list); everything else lives here.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::core::host::{ProcessRequest, ToolHost};
use crate::core::process::builder::{ProcessOutput, Termination};
use crate::core::process::encoding::Encoding;
use crate::error::{Result, ToolError};

pub mod arguments;
pub mod metrics;


/// Settings shared by every tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolSettings {
    /// Explicit executable; skips the locator and alternative paths.
    pub tool_path: Option<PathBuf>,
    /// Process working directory.
    pub working_directory: Option<PathBuf>,
    /// Variables added to the inherited environment.
    pub environment: BTreeMap<String, String>,
    /// Kill the tool after this long.
    #[serde(rename = "timeout_secs", with = "duration_secs")]
    pub timeout: Option<Duration>,
    /// Tokens appended after the tool's own arguments.
    pub extra_arguments: Vec<String>,
    /// Code page the tool writes its console output in.
    pub output_encoding: Encoding,
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub(super) fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => serializer.serialize_some(&duration.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}

/// How to find one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolLookup {
    /// Display name used in logs and errors.
    pub name: &'static str,
    /// Executable names handed to the locator.
    pub executable_names: &'static [&'static str],
    /// Absolute paths probed, in order, when the locator finds nothing.
    pub alternative_paths: Vec<PathBuf>,
}

/// Resolves, plans and runs external tools against a [`ToolHost`].
#[derive(Debug, Clone)]
pub struct ToolRunner {
    host: ToolHost,
}

impl ToolRunner {
    #[must_use]
    pub const fn new(host: ToolHost) -> Self {
        Self { host }
    }

    #[must_use]
    pub const fn host(&self) -> &ToolHost {
        &self.host
    }

    /// Finds the executable for `lookup`.
    ///
    /// # Errors
    ///
    /// - [`ToolError::ToolPathNotFound`] if `settings.tool_path` is set but is not a file.
    /// - [`ToolError::ToolNotFound`] if neither the locator nor any alternative path matched.
    pub fn resolve(&self, lookup: &ToolLookup, settings: &ToolSettings) -> Result<PathBuf> {
        let fs = self.host.file_system();

        if let Some(tool_path) = &settings.tool_path {
            let path = self.host.environment().make_absolute(tool_path);
            if fs.is_file(&path) {
                debug!(tool = lookup.name, path = %path.display(), "using configured tool path");
                return Ok(path);
            }
            return Err(ToolError::ToolPathNotFound {
                tool: lookup.name.to_string(),
                path,
            }
            .into());
        }

        if let Some(path) = self.host.tool_locator().resolve(lookup.executable_names) {
            debug!(tool = lookup.name, path = %path.display(), "found tool on search paths");
            return Ok(path);
        }

        let mut probed = Vec::with_capacity(lookup.alternative_paths.len());
        for candidate in &lookup.alternative_paths {
            debug!(tool = lookup.name, path = %candidate.display(), "probing alternative path");
            probed.push(candidate.clone());
            if fs.is_file(candidate) {
                return Ok(candidate.clone());
            }
        }

        Err(ToolError::ToolNotFound {
            tool: lookup.name.to_string(),
            probed,
        }
        .into())
    }

    /// Resolves the executable and assembles the process request without running it.
    ///
    /// # Errors
    ///
    /// Returns the resolution errors of [`ToolRunner::resolve`].
    pub fn plan(
        &self,
        lookup: &ToolLookup,
        arguments: Vec<String>,
        settings: &ToolSettings,
    ) -> Result<ProcessRequest> {
        let program = self.resolve(lookup, settings)?;
        let environment = self.host.environment();

        let mut arguments = arguments;
        arguments.extend(settings.extra_arguments.iter().cloned());

        Ok(ProcessRequest {
            program,
            arguments,
            working_directory: Some(
                settings
                    .working_directory
                    .as_deref()
                    .map_or_else(|| environment.working_directory(), |dir| {
                        environment.make_absolute(dir)
                    }),
            ),
            environment: settings.environment.clone(),
            timeout: settings.timeout,
            output_encoding: settings.output_encoding,
        })
    }

    /// Runs the tool and applies the exit code policy.
    ///
    /// # Errors
    ///
    /// - resolution errors of [`ToolRunner::resolve`];
    /// - errors of the host's process runner (e.g. spawn failures);
    /// - [`ToolError::TimedOut`] or [`ToolError::Interrupted`] if the runner killed the tool;
    /// - [`ToolError::ProcessFailed`] for any non-zero exit code.
    pub async fn run(
        &self,
        lookup: &ToolLookup,
        arguments: Vec<String>,
        settings: &ToolSettings,
    ) -> Result<ProcessOutput> {
        let request = self.plan(lookup, arguments, settings)?;
        info!(tool = lookup.name, program = %request.program.display(), "running");

        let output = self.host.process_runner().run(&request).await?;
        Self::check_output(lookup.name, &request, output)
    }

    fn check_output(
        tool: &str,
        request: &ProcessRequest,
        output: ProcessOutput,
    ) -> Result<ProcessOutput> {
        let failure = match output.termination() {
            Termination::TimedOut => Some(ToolError::TimedOut {
                tool: tool.to_string(),
                timeout: request.timeout.unwrap_or_default(),
            }),
            Termination::Interrupted => Some(ToolError::Interrupted {
                tool: tool.to_string(),
            }),
            Termination::Exited if output.exit_code() != 0 => Some(ToolError::ProcessFailed {
                tool: tool.to_string(),
                code: output.exit_code(),
            }),
            Termination::Exited => None,
        };

        if let Some(failure) = failure {
            error!(tool, exit_code = output.exit_code(), "{failure}");
            return Err(failure.into());
        }

        info!(tool, "completed");
        Ok(output)
    }
}
