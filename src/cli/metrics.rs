// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for `run`, `args` and `locate`.
//!
//! # Flag Effects
//!
//! ```text
//! [metrics] from config  +  CLI flags  -->  MetricsSettings
//!   lists     (-d, --platform, -r, --extra-arg, --env)  extend the config lists
//!   switches  (--search-gac, -q, ...)                   turn on
//!             (--no-search-gac, --no-quiet, ...)        turn off
//!   values    (--tool-version, --tool-path, ...)         replace
//! ```
//!
//! Of a switch and its `--no-` form, the last one given wins.

use clap::{ArgAction, Args};
use std::path::PathBuf;
use std::time::Duration;

use crate::core::process::encoding::Encoding;
use crate::tool::metrics::settings::{MetricsSettings, ToolVersion};

/// Arguments for the `run` command.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Assemblies to analyze.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Report file written by metrics.exe.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    #[command(flatten)]
    pub metrics: MetricsFlags,
}

/// Arguments for the `args` command.
#[derive(Debug, Clone, Args)]
pub struct ArgsArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Prints the invocation as JSON instead of one token per line.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `locate` command.
#[derive(Debug, Clone, Default, Args)]
pub struct LocateArgs {
    #[command(flatten)]
    pub tool: ToolFlags,
}

/// metrics.exe options.
#[derive(Debug, Clone, Default, Args)]
pub struct MetricsFlags {
    /// Directory searched for assembly dependencies (/d:).
    #[arg(short = 'd', long = "directory", value_name = "DIR", action = ArgAction::Append)]
    pub directories: Vec<PathBuf>,

    /// Target platform (/plat:).
    #[arg(long = "platform", value_name = "PLATFORM", action = ArgAction::Append)]
    pub platforms: Vec<String>,

    /// Assembly reference (/ref:).
    #[arg(short = 'r', long = "reference", value_name = "FILE", action = ArgAction::Append)]
    pub references: Vec<PathBuf>,

    /// Searches the global assembly cache (/gac).
    #[arg(long = "search-gac", overrides_with = "no_search_gac")]
    pub search_gac: bool,

    /// Overrides `search_gac = true` from the config.
    #[arg(long = "no-search-gac", overrides_with = "search_gac")]
    pub no_search_gac: bool,

    /// Ignores invalid targets (/iit).
    #[arg(long = "ignore-invalid-targets", overrides_with = "no_ignore_invalid_targets")]
    pub ignore_invalid_targets: bool,

    /// Overrides `ignore_invalid_targets = true` from the config.
    #[arg(long = "no-ignore-invalid-targets", overrides_with = "ignore_invalid_targets")]
    pub no_ignore_invalid_targets: bool,

    /// Ignores generated code (/igc).
    #[arg(long = "ignore-generated-code", overrides_with = "no_ignore_generated_code")]
    pub ignore_generated_code: bool,

    /// Overrides `ignore_generated_code = true` from the config.
    #[arg(long = "no-ignore-generated-code", overrides_with = "ignore_generated_code")]
    pub no_ignore_generated_code: bool,

    /// Writes a success marker file (/sf).
    #[arg(long = "success-file", overrides_with = "no_success_file")]
    pub success_file: bool,

    /// Overrides `success_file = true` from the config.
    #[arg(long = "no-success-file", overrides_with = "success_file")]
    pub no_success_file: bool,

    /// Silences metrics.exe console output (/q).
    #[arg(short = 'q', long, overrides_with = "no_quiet")]
    pub quiet: bool,

    /// Overrides `quiet = true` from the config.
    #[arg(long = "no-quiet", overrides_with = "quiet")]
    pub no_quiet: bool,

    #[command(flatten)]
    pub tool: ToolFlags,
}

/// Tool lookup and process options.
#[derive(Debug, Clone, Default, Args)]
pub struct ToolFlags {
    /// Installed metrics.exe to fall back to when it is not on the search paths.
    #[arg(long = "tool-version", value_name = "VERSION")]
    pub tool_version: Option<ToolVersion>,

    /// Explicit metrics.exe path; skips every other lookup.
    #[arg(long = "tool-path", value_name = "FILE")]
    pub tool_path: Option<PathBuf>,

    /// Working directory of the metrics.exe process.
    #[arg(long = "working-directory", value_name = "DIR")]
    pub working_directory: Option<PathBuf>,

    /// Kills metrics.exe after this many seconds.
    #[arg(
        long = "timeout",
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: Option<u64>,

    /// Environment variable for metrics.exe.
    #[arg(
        long = "env",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        action = ArgAction::Append
    )]
    pub environment: Vec<(String, String)>,

    /// Raw token appended after the generated arguments.
    #[arg(
        long = "extra-arg",
        value_name = "TOKEN",
        allow_hyphen_values = true,
        action = ArgAction::Append
    )]
    pub extra_arguments: Vec<String>,

    /// Code page metrics.exe writes its console output in.
    #[arg(long = "output-encoding", value_name = "ENCODING")]
    pub output_encoding: Option<Encoding>,
}

impl MetricsFlags {
    /// Layers these flags over `base` (usually the `[metrics]` config section).
    #[must_use]
    pub fn apply(&self, base: &MetricsSettings) -> MetricsSettings {
        let mut settings = self.tool.apply(base);

        settings.assembly_directories.extend(self.directories.iter().cloned());
        settings.assembly_platforms.extend(self.platforms.iter().cloned());
        settings.assembly_references.extend(self.references.iter().cloned());
        settings.search_gac = switch(self.search_gac, self.no_search_gac, base.search_gac);
        settings.ignore_invalid_targets = switch(
            self.ignore_invalid_targets,
            self.no_ignore_invalid_targets,
            base.ignore_invalid_targets,
        );
        settings.ignore_generated_code = switch(
            self.ignore_generated_code,
            self.no_ignore_generated_code,
            base.ignore_generated_code,
        );
        settings.success_file = switch(self.success_file, self.no_success_file, base.success_file);
        settings.quiet = switch(self.quiet, self.no_quiet, base.quiet);

        settings
    }
}

impl ToolFlags {
    /// Layers these flags over `base`.
    #[must_use]
    pub fn apply(&self, base: &MetricsSettings) -> MetricsSettings {
        let mut settings = base.clone();

        if let Some(version) = self.tool_version {
            settings.tool_version = version;
        }
        if let Some(path) = &self.tool_path {
            settings.tool.tool_path = Some(path.clone());
        }
        if let Some(dir) = &self.working_directory {
            settings.tool.working_directory = Some(dir.clone());
        }
        if let Some(secs) = self.timeout_secs {
            settings.tool.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(encoding) = self.output_encoding {
            settings.tool.output_encoding = encoding;
        }
        settings
            .tool
            .environment
            .extend(self.environment.iter().cloned());
        settings
            .tool
            .extra_arguments
            .extend(self.extra_arguments.iter().cloned());

        settings
    }
}

const fn switch(on: bool, off: bool, configured: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        configured
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
