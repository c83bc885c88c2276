// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for vsmetrics using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! vsmetrics [global options] <command>
//! run INPUT... -o OUTPUT [metrics flags]
//! args INPUT... -o OUTPUT [metrics flags] [--json]
//! locate [--tool-version V] [--tool-path FILE]
//! options
//! configs
//! version
//! ```

pub mod global;
pub mod metrics;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::metrics::{ArgsArgs, LocateArgs, RunArgs};
use clap::{Parser, Subcommand};

/// Code Metrics Power Tool runner
///
/// Runs the Visual Studio Code Metrics Power Tool (metrics.exe).
#[derive(Debug, Parser)]
#[command(
    name = "vsmetrics",
    author,
    version,
    about = "Code Metrics Power Tool runner",
    long_about = "vsmetrics Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs the Visual Studio Code Metrics Power Tool (metrics.exe)\n\
                  over a set of assemblies and writes its XML report.\n\n\
                  `vsmetrics run bin/App.dll -o metrics.xml` analyzes one assembly.\n\
                  See `vsmetrics <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  vsmetrics loads `vsmetrics.toml` from the current directory if it\n\
                  exists, then every --config file in order. VSMETRICS_SECTION__KEY\n\
                  environment variables override both. Use --no-default-config to\n\
                  skip `vsmetrics.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Runs metrics.exe.
    Run(RunArgs),

    /// Prints the arguments metrics.exe would receive.
    Args(ArgsArgs),

    /// Prints the metrics.exe that would be used.
    Locate(LocateArgs),

    /// Lists all options and their values from the config files.
    Options,

    /// Lists the config files used.
    Configs,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
