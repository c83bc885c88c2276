// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Args command implementation.

use tokio_util::sync::CancellationToken;

use super::metrics_runner;
use crate::cli::metrics::ArgsArgs;
use crate::config::Config;
use crate::error::Result;

/// Main handler for the args command.
///
/// # Errors
///
/// Returns an error if the arguments are invalid.
pub fn run_args_command(args: &ArgsArgs, config: &Config) -> Result<()> {
    let settings = args.run.metrics.apply(&config.metrics);
    let runner = metrics_runner(config, CancellationToken::new())?;

    let mut tokens = runner.arguments(&args.run.inputs, &args.run.output, Some(&settings))?;
    tokens.extend(settings.tool.extra_arguments.iter().cloned());

    println!("{}", format_arguments(&tokens, args.json)?);
    Ok(())
}

/// One token per line, or a JSON array.
pub(crate) fn format_arguments(tokens: &[String], json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(tokens)?)
    } else {
        Ok(tokens.join("\n"))
    }
}
