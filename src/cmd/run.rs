// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run command implementation.

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::metrics_runner;
use crate::cli::metrics::RunArgs;
use crate::config::Config;
use crate::core::host::ProcessRequest;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;

/// Main handler for the run command.
///
/// With `dry_run`, metrics.exe is resolved and the command line printed, but
/// nothing is started.
///
/// # Errors
///
/// Returns an error if the arguments are invalid, metrics.exe cannot be found,
/// or it fails, times out, or is interrupted.
pub async fn run_metrics_command(
    args: &RunArgs,
    config: &Config,
    dry_run: bool,
    cancel_token: CancellationToken,
) -> Result<()> {
    let settings = args.metrics.apply(&config.metrics);
    let runner = metrics_runner(config, cancel_token)?;

    if dry_run {
        let request = runner.plan(&args.inputs, &args.output, Some(&settings))?;
        let command_line = describe(&request);
        info!(
            cwd = ?request.working_directory,
            "dry run, not starting: {command_line}"
        );
        println!("{command_line}");
        return Ok(());
    }

    let output = runner
        .run(&args.inputs, &args.output, Some(&settings))
        .await?;
    info!(
        exit_code = output.exit_code(),
        report = %args.output.display(),
        "metrics.exe finished"
    );
    Ok(())
}

/// Command line of a planned request, as logged by the process runner.
pub(crate) fn describe(request: &ProcessRequest) -> String {
    ProcessBuilder::new(&request.program)
        .args(&request.arguments)
        .command_line()
}
