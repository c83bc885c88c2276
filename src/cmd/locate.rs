// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Locate command implementation.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::metrics_runner;
use crate::cli::metrics::LocateArgs;
use crate::config::Config;
use crate::error::Result;

/// Main handler for the locate command.
///
/// # Errors
///
/// Returns an error listing the probed paths if metrics.exe cannot be found.
pub fn run_locate_command(args: &LocateArgs, config: &Config) -> Result<()> {
    let settings = args.tool.apply(&config.metrics);
    let runner = metrics_runner(config, CancellationToken::new())?;

    debug!(
        tool_version = %settings.tool_version,
        candidates = runner.alternative_paths(settings.tool_version).len(),
        "locating metrics.exe"
    );
    let path = runner.locate(Some(&settings))?;
    println!("{}", path.display());
    Ok(())
}
