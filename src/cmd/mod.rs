// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args + Config --> cmd::run_* handlers
//!   run, args, locate  --> MetricsRunner over the system host
//!   options, configs   --> config listing
//! ```

pub mod args;
pub mod config;
pub mod locate;
pub mod run;


use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::host::system::system_host;
use crate::error::Result;
use crate::tool::metrics::MetricsRunner;

/// Builds a [`MetricsRunner`] on the real machine using the `[locator]` section.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn metrics_runner(config: &Config, cancel_token: CancellationToken) -> Result<MetricsRunner> {
    let locator = &config.locator;
    let host = system_host(
        locator.search_paths.clone(),
        locator.program_files_x86.clone(),
        cancel_token,
    )?;

    let runner = MetricsRunner::new(host);
    Ok(match locator.installations() {
        Some(installations) => runner.with_installations(installations),
        None => runner,
    })
}
