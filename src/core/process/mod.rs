// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("metrics.exe")
//!   .args() .cwd() .envs() .maybe_timeout() .encoding()
//!   .run_with_cancellation(token)
//!       --> tokio::process::Command
//!           stream stdout/stderr, decode each line
//!           kill on timeout / cancel
//!       --> ProcessOutput { exit_code, stdout, stderr, termination }
//! ```

pub mod builder;
pub mod encoding;
mod io;
mod runner;
#[cfg(test)]
mod tests;
