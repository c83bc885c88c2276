// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     args, cwd, env, stdio
//!              |
//!              v
//!          spawn()
//!              |
//!              v
//!     run_child (stream, wait, timeout/cancel)
//!              |
//!              v
//!    exit_code must be 0
//!    (skip if ALLOW_FAILURE or killed)
//!              |
//!              v
//!       ProcessOutput
//!    { exit_code, stdout, stderr, termination }
//! ```

use crate::error::{ProcessError, Result};
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags, Termination};

impl ProcessBuilder {
    /// Returns the display name for this process.
    pub(super) fn display_name(&self) -> String {
        self.program().file_stem().map_or_else(
            || "process".to_string(),
            |s| s.to_string_lossy().into_owned(),
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') && !arg.contains('"') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process until it exits, times out or `token` fires.
    ///
    /// A killed process is reported through [`ProcessOutput::termination`],
    /// not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Spawning the child process fails.
    /// - The process exits with a non-zero code (and `ALLOW_FAILURE` is not set).
    /// - Waiting on the child fails.
    pub async fn run_with_cancellation(self, token: CancellationToken) -> Result<ProcessOutput> {
        if token.is_cancelled() {
            return Ok(ProcessOutput::new(
                -1,
                String::new(),
                String::new(),
                Termination::Interrupted,
            ));
        }
        self.execute(token).await
    }

    async fn execute(self, token: CancellationToken) -> Result<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();

        let mut child = command.spawn().map_err(|source| ProcessError::SpawnFailed {
            command: cmd_line.clone(),
            source,
        })?;

        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &mut child, token).await?;

        if output.termination() == Termination::Exited
            && !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE)
            && output.exit_code() != 0
        {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: name,
                code: output.exit_code(),
            }
            .into());
        }

        trace!(
            process = %name,
            exit_code = output.exit_code(),
            termination = ?output.termination(),
            "completed"
        );
        Ok(output)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        self.apply_args(&mut command);

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        command.envs(self.extra_env());

        command.stdin(Stdio::null());
        command.stdout(Self::stdio_from_flags(self.stdout_config()));
        command.stderr(Self::stdio_from_flags(self.stderr_config()));

        command.kill_on_drop(true);

        command
    }

    #[cfg(windows)]
    fn apply_args(&self, command: &mut Command) {
        if self.process_flags().contains(ProcessFlags::VERBATIM_ARGS) {
            for arg in self.args_slice() {
                command.raw_arg(arg);
            }
        } else {
            command.args(self.args_slice());
        }
    }

    // Unix passes argv unmodified, so verbatim and regular arguments coincide.
    #[cfg(not(windows))]
    fn apply_args(&self, command: &mut Command) {
        command.args(self.args_slice());
    }

    /// Pipes a stream that is logged or kept; anything else goes to the null device.
    fn stdio_from_flags(flags: StreamFlags) -> Stdio {
        if flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
            Stdio::piped()
        } else {
            Stdio::null()
        }
    }
}
