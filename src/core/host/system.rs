// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Collaborators backed by the real machine.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::{
    Environment, FileSystem, ProcessRequest, ProcessRunner, SpecialPath, ToolHost, ToolLocator,
};
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
use crate::error::Result;

/// [`FileSystem`] over `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// [`Environment`] of the current process.
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    working_directory: PathBuf,
    program_files_x86: Option<PathBuf>,
}

impl SystemEnvironment {
    /// Captures the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self> {
        let working_directory =
            std::env::current_dir().context("failed to determine the working directory")?;
        Ok(Self::with_working_directory(working_directory))
    }

    #[must_use]
    pub const fn with_working_directory(working_directory: PathBuf) -> Self {
        Self {
            working_directory,
            program_files_x86: None,
        }
    }

    /// Overrides the `Program Files (x86)` directory instead of reading it from the environment.
    #[must_use]
    pub fn with_program_files_x86(mut self, path: Option<PathBuf>) -> Self {
        self.program_files_x86 = path;
        self
    }
}

impl Environment for SystemEnvironment {
    fn is_unix(&self) -> bool {
        cfg!(unix)
    }

    fn special_path(&self, path: SpecialPath) -> Option<PathBuf> {
        match path {
            SpecialPath::ProgramFilesX86 => self.program_files_x86.clone().or_else(|| {
                if cfg!(windows) {
                    // 32-bit Windows has no "(x86)" variant.
                    std::env::var_os("ProgramFiles(x86)")
                        .or_else(|| std::env::var_os("ProgramFiles"))
                        .map(PathBuf::from)
                } else {
                    None
                }
            }),
        }
    }

    fn working_directory(&self) -> PathBuf {
        self.working_directory.clone()
    }
}

/// [`ProcessRunner`] spawning real processes through [`ProcessBuilder`].
///
/// Output lines are logged at debug level and kept in the result. Exit codes
/// are returned, never judged; the cancellation token kills the child.
#[derive(Debug, Clone, Default)]
pub struct SystemProcessRunner {
    cancel_token: CancellationToken,
}

impl SystemProcessRunner {
    #[must_use]
    pub const fn new(cancel_token: CancellationToken) -> Self {
        Self { cancel_token }
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run<'a>(&'a self, request: &'a ProcessRequest) -> BoxFuture<'a, Result<ProcessOutput>> {
        Box::pin(async move {
            let mut builder = ProcessBuilder::new(&request.program)
                .args(&request.arguments)
                .envs(request.environment.clone())
                .maybe_timeout(request.timeout)
                .encoding(request.output_encoding)
                .flags(ProcessFlags::ALLOW_FAILURE | ProcessFlags::VERBATIM_ARGS)
                .stdout_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
                .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING);
            if let Some(cwd) = &request.working_directory {
                builder = builder.cwd(cwd);
            }
            builder.run_with_cancellation(self.cancel_token.clone()).await
        })
    }
}

/// [`ToolLocator`] searching registered directories first, then `PATH`.
#[derive(Debug, Clone, Default)]
pub struct SearchPathLocator {
    search_paths: Vec<PathBuf>,
    working_directory: PathBuf,
}

impl SearchPathLocator {
    #[must_use]
    pub const fn new(search_paths: Vec<PathBuf>, working_directory: PathBuf) -> Self {
        Self {
            search_paths,
            working_directory,
        }
    }

    fn resolve_registered(&self, name: &str) -> Option<PathBuf> {
        if self.search_paths.is_empty() {
            return None;
        }
        let joined = std::env::join_paths(&self.search_paths).ok()?;
        which::which_in(name, Some(joined), &self.working_directory).ok()
    }
}

impl ToolLocator for SearchPathLocator {
    fn resolve(&self, executable_names: &[&str]) -> Option<PathBuf> {
        executable_names.iter().find_map(|name| {
            let found = self
                .resolve_registered(name)
                .or_else(|| ProcessBuilder::find(name));
            trace!(executable = %name, found = ?found, "tool lookup");
            found
        })
    }
}

/// Builds a [`ToolHost`] wired to the real machine.
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined.
pub fn system_host(
    search_paths: Vec<PathBuf>,
    program_files_x86: Option<PathBuf>,
    cancel_token: CancellationToken,
) -> Result<ToolHost> {
    let environment = SystemEnvironment::new()?.with_program_files_x86(program_files_x86);
    let locator = SearchPathLocator::new(search_paths, environment.working_directory());
    Ok(ToolHost::new(
        Arc::new(LocalFileSystem),
        Arc::new(environment),
        Arc::new(SystemProcessRunner::new(cancel_token)),
        Arc::new(locator),
    ))
}
