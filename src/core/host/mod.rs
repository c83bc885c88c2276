// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host collaborators consumed by tool runners.
//!
//! ```text
//! ToolHost
//!   FileSystem     is_file()
//!   Environment    is_unix() special_path() working_directory() make_absolute()
//!   ProcessRunner  run(ProcessRequest) --> ProcessOutput
//!   ToolLocator    resolve(executable names) --> Option<PathBuf>
//!
//! system.rs  LocalFileSystem, SystemEnvironment, SystemProcessRunner, SearchPathLocator
//! fake.rs    in-memory doubles with call recording (tests, `test-util` feature)
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;

use crate::core::process::builder::ProcessOutput;
use crate::core::process::encoding::Encoding;
use crate::error::Result;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;
pub mod system;

#[cfg(test)]
mod tests;

/// Well-known directories an [`Environment`] can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialPath {
    /// The 32-bit program files directory (`C:\Program Files (x86)`).
    ProgramFilesX86,
}

/// Read access to the file system.
pub trait FileSystem: Send + Sync {
    /// Returns true if `path` names an existing regular file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Facts about the machine the tool runs on.
pub trait Environment: Send + Sync {
    /// Returns true on Unix-like platforms.
    fn is_unix(&self) -> bool;

    /// Looks up a special directory; `None` if the platform has no such directory.
    fn special_path(&self, path: SpecialPath) -> Option<PathBuf>;

    /// The directory relative paths are resolved against.
    fn working_directory(&self) -> PathBuf;

    /// Resolves `path` against the working directory. Absolute paths are returned as-is.
    fn make_absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_directory().join(path)
        }
    }
}

/// Everything needed to start one process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessRequest {
    /// Executable to start.
    pub program: PathBuf,
    /// Argument tokens, passed verbatim.
    pub arguments: Vec<String>,
    /// Working directory; inherited when `None`.
    pub working_directory: Option<PathBuf>,
    /// Variables added to the inherited environment.
    pub environment: BTreeMap<String, String>,
    /// Kill the process after this long.
    pub timeout: Option<Duration>,
    /// Encoding of the process's stdout and stderr.
    pub output_encoding: Encoding,
}

/// Starts processes and reports how they ended.
///
/// Implementations must not interpret exit codes; that is the caller's policy.
pub trait ProcessRunner: Send + Sync {
    /// Runs `request` to completion.
    fn run<'a>(&'a self, request: &'a ProcessRequest) -> BoxFuture<'a, Result<ProcessOutput>>;
}

/// Finds tool executables on the lookup paths configured by the host.
pub trait ToolLocator: Send + Sync {
    /// Returns the first match for any of `executable_names`, in order.
    fn resolve(&self, executable_names: &[&str]) -> Option<PathBuf>;
}

/// Bundle of host collaborators shared by tool runners.
#[derive(Clone)]
pub struct ToolHost {
    file_system: Arc<dyn FileSystem>,
    environment: Arc<dyn Environment>,
    process_runner: Arc<dyn ProcessRunner>,
    tool_locator: Arc<dyn ToolLocator>,
}

impl ToolHost {
    #[must_use]
    pub fn new(
        file_system: Arc<dyn FileSystem>,
        environment: Arc<dyn Environment>,
        process_runner: Arc<dyn ProcessRunner>,
        tool_locator: Arc<dyn ToolLocator>,
    ) -> Self {
        Self {
            file_system,
            environment,
            process_runner,
            tool_locator,
        }
    }

    #[must_use]
    pub fn file_system(&self) -> &dyn FileSystem {
        self.file_system.as_ref()
    }

    #[must_use]
    pub fn environment(&self) -> &dyn Environment {
        self.environment.as_ref()
    }

    #[must_use]
    pub fn process_runner(&self) -> &dyn ProcessRunner {
        self.process_runner.as_ref()
    }

    #[must_use]
    pub fn tool_locator(&self) -> &dyn ToolLocator {
        self.tool_locator.as_ref()
    }
}

impl fmt::Debug for ToolHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolHost")
            .field("is_unix", &self.environment.is_unix())
            .field("working_directory", &self.environment.working_directory())
            .finish_non_exhaustive()
    }
}
