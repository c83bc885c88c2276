// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory host collaborators.
//!
//! Every fake records what it was asked, so tests can check which paths were
//! probed and whether a process was ever started.
//!
//! ```text
//! FakeHost::windows()  C:/Program Files (x86), cwd C:/work
//! FakeHost::unix()     no special paths,       cwd /work
//!   .with_file(path)          make FakeFileSystem report a file
//!   .with_located(name, path) make FakeToolLocator resolve a name
//!   .with_exit_code(code)     make RecordingProcessRunner return code
//!   .host()                   --> ToolHost
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::future::BoxFuture;

use super::{
    Environment, FileSystem, ProcessRequest, ProcessRunner, SpecialPath, ToolHost, ToolLocator,
};
use crate::core::process::builder::ProcessOutput;
use crate::error::Result;

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// File system holding a fixed set of files.
#[derive(Debug, Default)]
pub struct FakeFileSystem {
    files: Mutex<BTreeSet<PathBuf>>,
    probes: Mutex<Vec<PathBuf>>,
}

impl FakeFileSystem {
    pub fn add_file(&self, path: impl Into<PathBuf>) {
        lock(&self.files).insert(path.into());
    }

    /// Every path passed to [`FileSystem::is_file`], in call order.
    #[must_use]
    pub fn probes(&self) -> Vec<PathBuf> {
        lock(&self.probes).clone()
    }
}

impl FileSystem for FakeFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        lock(&self.probes).push(path.to_path_buf());
        lock(&self.files).contains(path)
    }
}

/// Environment with fixed answers.
#[derive(Debug, Clone)]
pub struct FakeEnvironment {
    unix: bool,
    program_files_x86: Option<PathBuf>,
    working_directory: PathBuf,
}

impl FakeEnvironment {
    #[must_use]
    pub fn windows() -> Self {
        Self {
            unix: false,
            program_files_x86: Some(PathBuf::from("C:/Program Files (x86)")),
            working_directory: PathBuf::from("C:/work"),
        }
    }

    #[must_use]
    pub fn unix() -> Self {
        Self {
            unix: true,
            program_files_x86: None,
            working_directory: PathBuf::from("/work"),
        }
    }

    #[must_use]
    pub fn with_program_files_x86(mut self, path: Option<PathBuf>) -> Self {
        self.program_files_x86 = path;
        self
    }

    #[must_use]
    pub fn with_working_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_directory = path.into();
        self
    }
}

impl Environment for FakeEnvironment {
    fn is_unix(&self) -> bool {
        self.unix
    }

    fn special_path(&self, path: SpecialPath) -> Option<PathBuf> {
        match path {
            SpecialPath::ProgramFilesX86 => self.program_files_x86.clone(),
        }
    }

    fn working_directory(&self) -> PathBuf {
        self.working_directory.clone()
    }

    // Joins textually so Windows-style fake paths behave the same on every OS.
    fn make_absolute(&self, path: &Path) -> PathBuf {
        let text = path.to_string_lossy();
        let rooted = text.starts_with('/') || text.as_bytes().get(1) == Some(&b':');
        if rooted {
            path.to_path_buf()
        } else {
            PathBuf::from(format!(
                "{}/{}",
                self.working_directory.to_string_lossy().trim_end_matches('/'),
                text
            ))
        }
    }
}

/// Process runner that records requests instead of spawning anything.
#[derive(Debug, Default)]
pub struct RecordingProcessRunner {
    requests: Mutex<Vec<ProcessRequest>>,
    output: Mutex<ProcessOutput>,
}

impl RecordingProcessRunner {
    /// Sets the output returned for every subsequent request.
    pub fn respond_with(&self, output: ProcessOutput) {
        *lock(&self.output) = output;
    }

    /// Every request received, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<ProcessRequest> {
        lock(&self.requests).clone()
    }
}

impl ProcessRunner for RecordingProcessRunner {
    fn run<'a>(&'a self, request: &'a ProcessRequest) -> BoxFuture<'a, Result<ProcessOutput>> {
        lock(&self.requests).push(request.clone());
        let output = lock(&self.output).clone();
        Box::pin(async move { Ok(output) })
    }
}

/// Tool locator backed by a name-to-path table.
#[derive(Debug, Default)]
pub struct FakeToolLocator {
    tools: Mutex<BTreeMap<String, PathBuf>>,
    lookups: Mutex<Vec<String>>,
}

impl FakeToolLocator {
    pub fn register(&self, name: impl Into<String>, path: impl Into<PathBuf>) {
        lock(&self.tools).insert(name.into(), path.into());
    }

    /// Every executable name looked up, in call order.
    #[must_use]
    pub fn lookups(&self) -> Vec<String> {
        lock(&self.lookups).clone()
    }
}

impl ToolLocator for FakeToolLocator {
    fn resolve(&self, executable_names: &[&str]) -> Option<PathBuf> {
        let tools = lock(&self.tools);
        let mut lookups = lock(&self.lookups);
        executable_names.iter().find_map(|name| {
            lookups.push((*name).to_string());
            tools.get(*name).cloned()
        })
    }
}

/// A complete fake host with handles to every collaborator.
#[derive(Debug, Clone)]
pub struct FakeHost {
    pub file_system: Arc<FakeFileSystem>,
    pub environment: Arc<FakeEnvironment>,
    pub process_runner: Arc<RecordingProcessRunner>,
    pub tool_locator: Arc<FakeToolLocator>,
}

impl FakeHost {
    #[must_use]
    pub fn new(environment: FakeEnvironment) -> Self {
        Self {
            file_system: Arc::default(),
            environment: Arc::new(environment),
            process_runner: Arc::default(),
            tool_locator: Arc::default(),
        }
    }

    #[must_use]
    pub fn windows() -> Self {
        Self::new(FakeEnvironment::windows())
    }

    #[must_use]
    pub fn unix() -> Self {
        Self::new(FakeEnvironment::unix())
    }

    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.file_system.add_file(path);
        self
    }

    #[must_use]
    pub fn with_located(self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.tool_locator.register(name, path);
        self
    }

    #[must_use]
    pub fn with_exit_code(self, code: i32) -> Self {
        self.process_runner.respond_with(ProcessOutput::exited(code));
        self
    }

    /// The [`ToolHost`] view over these fakes.
    #[must_use]
    pub fn host(&self) -> ToolHost {
        ToolHost::new(
            self.file_system.clone(),
            self.environment.clone(),
            self.process_runner.clone(),
            self.tool_locator.clone(),
        )
    }
}
