// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use super::fake::{FakeEnvironment, FakeHost};
use super::system::{LocalFileSystem, SearchPathLocator, SystemEnvironment, SystemProcessRunner};
use super::{Environment, FileSystem, ProcessRequest, ProcessRunner, SpecialPath, ToolLocator};
#[cfg(unix)]
use crate::core::process::encoding::Encoding;

#[test]
fn test_make_absolute_keeps_absolute_paths() {
    let env = SystemEnvironment::with_working_directory(std::env::temp_dir());
    let absolute = std::env::temp_dir().join("report.xml");

    assert_eq!(env.make_absolute(&absolute), absolute);
}

#[test]
fn test_make_absolute_joins_working_directory() {
    let cwd = std::env::temp_dir().join("build");
    let env = SystemEnvironment::with_working_directory(cwd.clone());

    assert_eq!(
        env.make_absolute(Path::new("bin/a.dll")),
        cwd.join("bin/a.dll")
    );
}

#[test]
fn test_program_files_override_wins() {
    let env = SystemEnvironment::with_working_directory(PathBuf::from("."))
        .with_program_files_x86(Some(PathBuf::from("D:/Tools")));

    assert_eq!(
        env.special_path(SpecialPath::ProgramFilesX86),
        Some(PathBuf::from("D:/Tools"))
    );
}

#[cfg(unix)]
#[test]
fn test_unix_has_no_program_files() {
    let env = SystemEnvironment::with_working_directory(PathBuf::from("/"));

    assert!(env.is_unix());
    assert_eq!(env.special_path(SpecialPath::ProgramFilesX86), None);
}

#[test]
fn test_local_file_system_distinguishes_files_and_directories() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let file = dir.path().join("metrics.exe");
    std::fs::write(&file, b"").expect("failed to write file");

    assert!(LocalFileSystem.is_file(&file));
    assert!(!LocalFileSystem.is_file(dir.path()));
    assert!(!LocalFileSystem.is_file(&dir.path().join("missing.exe")));
}

#[cfg(unix)]
#[test]
fn test_search_path_locator_prefers_registered_directories() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let tool = dir.path().join("vsmetrics-test-tool");
    std::fs::write(&tool, b"#!/bin/sh\n").expect("failed to write tool");
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755))
        .expect("failed to mark tool executable");

    let locator = SearchPathLocator::new(vec![dir.path().to_path_buf()], dir.path().to_path_buf());

    assert_eq!(locator.resolve(&["vsmetrics-test-tool"]), Some(tool));
    assert_eq!(locator.resolve(&["nonexistent_program_12345"]), None);
}

#[test]
fn test_search_path_locator_falls_back_to_path() {
    let locator = SearchPathLocator::default();

    assert!(locator.resolve(&["nonexistent_program_12345", "cargo"]).is_some());
}

#[cfg(unix)]
#[tokio::test]
async fn test_system_runner_reports_failure_codes_without_error() {
    let runner = SystemProcessRunner::default();
    let request = ProcessRequest {
        program: PathBuf::from("/bin/sh"),
        arguments: vec!["-c".to_string(), "exit 7".to_string()],
        ..ProcessRequest::default()
    };

    let output = runner.run(&request).await.expect("runner should not judge exit codes");

    assert_eq!(output.exit_code(), 7);
}

#[cfg(unix)]
#[tokio::test]
async fn test_system_runner_keeps_output() {
    let request = ProcessRequest {
        program: PathBuf::from("/bin/sh"),
        arguments: vec!["-c".to_string(), "echo report; echo warning >&2".to_string()],
        ..ProcessRequest::default()
    };

    let output = SystemProcessRunner::default()
        .run(&request)
        .await
        .expect("process should run");

    assert_eq!(output.stdout(), "report");
    assert_eq!(output.stderr(), "warning");
}

#[cfg(unix)]
#[tokio::test]
async fn test_system_runner_decodes_requested_encoding() {
    let script = r"printf 'Assembly Müller.dll
'; i=0; while [ $i -lt 2048 ]; do echo 0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef; i=$((i+1)); done; printf 'Fehler ü
' >&2";
    let request = ProcessRequest {
        program: PathBuf::from("/bin/sh"),
        arguments: vec!["-c".to_string(), script.to_string()],
        output_encoding: Encoding::Acp,
        ..ProcessRequest::default()
    };

    let output = SystemProcessRunner::default()
        .run(&request)
        .await
        .expect("process should run");

    assert!(output.success());
    assert_eq!(output.stdout().lines().next(), Some("Assembly Müller.dll"));
    assert_eq!(output.stdout().lines().count(), 2049);
    assert_eq!(output.stderr(), "Fehler ü");
}

#[cfg(unix)]
#[tokio::test]
async fn test_system_runner_passes_tokens_verbatim() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let out = dir.path().join("args.txt");
    let request = ProcessRequest {
        program: PathBuf::from("/bin/sh"),
        arguments: vec![
            "-c".to_string(),
            "printf '%s\\n' \"$1\" > \"$OUT_FILE\"".to_string(),
            "sh".to_string(),
            "/f:\"/work/a b.dll\"".to_string(),
        ],
        environment: [("OUT_FILE".to_string(), out.display().to_string())].into(),
        ..ProcessRequest::default()
    };

    let output = SystemProcessRunner::default()
        .run(&request)
        .await
        .expect("process should run");

    assert!(output.success());
    let written = std::fs::read_to_string(&out).expect("script should write its argument");
    insta::assert_snapshot!(written.trim_end(), @r#"/f:"/work/a b.dll""#);
}

#[test]
fn test_fake_environment_joins_windows_paths() {
    let env = FakeEnvironment::windows();

    assert_eq!(
        env.make_absolute(Path::new("bin/a.dll")),
        PathBuf::from("C:/work/bin/a.dll")
    );
    assert_eq!(
        env.make_absolute(Path::new("D:/out/report.xml")),
        PathBuf::from("D:/out/report.xml")
    );
}

#[test]
fn test_fake_host_records_probes_and_lookups() {
    let fake = FakeHost::windows()
        .with_file("C:/tools/metrics.exe")
        .with_located("metrics.exe", "C:/tools/metrics.exe");
    let host = fake.host();

    assert!(host.file_system().is_file(Path::new("C:/tools/metrics.exe")));
    assert!(!host.file_system().is_file(Path::new("C:/other.exe")));
    assert_eq!(
        host.tool_locator().resolve(&["metrics.exe"]),
        Some(PathBuf::from("C:/tools/metrics.exe"))
    );

    assert_eq!(fake.file_system.probes().len(), 2);
    assert_eq!(fake.tool_locator.lookups(), vec!["metrics.exe".to_string()]);
}
