// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags, Termination};
use super::encoding::Encoding;
use crate::error::{ProcessError, Result};

#[cfg(unix)]
fn sh(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("/bin/sh").args(["-c", script])
}

#[cfg(unix)]
fn keep_output(builder: ProcessBuilder) -> ProcessBuilder {
    builder
        .stdout_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
        .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
}

async fn run(builder: ProcessBuilder) -> Result<ProcessOutput> {
    builder.run_with_cancellation(CancellationToken::new()).await
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_echo() {
    let output = run(keep_output(ProcessBuilder::new("echo").args(["hello"])))
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout().trim(), @"hello");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_exit_code_allowed() {
    let output = run(sh("exit 42").flags(ProcessFlags::ALLOW_FAILURE))
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert_eq!(output.termination(), Termination::Exited);
    assert!(!output.success());
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_exit_code_rejected() {
    let err = run(sh("exit 3"))
        .await
        .expect_err("non-zero exit should fail");

    match err.downcast_ref::<ProcessError>() {
        Some(ProcessError::NonZeroExit { command, code }) => {
            assert_eq!(command, "sh");
            assert_eq!(*code, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_env() {
    let builder = sh("echo $VSMETRICS_TEST_VAR").envs([("VSMETRICS_TEST_VAR", "test_value")]);
    let output = run(keep_output(builder))
        .await
        .expect("process should succeed");

    insta::assert_snapshot!(output.stdout().trim(), @"test_value");
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cwd() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = run(keep_output(ProcessBuilder::new("pwd").cwd(dir.path())))
        .await
        .expect("pwd should succeed");

    let reported = std::path::PathBuf::from(output.stdout().trim());
    assert_eq!(
        reported.canonicalize().expect("pwd output should exist"),
        dir.path().canonicalize().expect("temp dir should exist")
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_output_not_piped_without_flags() {
    let output = run(sh("echo dropped")
        .stdout_flags(StreamFlags::empty())
        .stderr_flags(StreamFlags::empty()))
    .await
    .expect("process should succeed");

    assert!(output.success());
    assert!(output.stdout().is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_invalid_utf8_output_is_drained() {
    // 4096 lines of 64 bytes after the invalid line, well past a pipe buffer.
    let script = r#"printf 'Gr\374\303e\n'
i=0
while [ $i -lt 4096 ]; do
  echo 0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef
  i=$((i+1))
done"#;

    let output = run(keep_output(sh(script)).maybe_timeout(Some(Duration::from_secs(30))))
        .await
        .expect("process should succeed");

    assert!(output.success(), "exit code {}", output.exit_code());
    let lines: Vec<&str> = output.stdout().lines().collect();
    assert_eq!(lines.len(), 4097);
    assert_eq!(lines[0], "Gr\u{FFFD}\u{FFFD}e");
    assert_eq!(
        lines[4096],
        "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_code_page_output_is_decoded() {
    let output = run(keep_output(sh(r"printf 'Gr\374\337e\r\n'")).encoding(Encoding::Acp))
        .await
        .expect("process should succeed");

    insta::assert_snapshot!(output.stdout(), @"Grüße");
}

#[test]
fn test_encoding_decode() {
    assert_eq!(Encoding::Utf8.decode("Grüße".as_bytes()), "Grüße");
    assert_eq!(Encoding::Utf8.decode(b"a\xffb"), "a\u{FFFD}b");
    assert_eq!(Encoding::Acp.decode(b"caf\xe9"), "café");
    assert_eq!(Encoding::Oem.decode(b"\x8f\xe0\xa8"), "При");
}

#[test]
fn test_encoding_deserialize() {
    let encoding: Encoding =
        serde_json::from_value(serde_json::json!("oem")).expect("known encoding");
    assert_eq!(encoding, Encoding::Oem);
    assert_eq!(encoding.to_string(), "oem");
    assert!(serde_json::from_value::<Encoding>(serde_json::json!("latin9")).is_err());
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_timeout_kills_child() {
    let output = run(sh("exec sleep 10").maybe_timeout(Some(Duration::from_millis(100))))
        .await
        .expect("timed out process is reported, not an error");

    assert_eq!(output.termination(), Termination::TimedOut);
    assert!(!output.success());
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_timeout_returns_while_grandchild_holds_pipes() {
    // The shell forks `sleep`, which keeps stdout open after the shell is killed.
    let started = Instant::now();
    let builder = keep_output(sh("sleep 6; echo done")).maybe_timeout(Some(Duration::from_secs(1)));
    let output = run(builder)
        .await
        .expect("timed out process is reported, not an error");

    assert_eq!(output.termination(), Termination::TimedOut);
    assert!(started.elapsed() < Duration::from_secs(4), "took {:?}", started.elapsed());
    assert!(!output.stdout().contains("done"));
}

#[tokio::test]
async fn test_process_cancelled_before_spawn() {
    let token = CancellationToken::new();
    token.cancel();

    let output = ProcessBuilder::new("nonexistent_program_12345")
        .run_with_cancellation(token)
        .await
        .expect("cancelled run should not spawn");

    assert_eq!(output.termination(), Termination::Interrupted);
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cancelled_while_running() {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let output = sh("exec sleep 10")
        .run_with_cancellation(token)
        .await
        .expect("interrupted process is reported, not an error");

    assert_eq!(output.termination(), Termination::Interrupted);
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cancel_returns_while_grandchild_holds_pipes() {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let output = keep_output(sh("sleep 6; echo done"))
        .run_with_cancellation(token)
        .await
        .expect("interrupted process is reported, not an error");

    assert_eq!(output.termination(), Termination::Interrupted);
    assert!(started.elapsed() < Duration::from_secs(4), "took {:?}", started.elapsed());
}

#[tokio::test]
async fn test_spawn_failure() {
    let err = run(ProcessBuilder::new("nonexistent_program_12345"))
        .await
        .expect_err("spawning a missing program should fail");

    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::SpawnFailed { .. })
    ));
}

#[test]
fn test_command_line_quotes_spaces_only_once() {
    let builder = ProcessBuilder::new("metrics.exe").args([
        "/f:\"C:/My Project/a.dll\"",
        "with space",
        "/q",
    ]);

    insta::assert_snapshot!(
        builder.command_line(),
        @r#"metrics.exe /f:"C:/My Project/a.dll" "with space" /q"#
    );
}

#[test]
fn test_executable_lookup() {
    assert!(ProcessBuilder::find("cargo").is_some());
    assert!(ProcessBuilder::find("nonexistent_program_12345").is_none());
}
