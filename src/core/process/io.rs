// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output streaming and capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks (raw lines --> Encoding::decode)
//!   mpsc channels buffer lines
//!   wait | timeout -> kill | cancel -> kill
//!   readers drain to EOF; after a kill only for READER_GRACE
//!   --> ProcessOutput { stdout, stderr, exit_code, termination }
//! ```

use std::time::Duration;

use crate::error::{ProcessError, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags, Termination};
use super::encoding::Encoding;

/// How long output may keep draining after the child was killed.
///
/// Grandchildren that inherited the pipes can hold them open indefinitely.
const READER_GRACE: Duration = Duration::from_millis(500);

/// Spawns a reader task for a child stream if its flags need one.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    encoding: Encoding,
    process_name: &str,
    stream_name: &'static str,
    tx: mpsc::UnboundedSender<String>,
) -> Option<JoinHandle<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        return None;
    }
    stream.map(|stream| {
        let name = process_name.to_string();
        tokio::spawn(async move {
            read_stream(stream, flags, encoding, &name, stream_name, tx).await;
        })
    })
}

/// Drains a channel into a newline-joined string.
fn collect_output(rx: &mut mpsc::UnboundedReceiver<String>, flags: StreamFlags) -> String {
    if !flags.contains(StreamFlags::KEEP_IN_STRING) {
        return String::new();
    }
    let mut output = String::new();
    while let Ok(line) = rx.try_recv() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&line);
    }
    output
}

/// Waits for the reader tasks, giving up and aborting them after `grace`.
async fn await_readers(handles: [Option<JoinHandle<()>>; 2], grace: Option<Duration>, name: &str) {
    let mut handles: Vec<_> = handles.into_iter().flatten().collect();
    let drain = async {
        for handle in &mut handles {
            let _ = handle.await;
        }
    };

    let Some(grace) = grace else {
        drain.await;
        return;
    };
    let timed_out = tokio::time::timeout(grace, drain).await.is_err();
    if timed_out {
        debug!(process = %name, "output still open after kill, detaching readers");
        for handle in &handles {
            handle.abort();
        }
    }
}

/// Resolves after the timeout, or never when there is none.
async fn elapsed(timeout: Option<Duration>) {
    match timeout {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}

impl ProcessBuilder {
    /// Runs the child process, streaming its output until it exits or is killed.
    pub(super) async fn run_child(
        &self,
        name: &str,
        child: &mut Child,
        token: CancellationToken,
    ) -> Result<ProcessOutput> {
        // Drained only after exit, so a bounded channel could stall a chatty child.
        let (stdout_tx, mut stdout_rx) = mpsc::unbounded_channel::<String>();
        let (stderr_tx, mut stderr_rx) = mpsc::unbounded_channel::<String>();

        let stdout_handle = spawn_reader(
            child.stdout.take(),
            self.stdout_config(),
            self.output_encoding(),
            name,
            "stdout",
            stdout_tx,
        );
        let stderr_handle = spawn_reader(
            child.stderr.take(),
            self.stderr_config(),
            self.output_encoding(),
            name,
            "stderr",
            stderr_tx,
        );

        let wait_error = |source: std::io::Error| ProcessError::Wait {
            command: name.to_string(),
            source,
        };

        let timeout = self.timeout_duration();
        let (status, termination) = tokio::select! {
            status = child.wait() => (status.map_err(wait_error)?, Termination::Exited),
            () = elapsed(timeout) => {
                warn!(process = %name, timeout = ?timeout, "process timed out");
                child.kill().await.ok();
                (child.wait().await.map_err(wait_error)?, Termination::TimedOut)
            }
            () = token.cancelled() => {
                warn!(process = %name, "cancellation requested, terminating process");
                child.kill().await.ok();
                (child.wait().await.map_err(wait_error)?, Termination::Interrupted)
            }
        };

        let grace = (termination != Termination::Exited).then_some(READER_GRACE);
        await_readers([stdout_handle, stderr_handle], grace, name).await;

        Ok(ProcessOutput::new(
            status.code().unwrap_or(-1),
            collect_output(&mut stdout_rx, self.stdout_config()),
            collect_output(&mut stderr_rx, self.stderr_config()),
            termination,
        ))
    }
}

/// Strips a trailing LF or CRLF.
fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Reads a stream line by line, forwarding and/or keeping each line.
///
/// Lines are split on raw bytes and decoded afterwards, so output that is not
/// valid in `encoding` is still drained to EOF.
async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    encoding: Encoding,
    process_name: &str,
    stream_name: &str,
    tx: mpsc::UnboundedSender<String>,
) where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut raw = Vec::new();
    loop {
        raw.clear();
        match reader.read_until(b'\n', &mut raw).await {
            Ok(0) => break,
            Ok(_) => {
                let line = encoding.decode(trim_line_end(&raw)).into_owned();
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    debug!(process = %process_name, stream = %stream_name, "{line}");
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    let _ = tx.send(line);
                }
            }
            Err(e) => {
                warn!(
                    process = %process_name,
                    stream = %stream_name,
                    error = %e,
                    "error reading stream"
                );
                break;
            }
        }
    }
}
