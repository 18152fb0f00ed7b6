// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks --> JoinHandle<String>
//!   wait (or timeout --> kill --> readers get READER_GRACE, then stop)
//!   --> ProcessOutput { stdout, stderr, exit_code, timed_out }
//!
//! read_stream()
//!   read_until('\n') keeps line endings, so captured text is verbatim
//! ```

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::ProcessError;

/// How long readers may keep draining after a timed-out child is killed.
///
/// A grandchild that inherited the pipes keeps them open after the kill,
/// so EOF may never arrive.
pub(super) const READER_GRACE: Duration = Duration::from_secs(1);

/// Spawns a reader task for one stream if it is logged or captured.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
    cancel: &CancellationToken,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        return None;
    }
    stream.map(|stream| {
        let name = process_name.to_string();
        let cancel = cancel.clone();
        tokio::spawn(async move { read_stream(stream, flags, &name, stream_name, cancel).await })
    })
}

/// Waits for a reader task and returns what it captured.
async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

impl ProcessBuilder {
    /// Runs the child process, handling I/O streaming and waiting for completion.
    pub(super) async fn run_child(
        &self,
        name: &str,
        command_line: &str,
        child: &mut Child,
    ) -> Result<ProcessOutput, ProcessError> {
        let stop_readers = CancellationToken::new();
        let stdout_handle = spawn_reader(
            child.stdout.take(),
            self.stdout_config(),
            name,
            "stdout",
            &stop_readers,
        );
        let stderr_handle = spawn_reader(
            child.stderr.take(),
            self.stderr_config(),
            name,
            "stderr",
            &stop_readers,
        );

        let wait_error = |source| ProcessError::OutputError {
            command: command_line.to_string(),
            source,
        };

        let (exit_status, timed_out) = if let Some(timeout_duration) = self.timeout_duration() {
            tokio::select! {
                status = child.wait() => (status.map_err(wait_error)?, false),
                () = tokio::time::sleep(timeout_duration) => {
                    warn!(process = %name, timeout = ?timeout_duration, "process timed out");
                    child.kill().await.map_err(wait_error)?;
                    (child.wait().await.map_err(wait_error)?, true)
                }
            }
        } else {
            (child.wait().await.map_err(wait_error)?, false)
        };

        let grace = timed_out.then(|| {
            let stop_readers = stop_readers.clone();
            tokio::spawn(async move {
                tokio::time::sleep(READER_GRACE).await;
                stop_readers.cancel();
            })
        });

        let stdout = join_reader(stdout_handle).await;
        let stderr = join_reader(stderr_handle).await;

        if let Some(grace) = grace {
            grace.abort();
        }

        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            stdout,
            stderr,
            timed_out,
        ))
    }
}

/// Reads a stream to EOF (or until `cancel` fires), tracing each line and
/// keeping the raw text if asked.
async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
    cancel: CancellationToken,
) -> String
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut captured = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = tokio::select! {
            read = reader.read_until(b'\n', &mut line) => read,
            () = cancel.cancelled() => {
                // read_until leaves any partial line in the buffer
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    captured.extend_from_slice(&line);
                }
                trace!(process = %process_name, stream = %stream_name, "reader stopped");
                break;
            }
        };
        match read {
            Ok(0) => break,
            Ok(_) => {
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    let text = String::from_utf8_lossy(&line);
                    trace!(
                        process = %process_name,
                        stream = %stream_name,
                        line = %text.trim_end(),
                        "output"
                    );
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    captured.extend_from_slice(&line);
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

    String::from_utf8_lossy(&captured).into_owned()
}
