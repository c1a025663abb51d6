//! Executes one check as an isolated child process and classifies the result.
//!
//! Every fault on this path is converted into a `CheckResult`; nothing here
//! returns `Err` to the orchestrator. The distinction between "the tool ran
//! and found problems" (Failed) and "the tool could not run" (Errored) is
//! preserved in the failure detail text.

use crate::core::catalog::CheckDescriptor;
use crate::core::output;
use crate::core::report::{CheckOutcome, CheckResult};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Upper bound on bytes drained per stream. Overflow truncates, never fails.
const CAPTURE_LIMIT_BYTES: usize = 64 * 1024;
/// Upper bound on the stored excerpt of each stream.
const EXCERPT_LIMIT_CHARS: usize = 2000;
/// Upper bound on the stored failure detail.
const DETAIL_LIMIT_CHARS: usize = 300;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct ExecRequest<'a> {
    pub descriptor: &'a CheckDescriptor,
    pub category: &'a str,
    pub project_root: &'a Path,
    pub url: Option<&'a str>,
    pub timeout: Duration,
}

/// Run one descriptor to completion, timeout, or launch fault.
pub fn execute(req: &ExecRequest<'_>) -> CheckResult {
    let script_path = req.project_root.join(&req.descriptor.script);
    if !script_path.is_file() {
        // Soft-skip: an absent tool never penalizes the verdict.
        return result_of(req, CheckOutcome::Skipped, 0, String::new(), String::new(), None);
    }

    let mut command = Command::new(&req.descriptor.program);
    command
        .arg(&script_path)
        .arg(req.project_root)
        .current_dir(req.project_root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if req.descriptor.url_aware {
        if let Some(url) = req.url {
            command.arg(url);
        }
    }

    let start = Instant::now();
    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) => {
            return result_of(
                req,
                CheckOutcome::Errored,
                elapsed_ms(start),
                String::new(),
                String::new(),
                Some(format!(
                    "failed to launch check process '{}': {}",
                    req.descriptor.program, err
                )),
            );
        }
    };

    // Drain both pipes off-thread so a chatty child never fills a pipe
    // buffer and deadlocks against the wait loop below.
    let stdout_reader = child.stdout.take().map(drain_capped);
    let stderr_reader = child.stderr.take().map(drain_capped);

    let status = match wait_with_timeout(&mut child, start, req.timeout) {
        WaitOutcome::Exited(status) => status,
        WaitOutcome::TimedOut => {
            let _ = child.kill();
            let _ = child.wait(); // reap
            // The check's own children may keep the pipes open past the
            // kill; the captured text is not worth blocking on.
            drop(stdout_reader);
            drop(stderr_reader);
            return result_of(
                req,
                CheckOutcome::TimedOut,
                elapsed_ms(start),
                String::new(),
                String::new(),
                Some(format!("timeout after {}s", req.timeout.as_secs())),
            );
        }
        WaitOutcome::WaitFailed(err) => {
            let _ = child.kill();
            let _ = child.wait();
            drop(stdout_reader);
            drop(stderr_reader);
            return result_of(
                req,
                CheckOutcome::Errored,
                elapsed_ms(start),
                String::new(),
                String::new(),
                Some(format!("failed waiting on check process: {}", err)),
            );
        }
    };

    let duration_ms = elapsed_ms(start);
    let stdout_text = join_capture(stdout_reader);
    let stderr_text = join_capture(stderr_reader);

    if status.success() {
        result_of(req, CheckOutcome::Passed, duration_ms, stdout_text, stderr_text, None)
    } else {
        let detail = if stderr_text.trim().is_empty() {
            format!("exit code {}", status.code().unwrap_or(-1))
        } else {
            output::compact_line(&stderr_text, DETAIL_LIMIT_CHARS)
        };
        result_of(
            req,
            CheckOutcome::Failed,
            duration_ms,
            stdout_text,
            stderr_text,
            Some(detail),
        )
    }
}

enum WaitOutcome {
    Exited(ExitStatus),
    TimedOut,
    WaitFailed(std::io::Error),
}

fn wait_with_timeout(child: &mut Child, start: Instant, timeout: Duration) -> WaitOutcome {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return WaitOutcome::Exited(status),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    return WaitOutcome::TimedOut;
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(err) => return WaitOutcome::WaitFailed(err),
        }
    }
}

fn drain_capped<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut captured = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    // Keep reading past the cap so the child never blocks on
                    // a full pipe; bytes beyond the cap are dropped.
                    let room = CAPTURE_LIMIT_BYTES.saturating_sub(captured.len());
                    captured.extend_from_slice(&buf[..n.min(room)]);
                }
            }
        }
        String::from_utf8_lossy(&captured).into_owned()
    })
}

fn join_capture(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn result_of(
    req: &ExecRequest<'_>,
    outcome: CheckOutcome,
    duration_ms: u64,
    stdout_text: String,
    stderr_text: String,
    failure_detail: Option<String>,
) -> CheckResult {
    CheckResult {
        name: req.descriptor.name.clone(),
        category: req.category.to_string(),
        outcome,
        duration_ms,
        stdout_excerpt: output::excerpt(&stdout_text, EXCERPT_LIMIT_CHARS),
        stderr_excerpt: output::excerpt(&stderr_text, EXCERPT_LIMIT_CHARS),
        failure_detail: failure_detail.map(|d| output::compact_line(&d, DETAIL_LIMIT_CHARS)),
    }
}
