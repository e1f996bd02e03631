// src/system/executor.rs

use crate::constants::DEFAULT_TIMEOUT_SECS;
use crate::models::{CommandInvocation, CommandOutput};
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command as StdCommand, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// The time limit applied when the caller does not choose one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

/// How often a running child is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command could not be parsed: {0}")]
    CommandParse(String),
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("Command '{command}' could not be started: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while waiting for command '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Command '{command}' timed out after {timeout:?}.")]
    Timeout { command: String, timeout: Duration },
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

type Capture = Receiver<io::Result<Vec<u8>>>;

/// Drains a child pipe on its own thread so a chatty child never blocks on a
/// full pipe buffer while we wait for it. The bytes arrive on the returned channel.
fn spawn_capture<R: Read + Send + 'static>(mut pipe: R) -> Capture {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let result = pipe.read_to_end(&mut buffer).map(|_| buffer);
        // The receiver is gone once the run has timed out; nothing to report then.
        sender.send(result).ok();
    });
    receiver
}

/// Outcome of collecting one captured stream.
enum Collected {
    Bytes(Vec<u8>),
    DeadlinePassed,
}

/// Waits for a capture thread's result, but never past `deadline`.
///
/// A descendant of the child can keep the pipe open after the child itself
/// exits, so reading to end-of-file is bounded by the same deadline as the wait.
fn collect_capture(
    capture: Option<Capture>,
    deadline: Option<Instant>,
    command: &str,
) -> Result<Collected, ExecutionError> {
    let Some(receiver) = capture else {
        return Ok(Collected::Bytes(Vec::new()));
    };

    let received = match deadline {
        Some(deadline) => {
            match receiver.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                Ok(result) => result,
                Err(RecvTimeoutError::Timeout) => return Ok(Collected::DeadlinePassed),
                Err(RecvTimeoutError::Disconnected) => Err(capture_lost()),
            }
        }
        None => receiver.recv().unwrap_or_else(|_| Err(capture_lost())),
    };

    received
        .map(Collected::Bytes)
        .map_err(|e| ExecutionError::Wait {
            command: command.to_string(),
            source: e,
        })
}

/// The error reported when a capture thread ends without sending its result.
fn capture_lost() -> io::Error {
    log::warn!("An output capture thread stopped before delivering its result.");
    io::Error::other("output capture thread terminated unexpectedly")
}

fn decode(bytes: Vec<u8>, command: &str) -> Result<String, ExecutionError> {
    String::from_utf8(bytes).map_err(|e| ExecutionError::InvalidUtf8Output {
        command: command.to_string(),
        source: e,
    })
}

/// Polls `child` until it exits or `deadline` passes. `Ok(None)` means the
/// deadline passed first; a `None` deadline waits indefinitely.
fn wait_with_deadline(
    child: &mut Child,
    deadline: Option<Instant>,
) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Ok(None);
                }
                POLL_INTERVAL.min(deadline - now)
            }
            None => POLL_INTERVAL,
        };
        thread::sleep(pause);
    }
}

fn kill_and_reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        log::warn!("Failed to kill child process {}: {}", child.id(), e);
    }
    child.wait().ok();
}

/// Runs a command to completion and captures its output as text.
///
/// The child inherits the current environment, gets a closed stdin and, when
/// `cwd` is given, runs in that directory. The exit status is returned as-is;
/// a failing command is still an `Ok` result.
///
/// # Errors
/// * `Spawn` if the program could not be launched (e.g. it does not exist).
/// * `Timeout` if the child is still running after `timeout`, or if its output
///   is still open at that point (a background descendant holding the pipes).
///   A child still running is killed before this error is returned. A timeout
///   too large to represent is treated as no limit.
/// * `InvalidUtf8Output` if stdout or stderr is not valid UTF-8.
pub fn run_command(
    invocation: &CommandInvocation,
    cwd: Option<&Path>,
    timeout: Duration,
) -> Result<CommandOutput, ExecutionError> {
    let command_line = invocation.to_string();

    let mut command = StdCommand::new(invocation.program());
    command
        .args(invocation.arguments())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dunce::simplified(dir));
    }

    log::debug!("Running '{}' (timeout {:?})", command_line, timeout);
    let mut child = command.spawn().map_err(|e| ExecutionError::Spawn {
        command: command_line.clone(),
        source: e,
    })?;

    let stdout_capture = child.stdout.take().map(spawn_capture);
    let stderr_capture = child.stderr.take().map(spawn_capture);

    // A timeout too large to represent as an instant means no time limit.
    let deadline = Instant::now().checked_add(timeout);
    let timed_out = |command: String| ExecutionError::Timeout { command, timeout };

    let status = match wait_with_deadline(&mut child, deadline) {
        Ok(Some(status)) => status,
        Ok(None) => {
            log::debug!(
                "Command '{}' exceeded its timeout, killing PID {}.",
                command_line,
                child.id()
            );
            kill_and_reap(&mut child);
            // The capture threads are detached: a grandchild may still hold the
            // pipes open, and waiting for them here would block past the deadline.
            return Err(timed_out(command_line));
        }
        Err(e) => {
            kill_and_reap(&mut child);
            return Err(ExecutionError::Wait {
                command: command_line,
                source: e,
            });
        }
    };

    let stdout = collect_capture(stdout_capture, deadline, &command_line)?;
    let stderr = collect_capture(stderr_capture, deadline, &command_line)?;
    let (stdout, stderr) = match (stdout, stderr) {
        (Collected::Bytes(stdout), Collected::Bytes(stderr)) => (
            decode(stdout, &command_line)?,
            decode(stderr, &command_line)?,
        ),
        _ => {
            log::debug!(
                "Command '{}' exited but its output stayed open past the timeout.",
                command_line
            );
            return Err(timed_out(command_line));
        }
    };
    log::debug!("Command '{}' finished with {}", command_line, status);

    Ok(CommandOutput {
        stdout,
        stderr,
        status,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use tempfile::TempDir;

    fn sh(script: &str) -> CommandInvocation {
        CommandInvocation::new("sh").arg("-c").arg(script)
    }

    #[test]
    fn test_captures_stdout_stderr_and_exit_code() {
        let output = run_command(
            &sh("echo out; echo err >&2; exit 3"),
            None,
            Duration::from_secs(10),
        )
        .unwrap();

        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
        assert_eq!(output.code(), Some(3));
        assert!(!output.success());
    }

    #[test]
    fn test_successful_command_reports_zero() {
        let output = run_command(
            &CommandInvocation::new("echo").arg("hello"),
            None,
            DEFAULT_TIMEOUT,
        )
        .unwrap();

        assert_eq!(output.stdout, "hello\n");
        assert!(output.stderr.is_empty());
        assert_eq!(output.code(), Some(0));
    }

    #[test]
    fn test_runs_in_requested_directory() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("marker.txt"), "present").unwrap();

        let output = run_command(&sh("cat marker.txt"), Some(tmp.path()), DEFAULT_TIMEOUT).unwrap();

        assert_eq!(output.stdout, "present");
    }

    #[test]
    fn test_large_output_does_not_deadlock() {
        let output = run_command(
            &sh("i=0; while [ $i -lt 20000 ]; do echo 0123456789; i=$((i+1)); done"),
            None,
            Duration::from_secs(30),
        )
        .unwrap();

        assert_eq!(output.stdout.len(), 20000 * 11);
    }

    #[test]
    fn test_slow_command_times_out() {
        let started = Instant::now();

        let result = run_command(
            &CommandInvocation::new("sleep").arg("5"),
            None,
            Duration::from_millis(200),
        );

        match result {
            Err(ExecutionError::Timeout { timeout, .. }) => {
                assert_eq!(timeout, Duration::from_millis(200));
            }
            other => panic!("expected a timeout, got {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_background_descendant_holding_output_times_out() {
        let started = Instant::now();

        let result = run_command(&sh("sleep 6 & echo hi"), None, Duration::from_millis(500));

        assert!(
            matches!(result, Err(ExecutionError::Timeout { .. })),
            "expected a timeout, got {result:?}"
        );
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_unrepresentable_timeout_means_no_limit() {
        let output = run_command(
            &CommandInvocation::new("true"),
            None,
            Duration::from_secs(u64::MAX),
        )
        .unwrap();

        assert!(output.success());
    }

    #[test]
    fn test_lost_capture_thread_is_an_error() {
        let (sender, receiver) = mpsc::channel::<io::Result<Vec<u8>>>();
        drop(sender);

        let result = collect_capture(Some(receiver), None, "echo");

        assert!(matches!(result, Err(ExecutionError::Wait { .. })));
    }

    #[test]
    fn test_missing_program_fails_to_spawn() {
        let result = run_command(
            &CommandInvocation::new("achira-kit-definitely-not-a-real-program"),
            None,
            DEFAULT_TIMEOUT,
        );

        match result {
            Err(ExecutionError::Spawn { source, .. }) => {
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("expected a spawn failure, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_output_is_reported() {
        let result = run_command(&sh("printf '\\377\\376'"), None, DEFAULT_TIMEOUT);

        assert!(matches!(
            result,
            Err(ExecutionError::InvalidUtf8Output { .. })
        ));
    }
}
