//! Results of one external tool invocation.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Why a tool invocation failed.
#[derive(Debug, Error)]
pub enum RunError {
    /// A required input file does not exist.
    #[error("{what} not found: {}", .path.display())]
    FileNotFound {
        /// What the file is (e.g. `"ontology"`).
        what: &'static str,
        /// The missing path.
        path: PathBuf,
    },

    /// The tool could not be started: the artifact is missing or the
    /// process failed to spawn.
    #[error("failed to launch {program}: {reason}")]
    Launch {
        /// Program or artifact that could not be started.
        program: String,
        /// Cause reported by the OS or the precondition check.
        reason: String,
    },

    /// Reading the tool's output or polling its status failed.
    #[error("I/O error while running {program}: {source}")]
    Io {
        /// Program being run.
        program: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The timeout was zero.
    #[error("timeout must be greater than zero")]
    InvalidTimeout,

    /// The tool exited unsuccessfully (only raised by
    /// [`ProcessResult::into_strict`]).
    #[error("tool exited unsuccessfully ({}): {}", exit_label(.code), .stderr.trim())]
    NonZeroExit {
        /// Exit code, `None` if killed by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Captured output of a tool that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,
    /// Exit code, `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Wall-clock run time.
    pub elapsed: Duration,
}

impl ProcessOutput {
    /// Returns true if the tool exited with code 0.
    #[must_use]
    pub fn exited_successfully(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Outcome of one tool invocation.
///
/// The exit code does not decide between `Success` and `Failure`: a tool
/// that ran to completion is a `Success` carrying whatever it printed. Use
/// [`ProcessResult::into_strict`] to treat a non-zero exit as a failure.
#[derive(Debug)]
pub enum ProcessResult {
    /// The tool ran to completion.
    Success(ProcessOutput),
    /// The tool could not be run.
    Failure(RunError),
    /// The tool exceeded its time budget and was killed and reaped.
    TimedOut {
        /// PID the tool ran under.
        pid: u32,
        /// Time waited before the kill.
        elapsed: Duration,
    },
}

impl ProcessResult {
    /// Returns true for [`ProcessResult::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessResult::Success(_))
    }

    /// Returns true for [`ProcessResult::TimedOut`].
    #[must_use]
    pub fn is_timed_out(&self) -> bool {
        matches!(self, ProcessResult::TimedOut { .. })
    }

    /// Captured standard output, if the tool ran to completion.
    #[must_use]
    pub fn stdout(&self) -> Option<&str> {
        match self {
            ProcessResult::Success(output) => Some(&output.stdout),
            _ => None,
        }
    }

    /// Converts a completed run with a non-zero exit code into
    /// [`RunError::NonZeroExit`].
    #[must_use]
    pub fn into_strict(self) -> Self {
        match self {
            ProcessResult::Success(output) if !output.exited_successfully() => {
                ProcessResult::Failure(RunError::NonZeroExit {
                    code: output.exit_code,
                    stderr: output.stderr,
                })
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(code: Option<i32>) -> ProcessResult {
        ProcessResult::Success(ProcessOutput {
            stdout: "rules".to_string(),
            stderr: "boom\n".to_string(),
            exit_code: code,
            elapsed: Duration::from_millis(5),
        })
    }

    #[test]
    fn exit_code_does_not_gate_success() {
        let result = completed(Some(1));
        assert!(result.is_success());
        assert_eq!(result.stdout(), Some("rules"));
    }

    #[test]
    fn strict_mode_fails_on_non_zero_exit() {
        match completed(Some(2)).into_strict() {
            ProcessResult::Failure(RunError::NonZeroExit { code, stderr }) => {
                assert_eq!(code, Some(2));
                assert_eq!(stderr, "boom\n");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(completed(Some(0)).into_strict().is_success());
        assert!(!completed(None).into_strict().is_success());
    }

    #[test]
    fn non_zero_exit_message_mentions_code_and_stderr() {
        let err = RunError::NonZeroExit {
            code: Some(3),
            stderr: "  oops \n".to_string(),
        };
        assert_eq!(err.to_string(), "tool exited unsuccessfully (exit code 3): oops");
    }

    #[test]
    fn timed_out_is_distinct() {
        let result = ProcessResult::TimedOut {
            pid: 42,
            elapsed: Duration::from_secs(1),
        };
        assert!(result.is_timed_out());
        assert!(!result.is_success());
        assert!(result.stdout().is_none());
    }
}
