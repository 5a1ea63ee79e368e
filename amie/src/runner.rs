//! Bounded execution of the rule-mining tool.
//!
//! The child is owned by a guard that kills and reaps it on every exit path,
//! so the spawned process never outlives [`run`]. Its own descendants are not
//! tracked (see [`Launcher`]). Output streams are drained by reader
//! threads while the caller polls for exit; the poll loop is the only place
//! the caller blocks, and it gives up after the timeout.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, ExitStatus};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::command::{AmieCommand, Launcher};
use crate::outcome::{ProcessOutput, ProcessResult, RunError};
use crate::params::AmieParameters;

/// Per-stream capture limit; output past it is dropped.
pub const MAX_STREAM_BYTES: usize = 16 * 1024 * 1024;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long to wait for a reader thread after the child has exited.
/// Descendants that inherited the pipes can keep them open indefinitely.
const READER_GRACE: Duration = Duration::from_secs(2);

/// Runs the tool on `ontology` in the current working directory.
///
/// See [`run_in`].
#[must_use]
pub fn run(
    ontology: &Path,
    params: &AmieParameters,
    launcher: &Launcher,
    timeout: Duration,
) -> ProcessResult {
    match std::env::current_dir() {
        Ok(workdir) => run_in(ontology, params, launcher, timeout, &workdir),
        Err(source) => ProcessResult::Failure(RunError::Io {
            program: launcher.program().to_string_lossy().into_owned(),
            source,
        }),
    }
}

/// Runs the tool on `ontology` with `workdir` as working directory.
///
/// Preconditions are checked before anything is spawned: the ontology must
/// exist ([`RunError::FileNotFound`]), the tool artifact must exist
/// ([`RunError::Launch`]) and the timeout must be non-zero
/// ([`RunError::InvalidTimeout`]).
#[must_use]
pub fn run_in(
    ontology: &Path,
    params: &AmieParameters,
    launcher: &Launcher,
    timeout: Duration,
    workdir: &Path,
) -> ProcessResult {
    if !ontology.exists() {
        return ProcessResult::Failure(RunError::FileNotFound {
            what: "ontology",
            path: ontology.to_path_buf(),
        });
    }
    let tool = launcher.tool();
    if !tool.exists() {
        return ProcessResult::Failure(RunError::Launch {
            program: tool.display().to_string(),
            reason: "tool artifact not found".to_string(),
        });
    }
    let command = AmieCommand::build(launcher, params, ontology);
    run_command(&command, workdir, timeout)
}

/// Spawns `command`, waits up to `timeout` and captures its output.
///
/// On timeout the child is killed and reaped before returning
/// [`ProcessResult::TimedOut`].
#[must_use]
pub fn run_command(command: &AmieCommand, workdir: &Path, timeout: Duration) -> ProcessResult {
    if timeout.is_zero() {
        return ProcessResult::Failure(RunError::InvalidTimeout);
    }
    let program = command.program().to_string_lossy().into_owned();

    let child = match command.to_command(workdir).spawn() {
        Ok(child) => child,
        Err(err) => {
            warn!(%program, error = %err, "failed to spawn tool");
            return ProcessResult::Failure(RunError::Launch {
                program,
                reason: err.to_string(),
            });
        }
    };
    let mut guard = ChildGuard::new(child);
    let pid = guard.id();
    info!(pid, command = %command, workdir = %workdir.display(), "tool started");

    let stdout_rx = spawn_reader(guard.child.stdout.take(), "stdout");
    let stderr_rx = spawn_reader(guard.child.stderr.take(), "stderr");

    let start = Instant::now();
    let status = match wait_with_timeout(&mut guard, start, timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            guard.kill_and_reap();
            let elapsed = start.elapsed();
            warn!(pid, ?elapsed, "tool exceeded its time budget and was killed");
            return ProcessResult::TimedOut { pid, elapsed };
        }
        Err(source) => return ProcessResult::Failure(RunError::Io { program, source }),
    };
    let elapsed = start.elapsed();
    debug!(pid, ?status, ?elapsed, "tool exited");

    let stdout = collect(stdout_rx, "stdout");
    let stderr = collect(stderr_rx, "stderr");
    match (stdout, stderr) {
        (Ok(stdout), Ok(stderr)) => {
            info!(
                pid,
                exit_code = ?status.code(),
                stdout_bytes = stdout.len(),
                stderr_bytes = stderr.len(),
                "tool finished"
            );
            ProcessResult::Success(ProcessOutput {
                stdout,
                stderr,
                exit_code: status.code(),
                elapsed,
            })
        }
        (Err(source), _) | (_, Err(source)) => ProcessResult::Failure(RunError::Io { program, source }),
    }
}

/// Polls until the child exits (`Some`) or the timeout expires (`None`).
fn wait_with_timeout(
    guard: &mut ChildGuard,
    start: Instant,
    timeout: Duration,
) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = guard.try_wait()? {
            return Ok(Some(status));
        }
        let waited = start.elapsed();
        if waited >= timeout {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(timeout - waited));
    }
}

/// Owns a child process and guarantees it is killed and reaped when dropped.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    fn id(&self) -> u32 {
        self.child.id()
    }

    fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
        let status = self.child.try_wait()?;
        if status.is_some() {
            self.reaped = true;
        }
        Ok(status)
    }

    fn kill_and_reap(&mut self) {
        if self.reaped {
            return;
        }
        if let Err(err) = self.child.kill() {
            debug!(pid = self.child.id(), error = %err, "kill failed; child may have exited");
        }
        match self.child.wait() {
            Ok(status) => debug!(pid = self.child.id(), ?status, "child reaped"),
            Err(err) => warn!(pid = self.child.id(), error = %err, "failed to reap child"),
        }
        self.reaped = true;
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.kill_and_reap();
    }
}

fn spawn_reader<R>(stream: Option<R>, name: &'static str) -> Receiver<io::Result<String>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    match stream {
        Some(stream) => {
            thread::spawn(move || {
                // The receiver is gone if the run already returned.
                let _ = tx.send(read_capped(stream, name));
            });
        }
        None => {
            let _ = tx.send(Ok(String::new()));
        }
    }
    rx
}

fn read_capped<R: Read>(mut reader: R, name: &'static str) -> io::Result<String> {
    let mut output = Vec::new();
    let mut total = 0usize;
    let mut buf = [0u8; 8192];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        total = total.saturating_add(n);
        if output.len() < MAX_STREAM_BYTES {
            let take = (MAX_STREAM_BYTES - output.len()).min(n);
            output.extend_from_slice(&buf[..take]);
        }
    }

    if total > MAX_STREAM_BYTES {
        warn!(stream = name, total, kept = MAX_STREAM_BYTES, "tool output truncated");
    }
    Ok(String::from_utf8_lossy(&output).into_owned())
}

fn collect(rx: Receiver<io::Result<String>>, name: &'static str) -> io::Result<String> {
    match rx.recv_timeout(READER_GRACE) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            warn!(stream = name, "stream still open after tool exit; output abandoned");
            Ok(String::new())
        }
        Err(RecvTimeoutError::Disconnected) => Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{name} reader thread ended without a result"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_capped_keeps_small_output() {
        let text = read_capped(&b"hello\nworld"[..], "stdout").unwrap();
        assert_eq!(text, "hello\nworld");
    }

    #[test]
    fn read_capped_decodes_lossily() {
        let text = read_capped(&[0x66, 0xff, 0x6f][..], "stdout").unwrap();
        assert_eq!(text, "f\u{fffd}o");
    }

    #[test]
    fn zero_timeout_is_rejected_before_spawn() {
        let cmd = AmieCommand::build(
            &Launcher::binary("/definitely/not/here"),
            &AmieParameters::default(),
            Path::new("o.ttl"),
        );
        let result = run_command(&cmd, Path::new("."), Duration::ZERO);
        assert!(matches!(result, ProcessResult::Failure(RunError::InvalidTimeout)));
    }

    #[test]
    fn spawn_failure_is_a_launch_failure() {
        let cmd = AmieCommand::build(
            &Launcher::binary("/definitely/not/here/amie"),
            &AmieParameters::default(),
            Path::new("o.ttl"),
        );
        let result = run_command(&cmd, Path::new("."), Duration::from_secs(5));
        assert!(matches!(result, ProcessResult::Failure(RunError::Launch { .. })));
    }

    #[test]
    fn missing_ontology_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_in(
            &dir.path().join("missing.ttl"),
            &AmieParameters::default(),
            &Launcher::jar("java", dir.path().join("amie.jar")),
            Duration::from_secs(1),
            dir.path(),
        );
        assert!(matches!(
            result,
            ProcessResult::Failure(RunError::FileNotFound { what: "ontology", .. })
        ));
    }
}
