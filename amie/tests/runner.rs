//! Process runner tests against small shell scripts standing in for AMIE3.
#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rulemine_amie::{run_in, AmieParameters, Launcher, ProcessResult, RunError};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    ontology: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let ontology = dir.path().join("ontology.ttl");
        fs::write(&ontology, "<http://ex.org/a> <http://ex.org/p> <http://ex.org/b> .\n")
            .expect("write ontology");
        Self { dir, ontology }
    }

    fn script(&self, name: &str, body: &str) -> Launcher {
        let path = self.dir.path().join(name);
        fs::write(&path, body).expect("write script");
        Launcher::interpreted("sh", path)
    }

    fn run(&self, launcher: &Launcher, params: &AmieParameters, timeout: Duration) -> ProcessResult {
        run_in(&self.ontology, params, launcher, timeout, self.dir.path())
    }
}

#[test]
fn arguments_arrive_in_order_and_streams_stay_separate() {
    let fx = Fixture::new();
    let launcher = fx.script("echo.sh", "printf '%s\\n' \"$@\"\necho 'to stderr' >&2\n");
    let params = AmieParameters::new(0.5, 0.25, 2, true).expect("params");

    let ProcessResult::Success(output) = fx.run(&launcher, &params, Duration::from_secs(30)) else {
        panic!("expected a completed run");
    };
    let args: Vec<&str> = output.stdout.lines().collect();
    let ontology = fx.ontology.to_string_lossy();
    assert_eq!(
        args,
        ["-const", "-minc", "0.5", "-minpca", "0.25", "-nc", "2", ontology.as_ref()]
    );
    assert_eq!(output.stderr, "to stderr\n");
    assert_eq!(output.exit_code, Some(0));
}

#[test]
fn tool_runs_in_the_requested_directory() {
    let fx = Fixture::new();
    let launcher = fx.script("pwd.sh", "pwd -P\n");
    let ProcessResult::Success(output) =
        fx.run(&launcher, &AmieParameters::default(), Duration::from_secs(30))
    else {
        panic!("expected a completed run");
    };
    let expected = fx.dir.path().canonicalize().expect("canonicalize");
    assert_eq!(Path::new(output.stdout.trim()), expected);
}

#[test]
fn non_zero_exit_is_still_a_success_unless_strict() {
    let fx = Fixture::new();
    let launcher = fx.script("fail.sh", "echo partial\necho 'out of memory' >&2\nexit 3\n");

    let result = fx.run(&launcher, &AmieParameters::default(), Duration::from_secs(30));
    match &result {
        ProcessResult::Success(output) => {
            assert_eq!(output.stdout, "partial\n");
            assert_eq!(output.exit_code, Some(3));
        }
        other => panic!("unexpected {other:?}"),
    }

    match result.into_strict() {
        ProcessResult::Failure(RunError::NonZeroExit { code, stderr }) => {
            assert_eq!(code, Some(3));
            assert!(stderr.contains("out of memory"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn missing_tool_is_a_launch_failure() {
    let fx = Fixture::new();
    let launcher = Launcher::jar("java", fx.dir.path().join("nonexistent.jar"));
    let result = fx.run(&launcher, &AmieParameters::default(), Duration::from_secs(5));
    match result {
        ProcessResult::Failure(RunError::Launch { program, .. }) => {
            assert!(program.ends_with("nonexistent.jar"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn slow_tool_is_killed_and_reaped() {
    let fx = Fixture::new();
    let launcher = fx.script("slow.sh", "exec sleep 200\n");

    let start = Instant::now();
    let result = fx.run(&launcher, &AmieParameters::default(), Duration::from_secs(1));
    let waited = start.elapsed();

    let (pid, elapsed) = match result {
        ProcessResult::TimedOut { pid, elapsed } => (pid, elapsed),
        other => panic!("expected a timeout, got {other:?}"),
    };
    assert!(elapsed >= Duration::from_secs(1));
    assert!(waited < Duration::from_secs(10), "run took {waited:?}");

    if cfg!(target_os = "linux") {
        assert!(
            !Path::new(&format!("/proc/{pid}")).exists(),
            "process {pid} still present after timeout"
        );
    }
}

#[test]
fn forking_tool_still_times_out_promptly() {
    let fx = Fixture::new();
    let launcher = fx.script("forking.sh", "sleep 30 &\nwait\n");

    let start = Instant::now();
    let result = fx.run(&launcher, &AmieParameters::default(), Duration::from_secs(1));
    let waited = start.elapsed();

    let pid = match result {
        ProcessResult::TimedOut { pid, .. } => pid,
        other => panic!("expected a timeout, got {other:?}"),
    };
    assert!(waited < Duration::from_secs(10), "run took {waited:?}");
    if cfg!(target_os = "linux") {
        assert!(!Path::new(&format!("/proc/{pid}")).exists());
    }
}

#[test]
fn large_output_is_drained_without_blocking() {
    let fx = Fixture::new();
    // Well past a pipe buffer; the child would block if nobody read it.
    let launcher = fx.script(
        "chatty.sh",
        "i=0\nwhile [ $i -lt 20000 ]; do echo \"line $i of progress output\"; i=$((i+1)); done\n",
    );
    let ProcessResult::Success(output) =
        fx.run(&launcher, &AmieParameters::default(), Duration::from_secs(60))
    else {
        panic!("expected a completed run");
    };
    assert_eq!(output.stdout.lines().count(), 20000);
}
