//! Subprocess execution seam for the external `pass` binary.
//!
//! Store operations describe what to run as an [`Invocation`] and hand it
//! to a [`Runner`]. The real [`PassRunner`] spawns the binary; tests
//! substitute a capturing fake, so the external tool does not need to be
//! installed to exercise the rest of the crate.

use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Result, StoreError};

/// Default name of the external binary, resolved via `PATH`.
pub const DEFAULT_PROGRAM: &str = "pass";

/// How often a waiting runner re-checks the child and the cancel flag.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

// ---------------------------------------------------------------------------
// Invocation
// ---------------------------------------------------------------------------

/// One fully-specified external call.
///
/// The environment list is applied to this invocation's child process
/// only; the parent environment is never mutated, so concurrent callers
/// with different options cannot interfere with each other.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// The pass subcommand, passed as the first argument.
    pub subcommand: String,
    /// Flag and positional arguments, flags first.
    pub args: Vec<String>,
    /// Bytes written to the child's standard input, if any.
    pub stdin: Option<Vec<u8>>,
    /// Extra environment variables for this invocation only.
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// Start building an invocation of the given subcommand.
    pub fn new(subcommand: impl Into<String>) -> Self {
        Self {
            subcommand: subcommand.into(),
            ..Self::default()
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the bytes to write to the child's standard input.
    pub fn stdin(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(bytes.into());
        self
    }

    /// Add an environment variable for this invocation.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

// ---------------------------------------------------------------------------
// Runner trait
// ---------------------------------------------------------------------------

/// Executes invocations against the external binary.
///
/// Consumers depend on this trait rather than on [`PassRunner`] so the
/// subprocess boundary can be substituted (a fake capturing invocations
/// and returning canned output) without the real tool installed.
pub trait Runner {
    /// Run one invocation to completion and return its captured stdout.
    ///
    /// # Errors
    ///
    /// Returns an execution-flavored [`StoreError`] if the process cannot
    /// be spawned, exits non-zero, or is cancelled.
    fn run(&self, invocation: Invocation) -> Result<Vec<u8>>;
}

impl<R: Runner + ?Sized> Runner for &R {
    fn run(&self, invocation: Invocation) -> Result<Vec<u8>> {
        (**self).run(invocation)
    }
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Cloneable cancellation handle shared between a caller and in-flight runs.
///
/// Tripping the flag makes every runner holding a clone kill its child at
/// the next poll and return [`StoreError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// A fresh, untripped flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// PassRunner
// ---------------------------------------------------------------------------

/// Spawns the real binary, one process per invocation, fire-once.
#[derive(Debug, Clone)]
pub struct PassRunner {
    program: String,
    timeout: Option<Duration>,
    cancel: Option<CancelFlag>,
}

impl Default for PassRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl PassRunner {
    /// A runner invoking [`DEFAULT_PROGRAM`] with no deadline.
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// A runner invoking a different program (used by tests).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
            cancel: None,
        }
    }

    /// Kill the child if it is still running after `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Kill the child when `flag` is tripped.
    pub fn cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Wait for the child, honoring the cancel flag and deadline.
    ///
    /// On abort the child is killed and reaped before returning.
    fn wait(&self, child: &mut Child, subcommand: &str, start: Instant) -> Result<ExitStatus> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {}
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(StoreError::Spawn {
                        program: self.program.clone(),
                        source,
                    });
                }
            }

            let cancelled = self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled);
            let expired = self.timeout.is_some_and(|t| start.elapsed() >= t);
            if cancelled || expired {
                let _ = child.kill();
                let _ = child.wait();
                return Err(StoreError::Cancelled {
                    subcommand: subcommand.to_string(),
                    elapsed: start.elapsed(),
                });
            }

            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Runner for PassRunner {
    fn run(&self, invocation: Invocation) -> Result<Vec<u8>> {
        let subcommand = invocation.subcommand.clone();
        debug!(program = %self.program, subcommand = %subcommand, args = ?invocation.args, "spawning");

        let mut cmd = Command::new(&self.program);
        cmd.arg(&invocation.subcommand)
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|source| StoreError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        // Drain stdout/stderr on reader threads so a chatty child cannot
        // fill a pipe buffer and stall while we wait on it.
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        if let Some(bytes) = invocation.stdin.as_deref() {
            if let Err(source) = write_stdin(&mut child, bytes) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(StoreError::Spawn {
                    program: self.program.clone(),
                    source,
                });
            }
        }

        let status = self.wait(&mut child, &subcommand, start)?;

        let stdout = join_reader(stdout);
        let stderr = join_reader(stderr);

        if !status.success() {
            return Err(StoreError::CommandFailed {
                subcommand,
                code: status.code(),
                output: combined_output(&stderr, &stdout),
            });
        }

        debug!(subcommand = %subcommand, bytes = stdout.len(), "command succeeded");
        Ok(stdout)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

type ReaderHandle = Option<JoinHandle<Vec<u8>>>;

/// Read a pipe to the end on a background thread.
fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> ReaderHandle {
    pipe.map(|mut r| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = r.read_to_end(&mut buf);
            buf
        })
    })
}

fn join_reader(handle: ReaderHandle) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Write the stdin payload and close the pipe.
///
/// A child that exits without reading its stdin closes the pipe early; the
/// exit status decides the outcome in that case, so a broken pipe is not an
/// error here.
fn write_stdin(child: &mut Child, bytes: &[u8]) -> std::io::Result<()> {
    let Some(mut sink) = child.stdin.take() else {
        return Ok(());
    };
    match sink.write_all(bytes) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e),
    }
}

/// Merge captured stderr and stdout into one diagnostic string.
fn combined_output(stderr: &[u8], stdout: &[u8]) -> String {
    let err = String::from_utf8_lossy(stderr);
    let out = String::from_utf8_lossy(stdout);
    let err = err.trim();
    let out = out.trim();
    match (err.is_empty(), out.is_empty()) {
        (false, false) => format!("{err}\n{out}"),
        (false, true) => err.to_string(),
        _ => out.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn invocation_builder_accumulates() {
        let inv = Invocation::new("insert")
            .arg("--force")
            .args(["--multiline", "web/mail"])
            .stdin(b"secret".to_vec())
            .env("PASSWORD_STORE_DIR", "/tmp/store");

        assert_eq!(inv.subcommand, "insert");
        assert_eq!(inv.args, vec!["--force", "--multiline", "web/mail"]);
        assert_eq!(inv.stdin.as_deref(), Some(&b"secret"[..]));
        assert_eq!(
            inv.env,
            vec![("PASSWORD_STORE_DIR".to_string(), "/tmp/store".to_string())]
        );
    }

    #[test]
    fn cancel_flag_is_shared_between_clones() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_cancelled());
        flag.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn combined_output_prefers_stderr_first() {
        assert_eq!(combined_output(b"err\n", b"out\n"), "err\nout");
        assert_eq!(combined_output(b"err\n", b""), "err");
        assert_eq!(combined_output(b"", b"out\n"), "out");
        assert_eq!(combined_output(b"", b""), "");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let runner = PassRunner::with_program("definitely-not-a-real-binary-xyz");
        let err = runner.run(Invocation::new("show")).unwrap_err();
        match err {
            StoreError::Spawn { program, .. } => {
                assert_eq!(program, "definitely-not-a-real-binary-xyz");
            }
            other => panic!("expected Spawn, got: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout_of_a_successful_child() {
        // `echo hello` -- "hello" plays the role of the subcommand.
        let runner = PassRunner::with_program("echo");
        let out = runner.run(Invocation::new("hello")).unwrap();
        assert_eq!(out, b"hello\n");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_maps_to_command_failed_with_diagnostics() {
        let runner = PassRunner::with_program("sh");
        let err = runner
            .run(Invocation::new("-c").arg("echo oops >&2; exit 3"))
            .unwrap_err();
        match err {
            StoreError::CommandFailed {
                subcommand,
                code,
                output,
            } => {
                assert_eq!(subcommand, "-c");
                assert_eq!(code, Some(3));
                assert_eq!(output, "oops");
            }
            other => panic!("expected CommandFailed, got: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn stdin_bytes_reach_the_child() {
        let runner = PassRunner::with_program("cat");
        let out = runner
            .run(Invocation::new("-").stdin(b"multi\nline\npayload".to_vec()))
            .unwrap();
        assert_eq!(out, b"multi\nline\npayload");
    }

    #[cfg(unix)]
    #[test]
    fn invocation_env_is_visible_to_the_child() {
        let runner = PassRunner::with_program("sh");
        let out = runner
            .run(
                Invocation::new("-c")
                    .arg("printf %s \"$PASSEL_TEST_VALUE\"")
                    .env("PASSEL_TEST_VALUE", "42"),
            )
            .unwrap();
        assert_eq!(out, b"42");
    }

    #[cfg(unix)]
    #[test]
    fn deadline_kills_a_hanging_child() {
        let runner = PassRunner::with_program("sleep").timeout(Duration::from_millis(50));
        let start = Instant::now();
        let err = runner.run(Invocation::new("5")).unwrap_err();
        assert!(err.is_cancelled(), "expected Cancelled, got: {err:?}");
        assert!(
            start.elapsed() < Duration::from_secs(4),
            "child was not killed promptly"
        );
    }

    #[cfg(unix)]
    #[test]
    fn tripped_flag_cancels_the_run() {
        let flag = CancelFlag::new();
        flag.cancel();
        let runner = PassRunner::with_program("sleep").cancel_flag(flag);
        let err = runner.run(Invocation::new("5")).unwrap_err();
        assert!(err.is_cancelled(), "expected Cancelled, got: {err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn child_that_ignores_stdin_still_reports_its_exit_status() {
        // `true` exits immediately without reading; the closed pipe must
        // not be reported as a failure.
        let runner = PassRunner::with_program("true");
        let out = runner
            .run(Invocation::new("ignored").stdin(b"unread".to_vec()))
            .unwrap();
        assert_eq!(out, b"");
    }
}
