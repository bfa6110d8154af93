use std::{
    ffi::OsString,
    io::{self, Read},
    process::{Child, Command, Stdio},
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::error::ProcessError;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of a single external invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the child was terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// stdout without the trailing newline the tools append
    pub fn trimmed_stdout(&self) -> &str {
        self.stdout.trim()
    }
}

/// Runs one external program to completion and captures what it printed.
///
/// Implementations block the calling thread until the child exits.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, ProcessError>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, ProcessError> {
        (**self).run(program, args)
    }
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for Arc<R> {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, ProcessError> {
        (**self).run(program, args)
    }
}

/// [`ProcessRunner`] backed by [`std::process::Command`].
///
/// Without a timeout a hung child blocks the caller forever. With one, the
/// child is killed and reaped once the deadline passes.
///
/// Only the direct child is killed. A grandchild that inherited stdout or
/// stderr keeps those pipes open, so on timeout the reader threads are left
/// detached and finish once the grandchild exits; the call itself returns at
/// the deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub const fn new() -> Self {
        Self { timeout: None }
    }

    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn wait(&self, program: &str, child: &mut Child) -> Result<Option<i32>, ProcessError> {
        let io_error = |source: io::Error| ProcessError::Io {
            program: program.to_owned(),
            source,
        };

        let Some(timeout) = self.timeout else {
            return child.wait().map(|status| status.code()).map_err(io_error);
        };

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait().map_err(io_error)? {
                Some(status) => return Ok(status.code()),
                None if Instant::now() >= deadline => {
                    // already-exited races are harmless here
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProcessError::TimedOut {
                        program: program.to_owned(),
                        timeout,
                    });
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        }
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, ProcessError> {
        log::debug!("Running `{program}` with {} argument(s)", args.len());

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => ProcessError::NotFound {
                    program: program.to_owned(),
                },
                _ => ProcessError::Spawn {
                    program: program.to_owned(),
                    source,
                },
            })?;

        // Both pipes are drained concurrently so a chatty child never stalls on a full pipe.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // on error the readers are detached rather than joined; see the type docs
        let status = self.wait(program, &mut child)?;
        let output = CommandOutput {
            status,
            stdout: collect(program, stdout)?,
            stderr: collect(program, stderr)?,
        };

        if !output.success() {
            log::debug!("`{program}` exited with status {:?}", output.status);
        }

        Ok(output)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut bytes = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut bytes)?;
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    })
}

fn collect(
    program: &str,
    handle: JoinHandle<io::Result<String>>,
) -> Result<String, ProcessError> {
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("output reader panicked")))
        .map_err(|source| ProcessError::Io {
            program: program.to_owned(),
            source,
        })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str) -> Vec<OsString> {
        vec!["-c".into(), script.into()]
    }

    #[test]
    fn test_captures_stdout_of_successful_command() {
        let output = SystemRunner::new().run("sh", &shell("echo hello")).unwrap();

        assert!(output.success());
        assert_eq!(output.stdout, "hello\n");
        assert_eq!(output.trimmed_stdout(), "hello");
    }

    #[test]
    fn test_non_zero_exit_keeps_stderr_as_diagnostic() {
        let output = SystemRunner::new()
            .run("sh", &shell("echo broken >&2; exit 3"))
            .unwrap();

        assert!(!output.success());
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stderr.trim(), "broken");
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let result = SystemRunner::new().run("definitely-not-a-real-binary-4c1f", &[]);

        match result {
            Err(ProcessError::NotFound { program }) => {
                assert_eq!(program, "definitely-not-a-real-binary-4c1f");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_hung_child_is_killed_after_timeout() {
        let runner = SystemRunner::with_timeout(Duration::from_millis(50));
        let started = Instant::now();

        let result = runner.run("sleep", &["5".into()]);

        let error = result.unwrap_err();
        assert!(matches!(error, ProcessError::TimedOut { .. }));
        assert_eq!(error.program(), "sleep");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_returns_while_grandchild_holds_pipes() {
        let runner = SystemRunner::with_timeout(Duration::from_millis(50));
        let started = Instant::now();

        let result = runner.run("sh", &shell("sleep 5 & sleep 5"));

        assert!(matches!(result, Err(ProcessError::TimedOut { .. })));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_timeout_does_not_affect_fast_commands() {
        let runner = SystemRunner::with_timeout(Duration::from_secs(10));
        let output = runner.run("sh", &shell("printf done")).unwrap();

        assert_eq!(output.stdout, "done");
    }
}
