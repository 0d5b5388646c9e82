//! Execution of the program under test
//!
//! Each invocation spawns one child process, feeds it the recorded stdin on
//! its own task while stdout and stderr are drained concurrently, and joins
//! everything before returning. Nothing about the child outlives the call.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::common::config::ExecutorConfig;
use crate::common::{strip_carriage_returns, Error, Result};

/// Actual outcome of one run of the executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub return_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the configured executable on testcase sources
#[derive(Debug, Clone)]
pub struct Executor {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl Executor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    /// Bound how long a single run may take
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &ExecutorConfig) -> Self {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        Self::new(config.program.clone(), config.args.clone()).with_timeout(timeout)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Bare names are looked up on PATH; anything with a separator is used as given
    fn resolve_program(&self) -> PathBuf {
        let path = Path::new(&self.program);
        if path.components().count() > 1 {
            return path.to_path_buf();
        }
        which::which(&self.program).unwrap_or_else(|_| path.to_path_buf())
    }

    /// Run the executable on `source`, feeding it `stdin`
    pub async fn invoke(&self, source: &Path, stdin: &str) -> Result<ExecutionResult> {
        let program = self.resolve_program();
        tracing::debug!(
            program = %program.display(),
            args = ?self.args,
            source = %source.display(),
            stdin_len = stdin.len(),
            "Invoking executable"
        );

        let mut child = Command::new(&program)
            .args(&self.args)
            .arg(source)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::execution(&self.program, &e))?;

        let mut child_stdin = child.stdin.take().ok_or_else(|| {
            Error::execution(
                &self.program,
                &io::Error::new(io::ErrorKind::BrokenPipe, "stdin was not captured"),
            )
        })?;

        let input = stdin.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            let written = child_stdin.write_all(&input).await;
            drop(child_stdin);
            match written {
                // The child may exit without consuming its input
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        });
        let writer_abort = writer.abort_handle();

        let run = async {
            let output = child.wait_with_output().await?;
            writer
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;
            Ok::<_, io::Error>(output)
        };

        let bounded = async {
            let output = match self.timeout {
                Some(limit) => tokio::time::timeout(limit, run)
                    .await
                    .map_err(|_| Error::ExecutionTimeout(limit.as_secs()))?,
                None => run.await,
            };
            output.map_err(|e| Error::execution(&self.program, &e))
        };

        let output = tokio::select! {
            output = bounded => output,
            _ = tokio::signal::ctrl_c() => Err(Error::Interrupted),
        };
        writer_abort.abort();
        let output = output.inspect_err(|e| tracing::warn!(error = %e, "Execution failed"))?;

        let result = ExecutionResult {
            return_code: return_code(output.status),
            stdout: strip_carriage_returns(&String::from_utf8_lossy(&output.stdout)),
            stderr: strip_carriage_returns(&String::from_utf8_lossy(&output.stderr)),
        };
        tracing::debug!(
            return_code = result.return_code,
            stdout_len = result.stdout.len(),
            stderr_len = result.stderr.len(),
            "Execution finished"
        );
        Ok(result)
    }
}

/// Exit code, or the negated signal number for a child killed by a signal
fn return_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}
