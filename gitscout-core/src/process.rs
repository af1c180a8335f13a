//! External process invocation
//!
//! Adapters never touch `tokio::process` directly; they describe a command
//! as an [`Invocation`] and hand it to a [`ProcessRunner`]. Tests substitute
//! a scripted runner so the orchestration logic stays pure.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::{Error, Result};

/// A single external command to execute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Create an invocation of the given program with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
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

    /// Set the working directory the process starts in.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

/// Captured output of a completed process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Decoded standard output.
    pub stdout: String,
    /// Decoded standard error.
    pub stderr: String,
    /// Exit code; -1 when the process was terminated by a signal.
    pub code: i32,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

impl From<std::process::Output> for ProcessOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code().unwrap_or(-1),
        }
    }
}

/// Executes external commands on behalf of the adapters.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a command to completion and capture stdout, stderr and exit code.
    ///
    /// A non-zero exit is a normal, reportable outcome; only a failed spawn
    /// (missing executable, permission problem) is an error.
    async fn run(&self, invocation: Invocation) -> Result<ProcessOutput>;

    /// Run `producer | consumer` with a live pipe between them and capture
    /// the consumer's output.
    ///
    /// Both processes are spawned up front; the consumer starts reading
    /// before the producer finishes. The consumer's exit code is the
    /// authoritative result. The producer's own exit code is not inspected,
    /// so a producer that dies mid-stream while the consumer exits 0 on the
    /// truncated input reports success.
    async fn pipe(&self, producer: Invocation, consumer: Invocation) -> Result<ProcessOutput>;
}

/// Production runner backed by `tokio::process`.
pub struct SystemRunner;

fn command_for(invocation: &Invocation) -> Command {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);
    if let Some(dir) = &invocation.cwd {
        cmd.current_dir(dir);
    }
    cmd
}

fn spawn_error(invocation: &Invocation, message: impl Into<String>) -> Error {
    Error::Spawn {
        program: invocation.program.clone(),
        message: message.into(),
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, invocation: Invocation) -> Result<ProcessOutput> {
        let mut cmd = command_for(&invocation);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let output = cmd
            .output()
            .await
            .map_err(|e| spawn_error(&invocation, e.to_string()))?;
        Ok(output.into())
    }

    async fn pipe(&self, producer: Invocation, consumer: Invocation) -> Result<ProcessOutput> {
        let mut upstream = command_for(&producer)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error(&producer, e.to_string()))?;
        let mut source = upstream
            .stdout
            .take()
            .ok_or_else(|| spawn_error(&producer, "stdout was not captured"))?;

        let mut downstream = command_for(&consumer)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(&consumer, e.to_string()))?;
        let mut sink = downstream
            .stdin
            .take()
            .ok_or_else(|| spawn_error(&consumer, "stdin was not captured"))?;

        // Forward bytes as they arrive so the consumer filters while the
        // producer is still streaming. Dropping the sink closes the pipe and
        // signals end-of-stream to the consumer.
        let forward = tokio::spawn(async move {
            let _ = tokio::io::copy(&mut source, &mut sink).await;
        });

        let output = downstream.wait_with_output().await?;
        let _ = forward.await;
        // Reap the producer; its exit code is deliberately not part of the
        // result.
        let _ = upstream.wait().await;

        Ok(output.into())
    }
}
