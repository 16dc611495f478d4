//! Value types exchanged with the [`ProcessRunner`](super::ProcessRunner) port.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// An external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The child exited on its own (with any code).
    Exited,
    /// The child was killed after exceeding its timeout.
    TimedOut,
    /// The child could not be started at all.
    SpawnFailed,
}

/// Captured result of a command. Non-zero exits are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub outcome: ProcessOutcome,
}

impl ProcessOutput {
    pub fn exited(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
            outcome: ProcessOutcome::Exited,
        }
    }

    pub fn spawn_failed(message: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: message.into(),
            exit_code: 1,
            outcome: ProcessOutcome::SpawnFailed,
        }
    }

    pub fn timed_out(spec: &CommandSpec, after: Duration, stderr: impl Into<String>) -> Self {
        let mut stderr = stderr.into();
        if !stderr.is_empty() && !stderr.ends_with('\n') {
            stderr.push('\n');
        }
        stderr.push_str(&format!(
            "`{spec}` timed out after {}s and was killed",
            after.as_secs()
        ));

        Self {
            stdout: String::new(),
            stderr,
            exit_code: 1,
            outcome: ProcessOutcome::TimedOut,
        }
    }

    /// Exited with status zero.
    pub fn success(&self) -> bool {
        self.outcome == ProcessOutcome::Exited && self.exit_code == 0
    }

    /// The most useful diagnostic line: stderr if present, else stdout.
    pub fn diagnostic(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}
