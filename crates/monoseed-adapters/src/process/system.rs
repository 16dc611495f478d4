//! Process runner backed by `std::process::Command`.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};

use monoseed_core::application::ports::{CommandSpec, ProcessOutput, ProcessRunner};

/// How often a child with a deadline is polled.
const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// How long output readers get to finish once a timed-out group is killed.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Production [`ProcessRunner`].
///
/// stdout and stderr are drained on helper threads while the caller waits,
/// so a child that writes more than a pipe buffer never blocks. On unix the
/// child leads its own process group and a timeout kills the whole group,
/// including helpers such as `git-remote-https` or install scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    #[instrument(skip_all, fields(command = %spec))]
    fn run(&self, spec: &CommandSpec) -> ProcessOutput {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &spec.cwd {
            command.current_dir(cwd);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!(error = %e, "Failed to start command");
                return ProcessOutput::spawn_failed(format!(
                    "failed to start `{}`: {e}",
                    spec.program
                ));
            }
        };

        let stdout = Drain::start(child.stdout.take());
        let stderr = Drain::start(child.stderr.take());

        let status = match spec.timeout {
            Some(limit) => wait_with_deadline(&mut child, limit),
            None => child.wait().map(Some),
        };

        // Only a killed group is given a bounded grace period; descendants
        // of a normally exited child may still be flushing.
        let grace = matches!(status, Ok(None)).then_some(DRAIN_GRACE);
        let stdout = Drain::finish(stdout, grace);
        let stderr = Drain::finish(stderr, grace);

        match status {
            Ok(Some(status)) => {
                let code = status.code().unwrap_or(1);
                debug!(exit_code = code, "Command finished");
                ProcessOutput::exited(code, stdout, stderr)
            }
            Ok(None) => {
                let limit = spec.timeout.unwrap_or_default();
                warn!(timeout_secs = limit.as_secs(), "Command timed out");
                ProcessOutput::timed_out(spec, limit, stderr)
            }
            Err(e) => ProcessOutput::exited(1, stdout, format!("{stderr}failed to wait: {e}")),
        }
    }
}

/// Wait until the child exits or `limit` elapses. On timeout the child's
/// process group is killed, the child is reaped, and `Ok(None)` is returned.
fn wait_with_deadline(
    child: &mut Child,
    limit: Duration,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            kill_tree(child);
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(child.id()) else {
        kill_child(child);
        return;
    };
    match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        Ok(()) => debug!(pgid = raw, "Killed process group"),
        Err(e) => {
            warn!(pgid = raw, error = %e, "Failed to kill process group, killing child only");
            kill_child(child);
        }
    }
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    kill_child(child);
}

fn kill_child(child: &mut Child) {
    if let Err(e) = child.kill() {
        warn!(error = %e, "Failed to kill timed-out command");
    }
}

/// Output collected by a reader thread. The buffer is shared so a reader
/// that never reaches EOF still leaves behind whatever it read.
struct Drain {
    buf: Arc<Mutex<Vec<u8>>>,
    done: Receiver<()>,
}

impl Drain {
    fn start<R: Read + Send + 'static>(pipe: Option<R>) -> Option<Self> {
        let mut pipe = pipe?;
        let buf = Arc::new(Mutex::new(Vec::new()));
        let (sender, done) = mpsc::channel();
        let sink = Arc::clone(&buf);
        thread::spawn(move || {
            let mut chunk = [0u8; 8192];
            loop {
                match pipe.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => match sink.lock() {
                        Ok(mut out) => out.extend_from_slice(&chunk[..n]),
                        Err(_) => break,
                    },
                }
            }
            let _ = sender.send(());
        });
        Some(Self { buf, done })
    }

    /// Wait for EOF, up to `grace` when given, and return what was read.
    fn finish(drain: Option<Self>, grace: Option<Duration>) -> String {
        let Some(drain) = drain else {
            return String::new();
        };
        let finished = match grace {
            Some(grace) => drain.done.recv_timeout(grace).is_ok(),
            None => drain.done.recv().is_ok(),
        };
        if !finished {
            debug!("Output reader still open, keeping partial output");
        }
        drain
            .buf
            .lock()
            .map(|out| String::from_utf8_lossy(&out).into_owned())
            .unwrap_or_default()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use monoseed_core::application::ports::ProcessOutcome;

    #[test]
    fn captures_output_and_exit_code() {
        let spec = CommandSpec::new("sh").args(["-c", "echo out; echo err >&2; exit 3"]);
        let out = SystemProcessRunner::new().run(&spec);

        assert_eq!(out.outcome, ProcessOutcome::Exited);
        assert_eq!(out.exit_code, 3);
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr.trim(), "err");
    }

    #[test]
    fn missing_binary_is_spawn_failure() {
        let spec = CommandSpec::new("monoseed-definitely-not-a-binary");
        let out = SystemProcessRunner::new().run(&spec);

        assert_eq!(out.outcome, ProcessOutcome::SpawnFailed);
        assert_eq!(out.exit_code, 1);
        assert!(out.stderr.contains("failed to start"));
    }

    #[test]
    fn timeout_kills_the_child() {
        let spec = CommandSpec::new("sleep")
            .arg("5")
            .timeout(Duration::from_millis(200));
        let started = Instant::now();
        let out = SystemProcessRunner::new().run(&spec);

        assert_eq!(out.outcome, ProcessOutcome::TimedOut);
        assert_eq!(out.exit_code, 1);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn timeout_covers_grandchildren_holding_the_pipes() {
        // `sh` forks `sleep`, which inherits the pipes; killing only `sh` would
        // leave the reader blocked until `sleep` exits.
        let spec = CommandSpec::new("sh")
            .args(["-c", "echo started >&2; sleep 4; echo done >&2"])
            .timeout(Duration::from_millis(200));
        let started = Instant::now();
        let out = SystemProcessRunner::new().run(&spec);

        assert_eq!(out.outcome, ProcessOutcome::TimedOut);
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "returned after {:?}",
            started.elapsed()
        );
        assert!(out.stderr.contains("started"));
        assert!(!out.stderr.contains("done"));
        assert!(out.stderr.contains("timed out"));
    }

    #[test]
    fn large_output_does_not_deadlock() {
        let spec = CommandSpec::new("sh")
            .args(["-c", "head -c 1000000 /dev/zero | tr '\\0' 'x'"])
            .timeout(Duration::from_secs(30));
        let out = SystemProcessRunner::new().run(&spec);

        assert!(out.success());
        assert_eq!(out.stdout.len(), 1_000_000);
    }

    #[test]
    fn runs_in_working_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let spec = CommandSpec::new("pwd").current_dir(tmp.path());
        let out = SystemProcessRunner::new().run(&spec);

        let reported = std::fs::canonicalize(out.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(tmp.path()).unwrap());
    }
}
