//! Template repository reachability check.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use monoseed_core::application::ports::{CommandSpec, ConnectivityProbe, ProcessRunner};

/// Time allowed for `git ls-remote` to answer.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Probes a repository with `git ls-remote --heads <url>`.
///
/// Any non-zero exit, timeout, or spawn failure counts as unreachable.
pub struct GitRemoteProbe {
    runner: Arc<dyn ProcessRunner>,
    url: String,
}

impl GitRemoteProbe {
    pub fn new(runner: Arc<dyn ProcessRunner>, url: impl Into<String>) -> Self {
        Self {
            runner,
            url: url.into(),
        }
    }
}

impl ConnectivityProbe for GitRemoteProbe {
    #[instrument(skip(self), fields(url = %self.url))]
    fn is_reachable(&self) -> bool {
        let spec = CommandSpec::new("git")
            .args(["ls-remote", "--heads", self.url.as_str()])
            .timeout(PROBE_TIMEOUT);
        let output = self.runner.run(&spec);
        debug!(exit_code = output.exit_code, outcome = ?output.outcome, "Probe finished");
        output.success()
    }
}

/// A probe with a fixed answer, for offline runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe(pub bool);

impl ConnectivityProbe for StaticProbe {
    fn is_reachable(&self) -> bool {
        self.0
    }
}
