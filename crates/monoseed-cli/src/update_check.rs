//! Background check for a newer published release.
//!
//! The lookup runs on a detached thread so it never delays scaffolding.
//! Its answer is read without blocking just before exit; an answer that
//! has not arrived by then is dropped.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use owo_colors::OwoColorize;
use semver::Version;
use tracing::{debug, instrument};

use monoseed_core::application::ports::{CommandSpec, ProcessRunner};

/// Published package name.
const PACKAGE: &str = env!("CARGO_PKG_NAME");
/// Version of this binary.
const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Setting this variable (to anything) disables the check.
pub const DISABLE_ENV: &str = "MONOSEED_NO_UPDATE_CHECK";
/// Upper bound for the registry lookup.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// A lookup in flight.
pub struct UpdateCheck {
    receiver: Receiver<Option<Version>>,
}

impl UpdateCheck {
    /// Start the lookup unless disabled. `None` when disabled or the thread
    /// could not be spawned.
    pub fn spawn(runner: Arc<dyn ProcessRunner>, quiet: bool) -> Option<Self> {
        if quiet || std::env::var_os(DISABLE_ENV).is_some() {
            debug!("Update check disabled");
            return None;
        }

        let (sender, receiver) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("update-check".into())
            .spawn(move || {
                // The receiver may already be gone; nothing to do then.
                let _ = sender.send(latest_published(runner.as_ref()));
            });

        match spawned {
            Ok(_) => Some(Self { receiver }),
            Err(e) => {
                debug!(error = %e, "Could not start update check");
                None
            }
        }
    }

    /// The newer published version, if the lookup has finished and found
    /// one. Never blocks.
    pub fn poll(&self) -> Option<Version> {
        let latest = self.receiver.try_recv().ok().flatten()?;
        let current = Version::parse(CURRENT_VERSION).ok()?;
        (latest > current).then_some(latest)
    }
}

/// One-line notice for a newer release.
pub fn notice(latest: &Version, color: bool) -> String {
    let command = format!("cargo install {PACKAGE}");
    if color {
        format!(
            "{} monoseed {} is available (installed: {}). Update with `{}`",
            "\u{2191}".yellow().bold(),
            latest.to_string().green(),
            CURRENT_VERSION,
            command.cyan()
        )
    } else {
        format!(
            "\u{2191} monoseed {latest} is available (installed: {CURRENT_VERSION}). Update with `{command}`"
        )
    }
}

#[instrument(skip(runner))]
fn latest_published(runner: &dyn ProcessRunner) -> Option<Version> {
    let spec = CommandSpec::new("cargo")
        .args(["search", PACKAGE, "--limit", "1"])
        .timeout(LOOKUP_TIMEOUT);
    let output = runner.run(&spec);
    if !output.success() {
        debug!(diagnostic = output.diagnostic(), "Registry lookup failed");
        return None;
    }
    parse_search_output(&output.stdout)
}

/// Extract the version from a `cargo search` line:
/// `monoseed-cli = "0.2.0"    # description`.
fn parse_search_output(stdout: &str) -> Option<Version> {
    stdout.lines().find_map(|line| {
        let (name, rest) = line.split_once('=')?;
        if name.trim() != PACKAGE {
            return None;
        }
        let quoted = rest.trim_start().strip_prefix('"')?;
        let end = quoted.find('"')?;
        Version::parse(&quoted[..end]).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use monoseed_adapters::ScriptedProcessRunner;
    use monoseed_core::application::ports::ProcessOutput;

    #[test]
    fn parses_cargo_search_line() {
        let stdout = format!("{PACKAGE} = \"1.2.3\"    # Bootstrap a monorepo\n");
        assert_eq!(parse_search_output(&stdout), Some(Version::new(1, 2, 3)));
    }

    #[test]
    fn ignores_other_packages_and_noise() {
        assert_eq!(parse_search_output("other = \"9.9.9\"    # x\n"), None);
        assert_eq!(parse_search_output("... and 3 crates more\n"), None);
        assert_eq!(parse_search_output(""), None);
    }

    #[test]
    fn failed_lookup_yields_nothing() {
        let runner = ScriptedProcessRunner::new()
            .respond("cargo", ProcessOutput::exited(101, "", "no network"));
        assert_eq!(latest_published(&runner), None);
    }

    #[test]
    fn lookup_uses_cargo_search_with_timeout() {
        let runner = ScriptedProcessRunner::new().respond(
            "cargo",
            ProcessOutput::exited(0, format!("{PACKAGE} = \"0.0.1\"\n"), ""),
        );
        assert_eq!(latest_published(&runner), Some(Version::new(0, 0, 1)));

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].timeout, Some(LOOKUP_TIMEOUT));
        assert_eq!(
            runner.command_lines(),
            vec![format!("cargo search {PACKAGE} --limit 1")]
        );
    }

    #[test]
    fn quiet_disables_the_check() {
        let runner = Arc::new(ScriptedProcessRunner::new());
        assert!(UpdateCheck::spawn(runner, true).is_none());
    }

    #[test]
    fn newer_release_is_reported_and_older_is_not() {
        let (sender, receiver) = mpsc::channel();
        sender.send(Some(Version::new(999, 0, 0))).unwrap();
        assert_eq!(UpdateCheck { receiver }.poll(), Some(Version::new(999, 0, 0)));

        let (sender, receiver) = mpsc::channel();
        sender.send(Some(Version::new(0, 0, 0))).unwrap();
        assert_eq!(UpdateCheck { receiver }.poll(), None);
    }

    #[test]
    fn pending_lookup_is_not_awaited() {
        let (_sender, receiver) = mpsc::channel::<Option<Version>>();
        assert_eq!(UpdateCheck { receiver }.poll(), None);
    }

    #[test]
    fn plain_notice_names_the_install_command() {
        let line = notice(&Version::new(2, 0, 0), false);
        assert!(line.contains("2.0.0"));
        assert!(line.contains(&format!("cargo install {PACKAGE}")));
    }
}
