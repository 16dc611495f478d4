//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `monoseed-adapters` crate provides implementations.

mod process;

pub use process::{CommandSpec, ProcessOutcome, ProcessOutput};

use std::path::{Path, PathBuf};

use crate::application::services::ScaffoldWarning;
use crate::domain::{AddonBundle, OptionalModule, PlannedAction};
use crate::error::MonoseedResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `monoseed_adapters::filesystem::LocalFilesystem` (production)
/// - `monoseed_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// True only for an existing directory. Stat errors read as `false`.
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents. A missing path is not an error.
    fn remove_dir_all(&self, path: &Path) -> MonoseedResult<()>;

    /// File contents, or `None` when the file does not exist.
    fn read_to_string(&self, path: &Path) -> MonoseedResult<Option<String>>;

    /// Write content to a file, creating parent directories.
    fn write_file(&self, path: &Path, content: &str) -> MonoseedResult<()>;

    /// Append content to a file, creating it when absent.
    fn append_file(&self, path: &Path, content: &str) -> MonoseedResult<()>;

    /// Immediate subdirectories of `path`, sorted. Empty when absent.
    fn list_dirs(&self, path: &Path) -> MonoseedResult<Vec<PathBuf>>;
}

/// Port for running external commands (`git`, package managers).
///
/// Implementations never fail for a non-zero exit: the outcome is reported
/// in [`ProcessOutput`].
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> ProcessOutput;
}

/// Port for the pre-clone reachability check.
#[cfg_attr(test, mockall::automock)]
pub trait ConnectivityProbe: Send + Sync {
    /// Whether the template repository answers. False negatives are allowed.
    fn is_reachable(&self) -> bool;
}

/// Port for add-on asset bundles.
#[cfg_attr(test, mockall::automock)]
pub trait AddonCatalog: Send + Sync {
    /// The bundle for `module`, or `None` when no bundle is known.
    fn get(&self, module: OptionalModule) -> MonoseedResult<Option<AddonBundle>>;
}

/// Final state of one action, as reported to a [`ProgressSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    /// Recorded under dry-run, not executed.
    Planned,
    Failed,
}

/// Receives progress events from a scaffold run.
///
/// The CLI renders these as spinners and status lines; the default sink
/// ignores them.
pub trait ProgressSink {
    fn begin(&self, action: &PlannedAction);

    fn finish(&self, action: &PlannedAction, status: StepStatus);

    fn warning(&self, warning: &ScaffoldWarning);
}

/// A [`ProgressSink`] that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl ProgressSink for SilentSink {
    fn begin(&self, _action: &PlannedAction) {}

    fn finish(&self, _action: &PlannedAction, _status: StepStatus) {}

    fn warning(&self, _warning: &ScaffoldWarning) {}
}
