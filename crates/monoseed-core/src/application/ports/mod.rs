//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `monoseed-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ProcessRunner`: External commands with timeouts
//!   - `ConnectivityProbe`: Template repository reachability
//!   - `AddonCatalog`: Add-on asset bundles
//!   - `ProgressSink`: Progress reporting
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    AddonCatalog, CommandSpec, ConnectivityProbe, Filesystem, ProcessOutcome, ProcessOutput,
    ProcessRunner, ProgressSink, SilentSink, StepStatus,
};
