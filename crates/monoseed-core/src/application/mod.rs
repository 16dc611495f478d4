//! Application layer for monoseed.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`ScaffoldService`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{ScaffoldResult, ScaffoldService, ScaffoldWarning};

// Re-export port traits (for adapter implementation)
pub use ports::{
    AddonCatalog, CommandSpec, ConnectivityProbe, Filesystem, ProcessOutcome, ProcessOutput,
    ProcessRunner, ProgressSink, SilentSink, StepStatus,
};

pub use error::ApplicationError;
