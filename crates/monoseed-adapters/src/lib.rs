//! Infrastructure adapters for monoseed.
//!
//! This crate implements the ports defined in `monoseed-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod addons;
pub mod connectivity;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use addons::{BuiltinAddons, DirectoryAddons};
pub use connectivity::{GitRemoteProbe, StaticProbe};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{ScriptedProcessRunner, SystemProcessRunner};
