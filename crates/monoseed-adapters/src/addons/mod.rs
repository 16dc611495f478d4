//! Add-on catalog adapters.

mod builtin;
mod directory;

pub use builtin::{BuiltinAddons, rag_bundle};
pub use directory::{AddonLoadError, AddonManifest, AppendEntry, DirectoryAddons};
