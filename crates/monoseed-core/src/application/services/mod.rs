//! Application services - orchestrate use cases.

pub mod scaffold_service;

pub use scaffold_service::{
    INSTALL_TIMEOUT, ScaffoldResult, ScaffoldService, ScaffoldWarning, substitution_targets,
};
