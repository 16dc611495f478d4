// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for monoseed.
//!
//! This module contains pure business logic: naming rules, option
//! resolution, the substitution engine, and add-on descriptions.
//! All I/O (cloning, filesystem, processes) is handled via ports (traits)
//! defined in the application layer.
//!
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable values**: Configuration is built once and never mutated
//! - **Validated construction**: `ProjectName` and `ScaffoldConfig` can
//!   only be obtained through the validator and the resolver
//!
pub mod addon;
pub mod common;
pub mod error;
pub mod naming;
pub mod options;
pub mod plan;
pub mod template_source;
pub mod template_vars;
pub mod value_objects;

// Re-exports for convenience
pub use addon::{AddonAppend, AddonBundle, AddonFile};
pub use common::RelativePath;
pub use error::{DomainError, ErrorCategory};
pub use naming::{NameValidation, NameViolation, ProjectName, slugify, validate_project_name};
pub use options::{ModuleSelection, ScaffoldConfig, ScaffoldOptions};
pub use plan::{PlannedAction, Stage};
pub use template_source::TemplateSource;
pub use template_vars::TemplateVariables;
pub use value_objects::{License, ModuleOrigin, OptionalModule, PackageManager, Preset};
