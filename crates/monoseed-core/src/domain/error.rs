// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::naming::NameViolation;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `ScaffoldResult`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {violation}")]
    InvalidProjectName {
        name: String,
        violation: NameViolation,
    },

    #[error("A project name is required")]
    MissingProjectName,

    #[error("Unknown license '{value}'")]
    UnknownLicense { value: String },

    #[error("Unknown package manager '{value}'")]
    UnknownPackageManager { value: String },

    #[error("Invalid add-on '{module}': {reason}")]
    InvalidAddon { module: String, reason: String },

    #[error("Path must be relative and stay inside the project: {path}")]
    UnsafePath { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("The 'all' and 'minimal' presets cannot be combined")]
    ConflictingPresets,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, violation } => {
                let mut out = vec![violation.hint().to_string()];
                let slug = crate::domain::naming::slugify(name);
                if !slug.is_empty() && slug != *name {
                    out.push(format!("Try: {slug}"));
                }
                out
            }
            Self::MissingProjectName => vec![
                "Pass the project name as the first argument".into(),
                "Example: monoseed my-project --all".into(),
            ],
            Self::UnknownLicense { .. } => vec![format!(
                "Supported licenses: {}",
                crate::domain::License::ALL
                    .iter()
                    .map(|l| l.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )],
            Self::UnknownPackageManager { .. } => {
                vec!["Supported package managers: bun, npm, yarn, pnpm".into()]
            }
            Self::ConflictingPresets => vec![
                "Use --all to include every module, or --minimal to include none".into(),
                "Or drop both presets and pick modules individually (--api, --worker, ...)".into(),
            ],
            Self::InvalidAddon { .. } | Self::UnsafePath { .. } => {
                vec!["Check the add-on manifest and its files".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::MissingProjectName => ErrorCategory::Validation,
            Self::ConflictingPresets => ErrorCategory::Conflict,
            Self::UnknownLicense { .. } | Self::UnknownPackageManager { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidAddon { .. } | Self::UnsafePath { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Internal,
}
