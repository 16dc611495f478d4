//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving a scaffold run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The template repository could not be reached.
    #[error("Cannot reach the template repository at {url}")]
    NetworkUnavailable { url: String },

    /// Target directory is present and overwriting was not requested.
    #[error("Target directory {} already exists", path.display())]
    TargetExists { path: PathBuf },

    /// `git clone` exited non-zero.
    #[error("Failed to clone template: {stderr}")]
    CloneFailed { stderr: String },

    /// An external command exceeded its time limit.
    #[error("`{command}` timed out after {}s", after.as_secs())]
    Timeout { command: String, after: Duration },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// An external command could not be started or failed.
    #[error("`{command}` failed: {reason}")]
    ProcessFailed { command: String, reason: String },
}

impl ApplicationError {
    pub fn filesystem(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NetworkUnavailable { .. } => vec![
                "Check your internet connection".into(),
                "Verify that git is installed and can reach GitHub".into(),
            ],
            Self::TargetExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different project name or --directory".into(),
            ],
            Self::CloneFailed { .. } => vec![
                "Check that the template repository URL is correct".into(),
                "Run `git clone` manually to see the full error".into(),
            ],
            Self::Timeout { .. } => vec!["The command may succeed if you try again".into()],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ProcessFailed { command, .. } => {
                vec![format!("Make sure `{command}` is installed and on your PATH")]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TargetExists { .. } => ErrorCategory::Conflict,
            Self::NetworkUnavailable { .. } | Self::Timeout { .. } => ErrorCategory::Network,
            Self::CloneFailed { .. } | Self::FilesystemError { .. } | Self::ProcessFailed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_exists_message_says_already_exists() {
        let err = ApplicationError::TargetExists {
            path: PathBuf::from("/tmp/demo"),
        };
        assert!(err.to_string().contains("already exists"));
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }

    #[test]
    fn timeout_message_names_command_and_limit() {
        let err = ApplicationError::Timeout {
            command: "bun install".into(),
            after: Duration::from_secs(300),
        };
        assert_eq!(err.to_string(), "`bun install` timed out after 300s");
    }
}
