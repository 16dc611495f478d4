//! Stage descriptions shared by real runs and dry runs.
//!
//! Every mutating step of a scaffold run is described by a
//! [`PlannedAction`] before it executes. A dry run records the same
//! actions without executing them, so the two traces can be compared.

use std::fmt;

use serde::Serialize;

/// Scaffold stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    RemoveExisting,
    Clone,
    StripVcs,
    Prune,
    Substitute,
    Inject,
    InitVcs,
    Install,
}

impl Stage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RemoveExisting => "remove-existing",
            Self::Clone => "clone",
            Self::StripVcs => "strip-vcs",
            Self::Prune => "prune",
            Self::Substitute => "substitute",
            Self::Inject => "inject",
            Self::InitVcs => "init-vcs",
            Self::Install => "install",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One action of a scaffold run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAction {
    pub stage: Stage,
    pub description: String,
}

impl PlannedAction {
    pub fn new(stage: Stage, description: impl Into<String>) -> Self {
        Self {
            stage,
            description: description.into(),
        }
    }
}

impl fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered_like_the_run() {
        assert!(Stage::RemoveExisting < Stage::Clone);
        assert!(Stage::Clone < Stage::StripVcs);
        assert!(Stage::Substitute < Stage::Inject);
        assert!(Stage::InitVcs < Stage::Install);
    }

    #[test]
    fn action_display_includes_stage() {
        let action = PlannedAction::new(Stage::Prune, "remove apps/api");
        assert_eq!(action.to_string(), "[prune] remove apps/api");
    }
}
