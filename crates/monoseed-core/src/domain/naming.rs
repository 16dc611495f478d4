//! Project name validation and slug derivation.
//!
//! The naming grammar is the npm package-name subset that is safe to use as
//! a directory name, a workspace package name, and a docker-compose project
//! name at the same time:
//!
//! ```text
//! name := [a-z] [a-z0-9_-]*      (at most 214 characters)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Longest accepted project name, in characters.
pub const MAX_NAME_LEN: usize = 214;

/// The specific rule a project name broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameViolation {
    Required,
    TooLong,
    InvalidPattern,
}

impl NameViolation {
    /// One-line description of the rule that was broken.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Required => "Project name is required",
            Self::TooLong => "Project name must be 214 characters or fewer",
            Self::InvalidPattern => {
                "Project name must start with a lowercase letter and contain only \
                 lowercase letters, digits, hyphens, and underscores"
            }
        }
    }

    /// What to do about it.
    pub const fn hint(&self) -> &'static str {
        match self {
            Self::Required => "Pass a name such as: my-project",
            Self::TooLong => "Pick a shorter name",
            Self::InvalidPattern => "Examples: my-project, my_app, project123",
        }
    }
}

impl fmt::Display for NameViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of [`validate_project_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameValidation {
    pub valid: bool,
    pub message: Option<String>,
}

impl NameValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn rejected(violation: NameViolation) -> Self {
        Self {
            valid: false,
            message: Some(violation.message().to_string()),
        }
    }
}

/// Validate a proposed project name against the naming grammar.
pub fn validate_project_name(name: &str) -> NameValidation {
    match check(name) {
        Ok(()) => NameValidation::ok(),
        Err(violation) => NameValidation::rejected(violation),
    }
}

fn check(name: &str) -> Result<(), NameViolation> {
    if name.is_empty() {
        return Err(NameViolation::Required);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(NameViolation::TooLong);
    }

    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    if !starts_with_letter || !chars.all(is_name_char) {
        return Err(NameViolation::InvalidPattern);
    }

    Ok(())
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'
}

/// Derive a grammar-conforming slug from arbitrary text.
///
/// Returns an empty string when the input contains no ASCII letter at all.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();

    // Runs of disallowed characters become one hyphen; runs of hyphens
    // collapse to one.
    let mut slug = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        let c = if is_name_char(c) { c } else { '-' };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    let slug = match slug.find(|c: char| c.is_ascii_lowercase()) {
        Some(start) => &slug[start..],
        None => return String::new(),
    };

    // Everything left is ASCII, so byte slicing is char slicing.
    let slug = &slug[..slug.len().min(MAX_NAME_LEN)];
    slug.trim_end_matches('-').to_string()
}

/// A project name that satisfies the naming grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate and wrap a project name.
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        match check(&name) {
            Ok(()) => Ok(Self(name)),
            Err(violation) => Err(DomainError::InvalidProjectName { name, violation }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ProjectName> for String {
    fn from(name: ProjectName) -> Self {
        name.0
    }
}
