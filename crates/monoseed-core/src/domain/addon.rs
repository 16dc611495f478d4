//! Declarative add-on assets.
//!
//! An add-on is a module that the template does not ship. Its files are
//! data: a list of files to create and a list of snippets to append to
//! files that may already exist. Contents may use the placeholders from
//! [`crate::domain::template_vars`]; they are rendered before writing.

use std::collections::HashSet;

use crate::domain::{
    common::RelativePath, error::DomainError, value_objects::OptionalModule,
};

/// A file the add-on creates (or replaces).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonFile {
    pub path: RelativePath,
    pub content: String,
}

/// A snippet appended to a file, creating it when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonAppend {
    pub path: RelativePath,
    pub snippet: String,
}

/// Everything needed to inject one add-on module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonBundle {
    pub module: OptionalModule,
    pub files: Vec<AddonFile>,
    pub appends: Vec<AddonAppend>,
}

impl AddonBundle {
    pub fn new(module: OptionalModule) -> Self {
        Self {
            module,
            files: Vec::new(),
            appends: Vec::new(),
        }
    }

    pub fn with_file(mut self, path: impl Into<RelativePath>, content: impl Into<String>) -> Self {
        self.files.push(AddonFile {
            path: path.into(),
            content: content.into(),
        });
        self
    }

    pub fn with_append(
        mut self,
        path: impl Into<RelativePath>,
        snippet: impl Into<String>,
    ) -> Self {
        self.appends.push(AddonAppend {
            path: path.into(),
            snippet: snippet.into(),
        });
        self
    }

    /// A bundle must produce something and may not create a path twice.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() && self.appends.is_empty() {
            return Err(DomainError::InvalidAddon {
                module: self.module.to_string(),
                reason: "bundle is empty".into(),
            });
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_path()) {
                return Err(DomainError::InvalidAddon {
                    module: self.module.to_string(),
                    reason: format!("duplicate file: {}", file.path),
                });
            }
        }

        Ok(())
    }
}
