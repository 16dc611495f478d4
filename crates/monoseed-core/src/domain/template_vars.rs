//! Template variables and the placeholder substitution engine.
//!
//! ## Placeholders
//!
//! | Placeholder        | Example           | Source          |
//! |--------------------|-------------------|-----------------|
//! | `{{PROJECT_NAME}}` | `my-project`      | User input      |
//! | `{{AUTHOR}}`       | `Ada Lovelace`    | User input      |
//! | `{{LICENSE}}`      | `MIT`             | User input      |
//! | `{{YEAR}}`         | `2026`            | System clock    |
//!
//! In addition, every literal occurrence of the template's origin name
//! (e.g. `monorepo-template`) becomes the project name.
//!
//! ## Engine
//!
//! One left-to-right scan over the input. Substituted values are emitted
//! and never rescanned, so a value that itself looks like a placeholder or
//! contains the origin name is copied through verbatim. Only the four
//! whitelisted placeholders are recognised; any other `{{…}}` is left as-is.

use std::collections::BTreeMap;

use crate::domain::{
    naming::ProjectName, options::ScaffoldConfig, template_source::TemplateSource,
    value_objects::License,
};

pub const PROJECT_NAME: &str = "PROJECT_NAME";
pub const AUTHOR: &str = "AUTHOR";
pub const LICENSE: &str = "LICENSE";
pub const YEAR: &str = "YEAR";

/// The whitelist of recognised placeholder keys.
pub const PLACEHOLDERS: [&str; 4] = [PROJECT_NAME, AUTHOR, LICENSE, YEAR];

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Values substituted into template files. Computed once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVariables {
    project_name: String,
    origin_name: String,
    variables: BTreeMap<&'static str, String>,
}

impl TemplateVariables {
    pub fn new(
        project_name: &ProjectName,
        author: impl Into<String>,
        license: License,
        year: i32,
        origin_name: impl Into<String>,
    ) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert(PROJECT_NAME, project_name.to_string());
        variables.insert(AUTHOR, author.into());
        variables.insert(LICENSE, license.as_str().to_string());
        variables.insert(YEAR, year.to_string());

        Self {
            project_name: project_name.to_string(),
            origin_name: origin_name.into(),
            variables,
        }
    }

    /// Variables for a resolved configuration.
    pub fn for_config(config: &ScaffoldConfig, source: &TemplateSource, year: i32) -> Self {
        Self::new(
            &config.project_name,
            config.author.clone(),
            config.license,
            year,
            source.origin_name.clone(),
        )
    }

    /// Value of a placeholder key, if it is on the whitelist.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Whether origin-name replacement has anything to do.
    fn replaces_origin(&self) -> bool {
        !self.origin_name.is_empty() && self.origin_name != self.project_name
    }

    /// Substitute placeholders and the origin name in `content`.
    pub fn substitute(&self, content: &str) -> String {
        let replace_origin = self.replaces_origin();
        let mut out = String::with_capacity(content.len());
        let mut rest = content;

        while !rest.is_empty() {
            if let Some((value, consumed)) = self.placeholder_at(rest) {
                out.push_str(value);
                rest = &rest[consumed..];
                continue;
            }

            if replace_origin && rest.starts_with(self.origin_name.as_str()) {
                out.push_str(&self.project_name);
                rest = &rest[self.origin_name.len()..];
                continue;
            }

            let Some(ch) = rest.chars().next() else {
                break;
            };
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }

        out
    }

    /// If `input` starts with a whitelisted placeholder, its value and the
    /// number of bytes it spans.
    fn placeholder_at(&self, input: &str) -> Option<(&str, usize)> {
        let inner = input.strip_prefix(OPEN)?;
        let end = inner.find(CLOSE)?;
        let value = self.get(&inner[..end])?;
        Some((value, OPEN.len() + end + CLOSE.len()))
    }
}
