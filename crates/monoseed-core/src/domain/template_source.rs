//! The remote repository every project starts from.

use serde::{Deserialize, Serialize};

/// Default template repository.
pub const DEFAULT_TEMPLATE_URL: &str = "https://github.com/monoseed/monorepo-template.git";

/// Name the template uses for itself; replaced by the project name.
pub const DEFAULT_ORIGIN_NAME: &str = "monorepo-template";

/// Where the template is cloned from and what it calls itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSource {
    pub url: String,
    pub origin_name: String,
}

impl TemplateSource {
    pub fn new(url: impl Into<String>, origin_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            origin_name: origin_name.into(),
        }
    }
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_URL, DEFAULT_ORIGIN_NAME)
    }
}
