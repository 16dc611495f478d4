//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `MONOSEED__DEFAULTS__AUTHOR=Ada`
//! 3. Config file: `--config-file`, else `<config dir>/monoseed/config.toml`
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::{Context, ensure};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use monoseed_core::domain::{DomainError, License, PackageManager, TemplateSource};

/// Prefix of configuration environment variables.
const ENV_PREFIX: &str = "MONOSEED";
/// Separator between the prefix and nested keys.
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Where the template comes from.
    pub template: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// `[defaults]`: fallbacks for flags the user did not pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author: Option<String>,
    pub license: Option<String>,
    pub package_manager: Option<String>,
}

impl Defaults {
    pub fn license(&self) -> Result<Option<License>, DomainError> {
        self.license.as_deref().map(str::parse).transpose()
    }

    pub fn package_manager(&self) -> Result<Option<PackageManager>, DomainError> {
        self.package_manager.as_deref().map(str::parse).transpose()
    }
}

/// `[template]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Git URL of the template repository.
    pub repository: Option<String>,
    /// Name the template uses for itself.
    pub origin_name: Option<String>,
    /// Directory of add-on bundles overriding the built-in ones.
    pub addons_dir: Option<PathBuf>,
}

impl TemplateConfig {
    /// The configured source, falling back to the default template.
    pub fn source(&self) -> TemplateSource {
        let default = TemplateSource::default();
        TemplateSource::new(
            self.repository.clone().unwrap_or(default.url),
            self.origin_name.clone().unwrap_or(default.origin_name),
        )
    }
}

/// `[output]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional. Unknown license or package-manager values are rejected
    /// here so they fail before any work starts.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        match config_file {
            Some(path) => {
                ensure!(
                    path.is_file(),
                    "config file '{}' does not exist",
                    path.display()
                );
                builder = builder.add_source(File::from(path).format(FileFormat::Toml));
            }
            None => {
                if let Some(path) = Self::config_path() {
                    builder = builder.add_source(
                        File::from(path)
                            .format(FileFormat::Toml)
                            .required(false),
                    );
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR),
        );

        let config: Self = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("failed to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.defaults
            .license()
            .context("invalid value for defaults.license")?;
        self.defaults
            .package_manager()
            .context("invalid value for defaults.package_manager")?;
        Ok(())
    }

    /// Path to the default configuration file, if the platform has a
    /// config directory.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "monoseed", "monoseed")
            .map(|d| d.config_dir().join("config.toml"))
    }
}
