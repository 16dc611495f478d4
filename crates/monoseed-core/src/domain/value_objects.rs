//! Domain value objects: License, PackageManager, OptionalModule, Preset.
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── License ──────────────────────────────────────────────────────────────────

/// A license the generated project can be published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum License {
    #[default]
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "Apache-2.0")]
    Apache2,
    #[serde(rename = "ISC")]
    Isc,
    #[serde(rename = "GPL-3.0")]
    Gpl3,
    #[serde(rename = "BSD-3-Clause")]
    Bsd3Clause,
    #[serde(rename = "UNLICENSED")]
    Unlicensed,
}

impl License {
    pub const ALL: [License; 6] = [
        Self::Mit,
        Self::Apache2,
        Self::Isc,
        Self::Gpl3,
        Self::Bsd3Clause,
        Self::Unlicensed,
    ];

    /// SPDX identifier, as written into `package.json`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mit => "MIT",
            Self::Apache2 => "Apache-2.0",
            Self::Isc => "ISC",
            Self::Gpl3 => "GPL-3.0",
            Self::Bsd3Clause => "BSD-3-Clause",
            Self::Unlicensed => "UNLICENSED",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for License {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|license| license.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownLicense { value: s.into() })
    }
}

// ── PackageManager ───────────────────────────────────────────────────────────

/// The JavaScript package manager used to install dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Bun,
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bun => "bun",
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Program and arguments of the dependency-install command.
    pub const fn install_command(&self) -> (&'static str, &'static [&'static str]) {
        (self.as_str(), &["install"])
    }

    /// The install command as a user would type it.
    pub fn install_command_line(&self) -> String {
        let (program, args) = self.install_command();
        format!("{program} {}", args.join(" "))
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bun" => Ok(Self::Bun),
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            other => Err(DomainError::UnknownPackageManager {
                value: other.into(),
            }),
        }
    }
}

// ── OptionalModule ───────────────────────────────────────────────────────────

/// A self-contained part of the monorepo that can be included or left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionalModule {
    Api,
    Worker,
    Evals,
    Config,
    Rag,
}

/// Where a module's files come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleOrigin {
    /// Ships inside the template; removed when deselected.
    Template { directory: &'static str },
    /// Not in the template; synthesized from add-on assets when selected.
    AddOn,
}

impl OptionalModule {
    pub const ALL: [OptionalModule; 5] = [
        Self::Api,
        Self::Worker,
        Self::Evals,
        Self::Config,
        Self::Rag,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Worker => "worker",
            Self::Evals => "evals",
            Self::Config => "config",
            Self::Rag => "rag",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Api => "HTTP API service",
            Self::Worker => "Background job worker",
            Self::Evals => "Evaluation harness",
            Self::Config => "Shared configuration package",
            Self::Rag => "Vector-search (RAG) add-on",
        }
    }

    pub const fn origin(&self) -> ModuleOrigin {
        match self {
            Self::Api => ModuleOrigin::Template {
                directory: "apps/api",
            },
            Self::Worker => ModuleOrigin::Template {
                directory: "apps/worker",
            },
            Self::Evals => ModuleOrigin::Template {
                directory: "packages/evals",
            },
            Self::Config => ModuleOrigin::Template {
                directory: "packages/config",
            },
            Self::Rag => ModuleOrigin::AddOn,
        }
    }

    /// Directory inside the template, for modules the template ships.
    pub const fn template_directory(&self) -> Option<&'static str> {
        match self.origin() {
            ModuleOrigin::Template { directory } => Some(directory),
            ModuleOrigin::AddOn => None,
        }
    }
}

impl fmt::Display for OptionalModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionalModule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidAddon {
                module: s.into(),
                reason: "unknown module".into(),
            })
    }
}

// ── Preset ───────────────────────────────────────────────────────────────────

/// Shorthand that decides every module flag at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    All,
    Minimal,
}

impl Preset {
    /// Value every module flag takes under this preset.
    pub const fn includes_modules(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Minimal => "minimal",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn license_parses_spdx_case_insensitively() {
        assert_eq!("MIT".parse::<License>().unwrap(), License::Mit);
        assert_eq!("apache-2.0".parse::<License>().unwrap(), License::Apache2);
        assert_eq!("bsd-3-clause".parse::<License>().unwrap(), License::Bsd3Clause);
        assert!(matches!(
            "WTFPL".parse::<License>(),
            Err(DomainError::UnknownLicense { .. })
        ));
    }

    #[test]
    fn license_display_is_spdx() {
        for license in License::ALL {
            assert_eq!(license.to_string().parse::<License>().unwrap(), license);
        }
        assert_eq!(License::Gpl3.to_string(), "GPL-3.0");
    }

    #[test]
    fn license_serde_uses_spdx() {
        let json = serde_json::to_string(&License::Apache2).unwrap();
        assert_eq!(json, "\"Apache-2.0\"");
    }

    #[test]
    fn package_manager_install_commands_are_one_to_one() {
        assert_eq!(PackageManager::Bun.install_command_line(), "bun install");
        assert_eq!(PackageManager::Npm.install_command_line(), "npm install");
        assert_eq!(PackageManager::Yarn.install_command_line(), "yarn install");
        assert_eq!(PackageManager::Pnpm.install_command_line(), "pnpm install");
    }

    #[test]
    fn package_manager_rejects_unknown() {
        assert_eq!("PNPM".parse::<PackageManager>().unwrap(), PackageManager::Pnpm);
        assert!(matches!(
            "cargo".parse::<PackageManager>(),
            Err(DomainError::UnknownPackageManager { .. })
        ));
    }

    #[test]
    fn template_modules_have_directories_and_rag_is_an_addon() {
        assert_eq!(OptionalModule::Api.template_directory(), Some("apps/api"));
        assert_eq!(OptionalModule::Worker.template_directory(), Some("apps/worker"));
        assert_eq!(OptionalModule::Evals.template_directory(), Some("packages/evals"));
        assert_eq!(OptionalModule::Config.template_directory(), Some("packages/config"));
        assert_eq!(OptionalModule::Rag.origin(), ModuleOrigin::AddOn);
    }

    #[test]
    fn preset_values() {
        assert!(Preset::All.includes_modules());
        assert!(!Preset::Minimal.includes_modules());
    }
}
