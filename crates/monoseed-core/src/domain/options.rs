//! Option resolution: partial user input → normalized [`ScaffoldConfig`].
//!
//! CLI flags, the configuration file, and interactive answers all fill the
//! same [`ScaffoldOptions`]. [`ScaffoldOptions::resolve`] is the only way to
//! obtain a [`ScaffoldConfig`], so every config the orchestrator sees has a
//! valid project name and a consistent module selection.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    naming::ProjectName,
    value_objects::{License, OptionalModule, PackageManager, Preset},
};

/// Inclusion flag per optional module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSelection {
    pub api: bool,
    pub worker: bool,
    pub evals: bool,
    pub config: bool,
    pub rag: bool,
}

impl ModuleSelection {
    /// Every module set to `included`.
    pub const fn uniform(included: bool) -> Self {
        Self {
            api: included,
            worker: included,
            evals: included,
            config: included,
            rag: included,
        }
    }

    pub const fn includes(&self, module: OptionalModule) -> bool {
        match module {
            OptionalModule::Api => self.api,
            OptionalModule::Worker => self.worker,
            OptionalModule::Evals => self.evals,
            OptionalModule::Config => self.config,
            OptionalModule::Rag => self.rag,
        }
    }

    pub fn set(&mut self, module: OptionalModule, included: bool) {
        match module {
            OptionalModule::Api => self.api = included,
            OptionalModule::Worker => self.worker = included,
            OptionalModule::Evals => self.evals = included,
            OptionalModule::Config => self.config = included,
            OptionalModule::Rag => self.rag = included,
        }
    }

    /// Build a selection from the modules that should be included.
    pub fn from_modules(modules: impl IntoIterator<Item = OptionalModule>) -> Self {
        let mut selection = Self::default();
        for module in modules {
            selection.set(module, true);
        }
        selection
    }

    pub fn included(&self) -> impl Iterator<Item = OptionalModule> + '_ {
        OptionalModule::ALL
            .into_iter()
            .filter(|m| self.includes(*m))
    }

    pub fn excluded(&self) -> impl Iterator<Item = OptionalModule> + '_ {
        OptionalModule::ALL
            .into_iter()
            .filter(|m| !self.includes(*m))
    }

    /// True when at least one module flag is set.
    pub fn any(&self) -> bool {
        self.included().next().is_some()
    }
}

impl fmt::Display for ModuleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.included().map(|m| m.as_str()).collect();
        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join(", "))
        }
    }
}

/// Partial, unvalidated scaffolding input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldOptions {
    pub project_name: Option<String>,
    pub directory: Option<PathBuf>,
    pub author: Option<String>,
    pub license: Option<License>,
    pub package_manager: Option<PackageManager>,
    /// Individually requested modules.
    pub modules: ModuleSelection,
    pub all: bool,
    pub minimal: bool,
    pub force: bool,
    pub skip_install: bool,
    pub skip_vcs_init: bool,
    pub dry_run: bool,
}

impl ScaffoldOptions {
    /// True when the caller must collect answers interactively before
    /// scaffolding can proceed: the project name is missing, or nothing at
    /// all was said about which modules to include.
    pub fn needs_interactive_mode(&self) -> bool {
        self.project_name.is_none() || !self.has_component_decision()
    }

    /// True when a preset or at least one module flag was supplied.
    pub fn has_component_decision(&self) -> bool {
        self.all || self.minimal || self.modules.any()
    }

    /// The preset in effect, or `ConflictingPresets` if both are set.
    pub fn preset(&self) -> Result<Option<Preset>, DomainError> {
        match (self.all, self.minimal) {
            (true, true) => Err(DomainError::ConflictingPresets),
            (true, false) => Ok(Some(Preset::All)),
            (false, true) => Ok(Some(Preset::Minimal)),
            (false, false) => Ok(None),
        }
    }

    /// Normalize into a [`ScaffoldConfig`].
    ///
    /// Pure: performs no I/O. Preset conflicts are checked before the
    /// project name so they surface even when the name is also missing.
    pub fn resolve(self) -> Result<ScaffoldConfig, DomainError> {
        let preset = self.preset()?;

        let modules = match preset {
            Some(preset) => ModuleSelection::uniform(preset.includes_modules()),
            None => self.modules,
        };

        let raw_name = self.project_name.ok_or(DomainError::MissingProjectName)?;
        let project_name = ProjectName::parse(raw_name)?;

        let target_directory = self
            .directory
            .unwrap_or_else(|| PathBuf::from(project_name.as_str()));

        Ok(ScaffoldConfig {
            project_name,
            target_directory,
            author: self.author.unwrap_or_default(),
            license: self.license.unwrap_or_default(),
            modules,
            preset,
            force_overwrite: self.force,
            skip_install: self.skip_install,
            skip_vcs_init: self.skip_vcs_init,
            package_manager: self.package_manager.unwrap_or_default(),
            dry_run: self.dry_run,
        })
    }
}

/// The single normalized input to scaffolding. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldConfig {
    pub project_name: ProjectName,
    pub target_directory: PathBuf,
    pub author: String,
    pub license: License,
    pub modules: ModuleSelection,
    pub preset: Option<Preset>,
    pub force_overwrite: bool,
    pub skip_install: bool,
    pub skip_vcs_init: bool,
    pub package_manager: PackageManager,
    pub dry_run: bool,
}

impl ScaffoldConfig {
    /// Start from the defaults for `project_name`.
    pub fn new(project_name: ProjectName) -> Self {
        Self {
            target_directory: PathBuf::from(project_name.as_str()),
            project_name,
            author: String::new(),
            license: License::default(),
            modules: ModuleSelection::default(),
            preset: None,
            force_overwrite: false,
            skip_install: false,
            skip_vcs_init: false,
            package_manager: PackageManager::default(),
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> ScaffoldOptions {
        ScaffoldOptions {
            project_name: Some(name.into()),
            ..Default::default()
        }
    }

    // ── presets ───────────────────────────────────────────────────────────

    #[test]
    fn all_preset_includes_every_module_regardless_of_flags() {
        let mut opts = named("demo");
        opts.all = true;
        opts.modules.api = false;
        opts.modules.worker = true;

        let config = opts.resolve().unwrap();
        assert_eq!(config.modules, ModuleSelection::uniform(true));
        assert_eq!(config.preset, Some(Preset::All));
    }

    #[test]
    fn minimal_preset_excludes_every_module_regardless_of_flags() {
        let mut opts = named("demo");
        opts.minimal = true;
        opts.modules = ModuleSelection::uniform(true);

        let config = opts.resolve().unwrap();
        assert_eq!(config.modules, ModuleSelection::uniform(false));
        assert_eq!(config.preset, Some(Preset::Minimal));
    }

    #[test]
    fn both_presets_conflict() {
        let mut opts = named("demo");
        opts.all = true;
        opts.minimal = true;
        assert_eq!(opts.resolve(), Err(DomainError::ConflictingPresets));
    }

    #[test]
    fn preset_conflict_reported_before_missing_name() {
        let opts = ScaffoldOptions {
            all: true,
            minimal: true,
            ..Default::default()
        };
        assert_eq!(opts.resolve(), Err(DomainError::ConflictingPresets));
    }

    #[test]
    fn individual_flags_stand_without_preset() {
        let mut opts = named("demo");
        opts.modules.worker = true;
        opts.modules.rag = true;

        let config = opts.resolve().unwrap();
        assert!(config.modules.worker);
        assert!(config.modules.rag);
        assert!(!config.modules.api);
        assert!(!config.modules.evals);
        assert!(!config.modules.config);
        assert_eq!(config.preset, None);
    }

    // ── defaults & validation ─────────────────────────────────────────────

    #[test]
    fn target_directory_defaults_to_project_name() {
        let config = named("my-project").resolve().unwrap();
        assert_eq!(config.target_directory, PathBuf::from("my-project"));
        assert_eq!(config.license, License::Mit);
        assert_eq!(config.package_manager, PackageManager::Bun);
        assert_eq!(config.author, "");
    }

    #[test]
    fn explicit_directory_is_kept() {
        let mut opts = named("my-project");
        opts.directory = Some(PathBuf::from("work/elsewhere"));
        let config = opts.resolve().unwrap();
        assert_eq!(config.target_directory, PathBuf::from("work/elsewhere"));
    }

    #[test]
    fn missing_name_is_an_error() {
        assert_eq!(
            ScaffoldOptions::default().resolve(),
            Err(DomainError::MissingProjectName)
        );
    }

    #[test]
    fn invalid_name_is_an_error() {
        assert!(matches!(
            named("Not Valid").resolve(),
            Err(DomainError::InvalidProjectName { .. })
        ));
    }

    // ── needs_interactive_mode ────────────────────────────────────────────

    #[test]
    fn interactive_when_name_absent() {
        let opts = ScaffoldOptions {
            all: true,
            ..Default::default()
        };
        assert!(opts.needs_interactive_mode());
    }

    #[test]
    fn interactive_when_no_component_decision() {
        assert!(named("demo").needs_interactive_mode());
    }

    #[test]
    fn not_interactive_with_preset_or_single_flag() {
        let mut with_all = named("demo");
        with_all.all = true;
        assert!(!with_all.needs_interactive_mode());

        let mut with_minimal = named("demo");
        with_minimal.minimal = true;
        assert!(!with_minimal.needs_interactive_mode());

        for module in OptionalModule::ALL {
            let mut opts = named("demo");
            opts.modules.set(module, true);
            assert!(!opts.needs_interactive_mode(), "flag {module} ignored");
        }
    }

    // ── ModuleSelection ───────────────────────────────────────────────────

    #[test]
    fn selection_partitions_modules() {
        let selection = ModuleSelection::from_modules([OptionalModule::Worker]);
        assert_eq!(selection.included().collect::<Vec<_>>(), vec![OptionalModule::Worker]);
        assert_eq!(selection.excluded().count(), 4);
        assert_eq!(selection.to_string(), "worker");
        assert_eq!(ModuleSelection::default().to_string(), "none");
    }
}
