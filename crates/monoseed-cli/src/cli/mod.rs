//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use monoseed_core::domain::{License, ModuleSelection, PackageManager, ScaffoldOptions};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Project creation is the default action, so its arguments live on the
/// top-level command; `completions` is the only subcommand.
#[derive(Debug, Parser)]
#[command(
    name    = "monoseed",
    bin_name = "monoseed",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f331} Bootstrap a monorepo from a template",
    long_about = "monoseed clones a monorepo template, removes the components you \
                  did not ask for, fills in your project details, and optionally \
                  installs dependencies.",
    after_help = "EXAMPLES:\n\
        \x20 monoseed my-project --all\n\
        \x20 monoseed my-project --worker --license Apache-2.0 --skip-install\n\
        \x20 monoseed my-project --minimal --dry-run\n\
        \x20 monoseed completions bash > ~/.local/share/bash-completion/completions/monoseed",
    args_conflicts_with_subcommands = true,
)]
pub struct Cli {
    /// Flags available on every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Project creation arguments.
    #[command(flatten)]
    pub create: CreateArgs,

    /// Optional subcommand.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 monoseed completions bash > ~/.local/share/bash-completion/completions/monoseed\n\
            \x20 monoseed completions zsh  > ~/.zfunc/_monoseed\n\
            \x20 monoseed completions fish > ~/.config/fish/completions/monoseed.fish"
    )]
    Completions(CompletionsArgs),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for project creation.
#[derive(Debug, Clone, Default, Args)]
pub struct CreateArgs {
    /// Project name. Prompted for when omitted on a terminal.
    #[arg(value_name = "NAME", help = "Project name (lowercase, npm-style)")]
    pub name: Option<String>,

    #[arg(
        short = 'd',
        long = "directory",
        value_name = "DIR",
        help = "Target directory (default: ./<NAME>)"
    )]
    pub directory: Option<PathBuf>,

    #[arg(
        short = 'a',
        long = "author",
        value_name = "AUTHOR",
        help = "Author written into the generated files"
    )]
    pub author: Option<String>,

    #[arg(
        short = 'l',
        long = "license",
        value_name = "LICENSE",
        value_enum,
        ignore_case = true,
        help = "License of the generated project"
    )]
    pub license: Option<LicenseArg>,

    #[arg(
        short = 'p',
        long = "package-manager",
        value_name = "PM",
        value_enum,
        help = "Package manager used to install dependencies"
    )]
    pub package_manager: Option<PackageManagerArg>,

    #[arg(long = "api", help = "Include the HTTP API service (apps/api)")]
    pub api: bool,

    #[arg(long = "worker", help = "Include the background worker (apps/worker)")]
    pub worker: bool,

    #[arg(long = "evals", help = "Include the evaluation harness (packages/evals)")]
    pub evals: bool,

    #[arg(
        long = "config",
        help = "Include the shared configuration package (packages/config)"
    )]
    pub config: bool,

    #[arg(long = "rag", help = "Add the vector-search (RAG) package")]
    pub rag: bool,

    /// Preset: every optional module. Wins over individual module flags.
    #[arg(long = "all", help = "Include every optional module")]
    pub all: bool,

    /// Preset: no optional modules. Wins over individual module flags.
    #[arg(long = "minimal", help = "Include no optional modules")]
    pub minimal: bool,

    /// Remove an existing target directory first (destructive).
    #[arg(short = 'f', long = "force", help = "Overwrite an existing directory")]
    pub force: bool,

    #[arg(long = "skip-install", help = "Do not install dependencies")]
    pub skip_install: bool,

    #[arg(long = "skip-git", help = "Do not initialise a git repository")]
    pub skip_git: bool,

    /// Print every action without touching the filesystem or network.
    #[arg(long = "dry-run", help = "Show what would be done without doing it")]
    pub dry_run: bool,
}

impl CreateArgs {
    pub fn modules(&self) -> ModuleSelection {
        ModuleSelection {
            api: self.api,
            worker: self.worker,
            evals: self.evals,
            config: self.config,
            rag: self.rag,
        }
    }

    /// Flag values as partial scaffold options. Presets are passed through
    /// unresolved so that a conflict surfaces from option resolution.
    pub fn to_options(&self) -> ScaffoldOptions {
        ScaffoldOptions {
            project_name: self.name.clone(),
            directory: self.directory.clone(),
            author: self.author.clone(),
            license: self.license.map(Into::into),
            package_manager: self.package_manager.map(Into::into),
            modules: self.modules(),
            all: self.all,
            minimal: self.minimal,
            force: self.force,
            skip_install: self.skip_install,
            skip_vcs_init: self.skip_git,
            dry_run: self.dry_run,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `monoseed completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: clap_complete::Shell,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Licenses accepted by `--license`, spelled as SPDX identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LicenseArg {
    #[value(name = "MIT")]
    Mit,
    #[value(name = "Apache-2.0", alias = "apache")]
    Apache2,
    #[value(name = "ISC")]
    Isc,
    #[value(name = "GPL-3.0", alias = "gpl")]
    Gpl3,
    #[value(name = "BSD-3-Clause", alias = "bsd")]
    Bsd3Clause,
    #[value(name = "UNLICENSED")]
    Unlicensed,
}

impl From<LicenseArg> for License {
    fn from(arg: LicenseArg) -> Self {
        match arg {
            LicenseArg::Mit => License::Mit,
            LicenseArg::Apache2 => License::Apache2,
            LicenseArg::Isc => License::Isc,
            LicenseArg::Gpl3 => License::Gpl3,
            LicenseArg::Bsd3Clause => License::Bsd3Clause,
            LicenseArg::Unlicensed => License::Unlicensed,
        }
    }
}

/// Package managers accepted by `--package-manager`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PackageManagerArg {
    Bun,
    Npm,
    Yarn,
    Pnpm,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Bun => PackageManager::Bun,
            PackageManagerArg::Npm => PackageManager::Npm,
            PackageManagerArg::Yarn => PackageManager::Yarn,
            PackageManagerArg::Pnpm => PackageManager::Pnpm,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_name_and_module_flags() {
        let cli = Cli::parse_from(["monoseed", "my-project", "--worker", "--rag", "-f"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.create.name.as_deref(), Some("my-project"));

        let opts = cli.create.to_options();
        assert!(opts.modules.worker);
        assert!(opts.modules.rag);
        assert!(!opts.modules.api);
        assert!(opts.force);
    }

    #[test]
    fn name_is_optional() {
        let cli = Cli::parse_from(["monoseed", "--all"]);
        assert!(cli.create.name.is_none());
        assert!(cli.create.all);
    }

    #[test]
    fn license_accepts_spdx_case_insensitively() {
        let cli = Cli::parse_from(["monoseed", "demo", "--license", "apache-2.0"]);
        assert_eq!(cli.create.license, Some(LicenseArg::Apache2));
        assert_eq!(License::from(LicenseArg::Apache2), License::Apache2);

        let cli = Cli::parse_from(["monoseed", "demo", "-l", "BSD-3-Clause"]);
        assert_eq!(cli.create.license, Some(LicenseArg::Bsd3Clause));
    }

    #[test]
    fn unknown_license_is_rejected() {
        assert!(Cli::try_parse_from(["monoseed", "demo", "--license", "WTFPL"]).is_err());
    }

    #[test]
    fn package_manager_short_flag() {
        let cli = Cli::parse_from(["monoseed", "demo", "-p", "pnpm"]);
        let opts = cli.create.to_options();
        assert_eq!(opts.package_manager, Some(PackageManager::Pnpm));
    }

    #[test]
    fn module_config_flag_and_config_file_are_distinct() {
        let cli = Cli::parse_from([
            "monoseed",
            "demo",
            "--config",
            "--config-file",
            "monoseed.toml",
        ]);
        assert!(cli.create.config);
        assert_eq!(
            cli.global.config_file.as_deref(),
            Some(std::path::Path::new("monoseed.toml"))
        );
    }

    #[test]
    fn skip_git_maps_to_skip_vcs_init() {
        let cli = Cli::parse_from(["monoseed", "demo", "--skip-git", "--skip-install"]);
        let opts = cli.create.to_options();
        assert!(opts.skip_vcs_init);
        assert!(opts.skip_install);
    }

    #[test]
    fn both_presets_parse_and_conflict_on_resolve() {
        let cli = Cli::parse_from(["monoseed", "demo", "--all", "--minimal"]);
        assert!(cli.create.to_options().resolve().is_err());
    }

    #[test]
    fn completions_subcommand() {
        let cli = Cli::parse_from(["monoseed", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions(CompletionsArgs {
                shell: clap_complete::Shell::Zsh
            }))
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["monoseed", "--quiet", "--verbose", "demo"]);
        assert!(result.is_err());
    }
}
