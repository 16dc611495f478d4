//! Interactive completion of scaffold options.
//!
//! Runs when the project name or the module decision is missing. On a
//! terminal (and with the `interactive` feature) the gaps are filled with
//! prompts; otherwise a missing module decision falls back to the minimal
//! set and a missing name is left for option resolution to reject.

use std::io::{self, IsTerminal};
use std::path::Path;

use tracing::info;

use monoseed_core::domain::{ScaffoldOptions, slugify};

use crate::error::CliResult;
use crate::output::OutputManager;

/// Fill whatever `options` leaves undecided.
pub fn complete(options: ScaffoldOptions, output: &OutputManager) -> CliResult<ScaffoldOptions> {
    let terminal = io::stdin().is_terminal() && io::stdout().is_terminal() && !output.is_json();
    if terminal {
        prompt(options)
    } else {
        Ok(non_interactive(options))
    }
}

/// Fallback when nobody can answer prompts.
fn non_interactive(mut options: ScaffoldOptions) -> ScaffoldOptions {
    if !options.has_component_decision() {
        info!("No module flags given and not interactive, using the minimal set");
        options.minimal = true;
    }
    options
}

/// Name suggestion for the prompt: the slug of the target directory, or of
/// the working directory when none was given.
fn suggested_name(directory: Option<&Path>) -> String {
    let dir = directory
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok());
    dir.as_deref()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .map(slugify)
        .unwrap_or_default()
}

#[cfg(feature = "interactive")]
fn prompt(mut options: ScaffoldOptions) -> CliResult<ScaffoldOptions> {
    use dialoguer::{Input, MultiSelect, Select, theme::ColorfulTheme};
    use monoseed_core::domain::{
        License, ModuleSelection, OptionalModule, PackageManager, validate_project_name,
    };

    let theme = ColorfulTheme::default();

    if options.project_name.is_none() {
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt("Project name")
            .validate_with(|name: &String| -> Result<(), String> {
                let check = validate_project_name(name);
                match check.message {
                    Some(message) if !check.valid => Err(message),
                    _ => Ok(()),
                }
            });
        let suggestion = suggested_name(options.directory.as_deref());
        if !suggestion.is_empty() {
            input = input.default(suggestion);
        }
        options.project_name = Some(input.interact_text()?);
    }

    if !options.has_component_decision() {
        let items: Vec<String> = OptionalModule::ALL
            .iter()
            .map(|m| format!("{:<7} {}", m.as_str(), m.description()))
            .collect();
        let chosen = MultiSelect::with_theme(&theme)
            .with_prompt("Optional modules (space to toggle, enter to confirm)")
            .items(&items)
            .interact()?;
        options.modules =
            ModuleSelection::from_modules(chosen.into_iter().map(|i| OptionalModule::ALL[i]));
        // An empty selection is still a decision.
        if !options.modules.any() {
            options.minimal = true;
        }
    }

    if options.license.is_none() {
        let names: Vec<&str> = License::ALL.iter().map(License::as_str).collect();
        let index = Select::with_theme(&theme)
            .with_prompt("License")
            .items(&names)
            .default(0)
            .interact()?;
        options.license = Some(License::ALL[index]);
    }

    if options.package_manager.is_none() {
        let managers = [
            PackageManager::Bun,
            PackageManager::Npm,
            PackageManager::Yarn,
            PackageManager::Pnpm,
        ];
        let names: Vec<&str> = managers.iter().map(PackageManager::as_str).collect();
        let index = Select::with_theme(&theme)
            .with_prompt("Package manager")
            .items(&names)
            .default(0)
            .interact()?;
        options.package_manager = Some(managers[index]);
    }

    Ok(options)
}

#[cfg(not(feature = "interactive"))]
fn prompt(options: ScaffoldOptions) -> CliResult<ScaffoldOptions> {
    use crate::error::CliError;

    if options.project_name.is_none() {
        return Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        });
    }
    Ok(non_interactive(options))
}
