//! Project creation, the default command.
//!
//! Responsibility: merge flags with configured defaults, fill gaps
//! interactively, build the adapters, run the core scaffold service, and
//! display results. No business logic lives here.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use monoseed_adapters::{
    BuiltinAddons, DirectoryAddons, GitRemoteProbe, LocalFilesystem, SystemProcessRunner,
};
use monoseed_core::{
    application::{AddonCatalog, ScaffoldService},
    domain::ScaffoldOptions,
};

use crate::{
    cli::CreateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    interactive,
    output::OutputManager,
};

/// Execute project creation.
///
/// Dispatch sequence:
/// 1. Reject contradictory flags, then merge them over configured defaults
/// 2. Prompt for anything still undecided (or fall back when not a TTY)
/// 3. Resolve into a validated `ScaffoldConfig`
/// 4. Run the scaffold service, streaming progress to `output`
/// 5. Print the result; a fatal scaffold error becomes the command error
#[instrument(skip_all, fields(project = args.name.as_deref().unwrap_or("<unset>")))]
pub fn execute(args: CreateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let options = prepare_options(args.to_options(), config)?;

    let options = if options.needs_interactive_mode() {
        debug!("Options incomplete, collecting the rest");
        interactive::complete(options, output)?
    } else {
        options
    };

    let scaffold_config = options.resolve().map_err(|e| CliError::Core(e.into()))?;
    debug!(
        modules = %scaffold_config.modules,
        license = %scaffold_config.license,
        package_manager = %scaffold_config.package_manager,
        "Options resolved"
    );

    output.show_configuration(&scaffold_config)?;

    let service = build_service(config);
    info!(template = %service.source().url, "Scaffold started");
    let mut result = service.scaffold(&scaffold_config, output);

    output.print_result(&result, &scaffold_config)?;

    match result.error.take() {
        Some(err) => Err(CliError::Core(err)),
        None => {
            info!(
                actions = result.actions.len(),
                warnings = result.warnings.len(),
                "Scaffold completed"
            );
            Ok(())
        }
    }
}

/// Checks that need no I/O run here, ahead of any prompt.
fn prepare_options(options: ScaffoldOptions, config: &AppConfig) -> CliResult<ScaffoldOptions> {
    options.preset().map_err(|e| CliError::Core(e.into()))?;
    merge_with_defaults(options, config)
}

/// Fill options the user left unset from the `[defaults]` config section.
fn merge_with_defaults(
    mut options: ScaffoldOptions,
    config: &AppConfig,
) -> CliResult<ScaffoldOptions> {
    let defaults = &config.defaults;
    let config_error = |e: monoseed_core::domain::DomainError| CliError::config(e.into());

    if options.author.is_none() {
        options.author = defaults.author.clone();
    }
    if options.license.is_none() {
        options.license = defaults.license().map_err(config_error)?;
    }
    if options.package_manager.is_none() {
        options.package_manager = defaults.package_manager().map_err(config_error)?;
    }
    Ok(options)
}

/// Wire the production adapters.
fn build_service(config: &AppConfig) -> ScaffoldService {
    let source = config.template.source();
    let runner = SystemProcessRunner::new();
    let probe = GitRemoteProbe::new(Arc::new(runner), source.url.clone());

    let addons: Box<dyn AddonCatalog> = match &config.template.addons_dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "Using add-on directory");
            Box::new(DirectoryAddons::new(dir))
        }
        None => Box::new(BuiltinAddons::new()),
    };

    ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(runner),
        Box::new(probe),
        addons,
    )
    .with_source(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use monoseed_core::domain::{License, PackageManager};

    fn config_with(author: &str, license: &str, pm: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.defaults.author = Some(author.into());
        config.defaults.license = Some(license.into());
        config.defaults.package_manager = Some(pm.into());
        config
    }

    #[test]
    fn defaults_fill_unset_options() {
        let merged = merge_with_defaults(
            ScaffoldOptions::default(),
            &config_with("Ada", "ISC", "yarn"),
        )
        .unwrap();
        assert_eq!(merged.author.as_deref(), Some("Ada"));
        assert_eq!(merged.license, Some(License::Isc));
        assert_eq!(merged.package_manager, Some(PackageManager::Yarn));
    }

    #[test]
    fn flags_win_over_defaults() {
        let options = ScaffoldOptions {
            author: Some("Grace".into()),
            license: Some(License::Mit),
            package_manager: Some(PackageManager::Npm),
            ..Default::default()
        };
        let merged = merge_with_defaults(options, &config_with("Ada", "ISC", "yarn")).unwrap();
        assert_eq!(merged.author.as_deref(), Some("Grace"));
        assert_eq!(merged.license, Some(License::Mit));
        assert_eq!(merged.package_manager, Some(PackageManager::Npm));
    }

    #[test]
    fn conflicting_presets_fail_before_defaults_or_prompts() {
        let options = ScaffoldOptions {
            all: true,
            minimal: true,
            ..Default::default()
        };
        // The invalid default would be a configuration error (exit 4) if it
        // were looked at first.
        let err = prepare_options(options, &config_with("Ada", "WTFPL-9", "bun")).unwrap_err();

        assert!(err.to_string().contains("cannot be combined"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn invalid_default_is_a_configuration_error() {
        let err = merge_with_defaults(
            ScaffoldOptions::default(),
            &config_with("Ada", "WTFPL", "bun"),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn configured_template_source_reaches_the_service() {
        let mut config = AppConfig::default();
        config.template.repository = Some("https://example.com/t.git".into());
        let service = build_service(&config);
        assert_eq!(service.source().url, "https://example.com/t.git");
        assert_eq!(service.source().origin_name, "monorepo-template");
    }
}
