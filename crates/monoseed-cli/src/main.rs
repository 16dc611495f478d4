//! # monoseed CLI
//!
//! Bootstrap a multi-component monorepo from a template.
//!
//! ## Startup sequence
//!
//! 1. Load `.env`, then parse CLI arguments.
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env).
//! 4. Build the [`OutputManager`] and start the update check.
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success (warnings allowed)               |
//! |  1   | Internal / system error (network, clone) |
//! |  2   | User / input error                       |
//! |  4   | Configuration error                      |

use std::io::IsTerminal as _;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info, instrument};

use monoseed_adapters::SystemProcessRunner;

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
    update_check::UpdateCheck,
};

mod cli;
mod commands;
mod config;
mod error;
mod interactive;
mod logging;
mod output;
mod update_check;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    // `--help` and `--version` come back as errors with exit code 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };
    let verbose = cli.global.verbose > 0;

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config_file.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(CliError::config(e), verbose),
    };

    // ── 4. Output manager + update check ──────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let update = match cli.command {
        Some(Commands::Completions(_)) => None,
        None => UpdateCheck::spawn(
            Arc::new(SystemProcessRunner::new()),
            output.is_quiet() || output.is_json(),
        ),
    };

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    let code = match run(cli, &config, &output) {
        Ok(()) => {
            info!("monoseed completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    };

    if let Some(latest) = update.as_ref().and_then(UpdateCheck::poll) {
        if std::io::stderr().is_terminal() {
            eprintln!(
                "\n{}",
                update_check::notice(&latest, output.supports_color())
            );
        }
    }

    code
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cli.command {
        Some(Commands::Completions(args)) => commands::completions::execute(args),
        None => commands::create::execute(cli.create, config, output),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // stderr, so the message appears even when stdout is redirected.
    let msg = if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
