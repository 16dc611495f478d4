//! Diagnostics go to stderr through a `tracing` subscriber installed here.
//!
//! The core and adapter crates only emit events; this is the one place a
//! subscriber is built. `-v` flags raise the level one step at a time
//! (warn, info, debug, trace), `--quiet` drops it to errors, and a set
//! `RUST_LOG` replaces the computed filter entirely.

use std::io::IsTerminal as _;

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;
use crate::cli::global::OutputFormat;

/// Crates whose events pass the computed filter.
const CRATES: [&str; 3] = ["monoseed", "monoseed_core", "monoseed_adapters"];

/// Install the stderr subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(crate_filter(level_for(args))));

    // JSON runs are usually captured by scripts; keep stderr free of escapes.
    let ansi = !args.no_color
        && args.output_format != OutputFormat::Json
        && std::io::stderr().is_terminal();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

fn level_for(args: &GlobalArgs) -> Level {
    if args.quiet {
        return Level::ERROR;
    }
    match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// `monoseed=<level>,monoseed_core=<level>,...`
fn crate_filter(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
