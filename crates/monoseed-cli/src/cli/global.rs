//! Flags shared by project creation and `completions`.

use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Log more of what each stage does (clone, prune, install) on stderr.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More diagnostics on stderr (-v info, -vv debug, -vvv trace)"
    )]
    pub verbose: u8,

    /// Hide progress lines. Install and git warnings still reach stderr.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Hide progress; only failures and warnings are shown"
    )]
    pub quiet: bool,

    /// Also honoured through `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    // `--config` selects the shared-configuration package.
    #[arg(
        long = "config-file",
        global = true,
        value_name = "FILE",
        env = "MONOSEED_CONFIG_FILE",
        help = "Read defaults from FILE instead of the per-user config.toml"
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed; `json` emits only the scaffold result"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of progress and the final report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` otherwise.
    #[default]
    Auto,
    /// Colored status lines with a spinner.
    Human,
    /// Status lines without color or spinner.
    Plain,
    /// A single JSON document on stdout.
    Json,
}
