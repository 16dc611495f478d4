//! Output management and formatting.
//!
//! [`OutputManager`] renders scaffold progress: a spinner while an action
//! runs, then one status line per action. In JSON mode stdout carries only
//! the serialized [`ScaffoldResult`].

use std::cell::RefCell;
use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::debug;

use monoseed_core::{
    application::{ScaffoldResult, ScaffoldWarning, ports::ProgressSink, ports::StepStatus},
    domain::{PlannedAction, ScaffoldConfig},
};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Prefix of actions recorded under `--dry-run`.
const DRY_RUN_PREFIX: &str = "would:";

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    spinners: bool,
    term: Term,
    err_term: Term,
    spinner: RefCell<Option<ProgressBar>>,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let stdout_is_tty = io::stdout().is_terminal();

        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if stdout_is_tty {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        let human = resolved_format == OutputFormat::Human;
        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !human,
            spinners: human && !args.quiet && io::stderr().is_terminal(),
            term: Term::stdout(),
            err_term: Term::stderr(),
            spinner: RefCell::new(None),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.term.write_line(&self.success_line(msg))
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.term.write_line(&self.warning_line(msg))
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.term.write_line(&self.info_line(msg))
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Describe what is about to be created.
    pub fn show_configuration(&self, config: &ScaffoldConfig) -> io::Result<()> {
        let verb = if config.dry_run { "Planning" } else { "Creating" };
        self.header(&format!("{verb} '{}'", config.project_name))?;
        self.print(&format!("  Modules:         {}", config.modules))?;
        self.print(&format!("  License:         {}", config.license))?;
        if !config.author.is_empty() {
            self.print(&format!("  Author:          {}", config.author))?;
        }
        self.print(&format!("  Package manager: {}", config.package_manager))?;
        self.print(&format!(
            "  Location:        {}",
            config.target_directory.display()
        ))?;
        self.print("")
    }

    /// Final report. JSON mode prints the serialized result even when quiet.
    pub fn print_result(&self, result: &ScaffoldResult, config: &ScaffoldConfig) -> io::Result<()> {
        if self.is_json() {
            let json = serde_json::to_string_pretty(result).map_err(io::Error::from)?;
            return self.term.write_line(&json);
        }
        if !result.success() {
            // The error itself is rendered by the caller on stderr.
            return Ok(());
        }

        self.print("")?;
        if result.dry_run {
            self.info(&format!(
                "Dry run: {} action(s) planned, nothing was changed",
                result.actions.len()
            ))?;
        } else {
            self.success(&format!(
                "Project '{}' created at {}",
                config.project_name,
                result.target_path.display()
            ))?;
        }

        if !result.warnings.is_empty() {
            self.warning(&format!(
                "Completed with {} warning(s)",
                result.warnings.len()
            ))?;
        }

        if !result.dry_run {
            self.print("")?;
            self.print("Next steps:")?;
            self.print(&format!("  cd {}", config.target_directory.display()))?;
            if config.skip_install {
                self.print(&format!("  {}", config.package_manager.install_command_line()))?;
            }
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    // ── Line rendering ────────────────────────────────────────────────────

    fn silent(&self) -> bool {
        self.quiet || self.is_json()
    }

    fn success_line(&self, msg: &str) -> String {
        if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        }
    }

    fn error_line(&self, msg: &str) -> String {
        if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        }
    }

    fn warning_line(&self, msg: &str) -> String {
        if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        }
    }

    fn info_line(&self, msg: &str) -> String {
        if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        }
    }

    fn action_line(&self, action: &PlannedAction, status: StepStatus) -> String {
        match status {
            StepStatus::Done => self.success_line(&action.description),
            StepStatus::Planned => {
                self.info_line(&format!("{DRY_RUN_PREFIX} {}", action.description))
            }
            StepStatus::Failed => self.error_line(&action.description),
        }
    }

    fn warning_lines(&self, warning: &ScaffoldWarning) -> Vec<String> {
        let mut lines = vec![self.warning_line(&warning.message)];
        if let Some(command) = &warning.remediation {
            lines.push(format!("    run: {command}"));
        }
        lines
    }

    fn clear_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }

    fn emit(&self, line: &str) {
        if let Err(e) = self.term.write_line(line) {
            debug!(error = %e, "Failed to write progress line");
        }
    }

    /// Where warnings go: stdout normally, stderr under `--quiet`, nowhere
    /// in JSON mode (the result carries them).
    fn warning_term(&self) -> Option<&Term> {
        if self.is_json() {
            None
        } else if self.quiet {
            Some(&self.err_term)
        } else {
            Some(&self.term)
        }
    }
}

impl ProgressSink for OutputManager {
    fn begin(&self, action: &PlannedAction) {
        if !self.spinners {
            return;
        }
        self.clear_spinner();

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(action.description.clone());
        spinner.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn finish(&self, action: &PlannedAction, status: StepStatus) {
        self.clear_spinner();
        let visible = match status {
            StepStatus::Failed => !self.is_json(),
            StepStatus::Done | StepStatus::Planned => !self.silent(),
        };
        if visible {
            self.emit(&self.action_line(action, status));
        }
    }

    fn warning(&self, warning: &ScaffoldWarning) {
        self.clear_spinner();
        let Some(term) = self.warning_term() else {
            return;
        };
        for line in self.warning_lines(warning) {
            if let Err(e) = term.write_line(&line) {
                debug!(error = %e, "Failed to write warning");
            }
        }
    }
}

impl Drop for OutputManager {
    fn drop(&mut self) {
        self.clear_spinner();
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use monoseed_core::domain::Stage;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config_file: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    fn plain() -> OutputManager {
        make_manager(false, false, OutputFormat::Plain)
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
        assert!(out.is_quiet());
    }

    #[test]
    fn plain_format_never_colors() {
        assert!(!plain().supports_color());
        assert!(make_manager(false, false, OutputFormat::Human).supports_color());
        assert!(!make_manager(false, true, OutputFormat::Human).supports_color());
    }

    #[test]
    fn config_file_can_disable_color() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let args = GlobalArgs {
            output_format: OutputFormat::Human,
            ..Default::default()
        };
        assert!(!OutputManager::new(&args, &config).supports_color());
    }

    #[test]
    fn json_format_is_resolved_as_is() {
        assert!(make_manager(false, false, OutputFormat::Json).is_json());
        assert!(!plain().is_json());
    }

    #[test]
    fn planned_actions_are_prefixed() {
        let action = PlannedAction::new(Stage::Prune, "remove apps/api");
        assert_eq!(
            plain().action_line(&action, StepStatus::Planned),
            "\u{2139} would: remove apps/api"
        );
        assert_eq!(
            plain().action_line(&action, StepStatus::Done),
            "\u{2713} remove apps/api"
        );
        assert_eq!(
            plain().action_line(&action, StepStatus::Failed),
            "\u{2717} remove apps/api"
        );
    }

    #[test]
    fn warnings_show_remediation() {
        let warning = ScaffoldWarning::new("bun install failed").with_remediation("cd demo && bun install");
        assert_eq!(
            plain().warning_lines(&warning),
            vec![
                "\u{26a0} bun install failed".to_string(),
                "    run: cd demo && bun install".to_string(),
            ]
        );
    }

    #[test]
    fn quiet_mode_routes_warnings_to_stderr() {
        let quiet = make_manager(true, true, OutputFormat::Plain);
        let term = quiet.warning_term().unwrap();
        assert!(matches!(term.target(), console::TermTarget::Stderr));

        let normal = plain();
        let term = normal.warning_term().unwrap();
        assert!(matches!(term.target(), console::TermTarget::Stdout));

        assert!(make_manager(true, false, OutputFormat::Json).warning_term().is_none());
    }

    #[test]
    fn plain_output_never_starts_spinners() {
        let out = plain();
        out.begin(&PlannedAction::new(Stage::Clone, "clone template"));
        assert!(out.spinner.borrow().is_none());
    }
}
