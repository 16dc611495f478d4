//! Scaffold Service - main application orchestrator.
//!
//! This service drives the whole scaffolding workflow, strictly in order:
//!
//! 1. Connectivity check (skipped under dry-run)
//! 2. Target conflict check, removing the target under `--force`
//! 3. Shallow clone of the template (the only stage with a rollback)
//! 4. Removal of the template's VCS metadata
//! 5. Pruning of deselected template modules
//! 6. Placeholder substitution
//! 7. Add-on injection
//! 8. VCS initialization
//! 9. Dependency installation
//!
//! Stages 1-3 can fail the run. Later stages only produce warnings.
//! Under dry-run every stage records the action it would perform and
//! mutates nothing, so both modes produce the same action list.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Datelike;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{
            AddonCatalog, CommandSpec, ConnectivityProbe, Filesystem, ProcessOutcome,
            ProcessRunner, ProgressSink, StepStatus,
        },
    },
    domain::{
        AddonBundle, ModuleOrigin, OptionalModule, PlannedAction, ScaffoldConfig, Stage,
        TemplateSource, TemplateVariables,
    },
    error::{MonoseedError, MonoseedResult},
};

/// Upper bound for the dependency installation command.
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Root files that receive placeholder substitution.
const SUBSTITUTED_FILES: [&str; 5] = [
    "package.json",
    "README.md",
    "LICENSE",
    "turbo.json",
    ".env.example",
];

/// Workspace directories whose packages' manifests receive substitution.
const WORKSPACE_DIRS: [&str; 2] = ["apps", "packages"];

/// A non-fatal problem, with an optional command the user can run to fix it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldWarning {
    pub message: String,
    pub remediation: Option<String>,
}

impl ScaffoldWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            remediation: None,
        }
    }

    pub fn with_remediation(mut self, command: impl Into<String>) -> Self {
        self.remediation = Some(command.into());
        self
    }
}

/// Outcome of a scaffold run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldResult {
    pub target_path: PathBuf,
    pub actions: Vec<PlannedAction>,
    pub warnings: Vec<ScaffoldWarning>,
    pub error: Option<MonoseedError>,
    pub dry_run: bool,
}

impl ScaffoldResult {
    fn new(target_path: PathBuf, dry_run: bool) -> Self {
        Self {
            target_path,
            actions: Vec::new(),
            warnings: Vec::new(),
            error: None,
            dry_run,
        }
    }

    /// True iff no fatal error occurred. Warnings do not count.
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    /// The fatal error (if any) followed by every warning.
    pub fn messages(&self) -> Vec<String> {
        self.error
            .iter()
            .map(ToString::to_string)
            .chain(self.warnings.iter().map(|w| w.message.clone()))
            .collect()
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn ProcessRunner>,
    probe: Box<dyn ConnectivityProbe>,
    addons: Box<dyn AddonCatalog>,
    source: TemplateSource,
    year: Option<i32>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn ProcessRunner>,
        probe: Box<dyn ConnectivityProbe>,
        addons: Box<dyn AddonCatalog>,
    ) -> Self {
        Self {
            filesystem,
            runner,
            probe,
            addons,
            source: TemplateSource::default(),
            year: None,
        }
    }

    /// Clone from `source` instead of the default template.
    pub fn with_source(mut self, source: TemplateSource) -> Self {
        self.source = source;
        self
    }

    /// Pin the `{{YEAR}}` value instead of reading the clock.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Scaffold a new project.
    ///
    /// Never panics on I/O failure: fatal problems end up in
    /// [`ScaffoldResult::error`], non-fatal ones in
    /// [`ScaffoldResult::warnings`].
    #[instrument(
        skip_all,
        fields(
            run_id = %Uuid::new_v4(),
            project = %config.project_name,
            dry_run = config.dry_run,
        )
    )]
    pub fn scaffold(&self, config: &ScaffoldConfig, sink: &dyn ProgressSink) -> ScaffoldResult {
        let target = std::path::absolute(&config.target_directory)
            .unwrap_or_else(|_| config.target_directory.clone());
        info!(target = %target.display(), modules = %config.modules, "Scaffolding project");

        let mut run = Run {
            sink,
            dry_run: config.dry_run,
            result: ScaffoldResult::new(target.clone(), config.dry_run),
        };

        if let Err(e) = self.prepare_target(config, &target, &mut run) {
            warn!(error = %e, "Scaffold aborted");
            run.result.error = Some(e);
            return run.result;
        }

        self.strip_vcs(&target, &mut run);
        self.prune(config, &target, &mut run);
        self.substitute(config, &target, &mut run);
        self.inject_addons(config, &target, &mut run);

        if !config.skip_vcs_init {
            self.init_vcs(&target, &mut run);
        }
        if !config.skip_install {
            self.install(config, &target, &mut run);
        }

        info!(
            actions = run.result.actions.len(),
            warnings = run.result.warnings.len(),
            "Scaffold completed"
        );
        run.result
    }

    // -------------------------------------------------------------------------
    // Fatal stages
    // -------------------------------------------------------------------------

    /// Connectivity, conflict handling and clone.
    fn prepare_target(
        &self,
        config: &ScaffoldConfig,
        target: &Path,
        run: &mut Run<'_>,
    ) -> MonoseedResult<()> {
        if !config.dry_run && !self.probe.is_reachable() {
            return Err(ApplicationError::NetworkUnavailable {
                url: self.source.url.clone(),
            }
            .into());
        }

        if self.filesystem.exists(target) {
            if !config.force_overwrite {
                return Err(ApplicationError::TargetExists {
                    path: target.to_path_buf(),
                }
                .into());
            }

            let action = PlannedAction::new(
                Stage::RemoveExisting,
                format!("remove existing {}", target.display()),
            );
            run.perform(action, || self.filesystem.remove_dir_all(target))?;
        }

        let clone = CommandSpec::new("git").args([
            "clone".to_string(),
            "--depth".to_string(),
            "1".to_string(),
            self.source.url.clone(),
            target.display().to_string(),
        ]);
        let action = PlannedAction::new(Stage::Clone, clone.to_string());
        run.perform(action, || self.clone_template(&clone, target))
    }

    fn clone_template(&self, clone: &CommandSpec, target: &Path) -> MonoseedResult<()> {
        let output = self.runner.run(clone);
        if output.success() {
            debug!("Template cloned");
            return Ok(());
        }

        // A `git` that cannot be started is reported like any other failed
        // clone, with the spawn error as its stderr.
        let error: MonoseedError = match output.outcome {
            ProcessOutcome::TimedOut => ApplicationError::Timeout {
                command: clone.to_string(),
                after: clone.timeout.unwrap_or_default(),
            },
            ProcessOutcome::SpawnFailed | ProcessOutcome::Exited => ApplicationError::CloneFailed {
                stderr: output.diagnostic().to_string(),
            },
        }
        .into();

        warn!(error = %error, "Clone failed, removing partial target");
        if let Err(e) = self.filesystem.remove_dir_all(target) {
            warn!(error = %e, path = %target.display(), "Rollback failed");
        }
        Err(error)
    }

    // -------------------------------------------------------------------------
    // Best-effort stages
    // -------------------------------------------------------------------------

    fn strip_vcs(&self, target: &Path, run: &mut Run<'_>) {
        let git_dir = target.join(".git");
        let action = PlannedAction::new(Stage::StripVcs, "remove template .git directory");
        if let Err(e) = run.perform(action, || self.filesystem.remove_dir_all(&git_dir)) {
            run.warn(ScaffoldWarning::new(format!(
                "Could not remove template VCS metadata: {e}"
            )));
        }
    }

    fn prune(&self, config: &ScaffoldConfig, target: &Path, run: &mut Run<'_>) {
        for module in config.modules.excluded() {
            let ModuleOrigin::Template { directory } = module.origin() else {
                continue;
            };

            let path = target.join(directory);
            let action = PlannedAction::new(
                Stage::Prune,
                format!("remove {directory} ({module} not selected)"),
            );
            let outcome = run.perform(action, || {
                if self.filesystem.is_dir(&path) {
                    debug!(module = %module, "Pruning module");
                    self.filesystem.remove_dir_all(&path)
                } else {
                    debug!(module = %module, "Module directory absent, nothing to prune");
                    Ok(())
                }
            });
            if let Err(e) = outcome {
                run.warn(ScaffoldWarning::new(format!("Could not remove {directory}: {e}")));
            }
        }
    }

    fn substitute(&self, config: &ScaffoldConfig, target: &Path, run: &mut Run<'_>) {
        let vars = self.variables(config);
        let action = PlannedAction::new(Stage::Substitute, "substitute template variables");

        let mut failures = Vec::new();
        let outcome = run.perform(action, || {
            for path in substitution_targets(self.filesystem.as_ref(), target)? {
                if let Err(e) = self.apply_to_file(&path, &vars) {
                    failures.push(ScaffoldWarning::new(format!(
                        "Could not substitute variables in {}: {e}",
                        path.display()
                    )));
                }
            }
            Ok(())
        });

        if let Err(e) = outcome {
            run.warn(ScaffoldWarning::new(format!(
                "Could not substitute template variables: {e}"
            )));
        }
        for failure in failures {
            run.warn(failure);
        }
    }

    /// Rewrite one file. Missing files are skipped, unchanged files untouched.
    fn apply_to_file(&self, path: &Path, vars: &TemplateVariables) -> MonoseedResult<()> {
        let Some(content) = self.filesystem.read_to_string(path)? else {
            debug!(path = %path.display(), "Skipping missing file");
            return Ok(());
        };

        let rendered = vars.substitute(&content);
        if rendered != content {
            debug!(path = %path.display(), "Substituted variables");
            self.filesystem.write_file(path, &rendered)?;
        }
        Ok(())
    }

    fn inject_addons(&self, config: &ScaffoldConfig, target: &Path, run: &mut Run<'_>) {
        let selected = config
            .modules
            .included()
            .filter(|m| m.origin() == ModuleOrigin::AddOn);

        for module in selected {
            match self.load_addon(module) {
                Ok(bundle) => self.inject_bundle(&bundle, config, target, run),
                Err(e) => run.warn(ScaffoldWarning::new(format!(
                    "Skipped {module} add-on: {e}"
                ))),
            }
        }
    }

    fn load_addon(&self, module: OptionalModule) -> MonoseedResult<AddonBundle> {
        let bundle = self.addons.get(module)?.ok_or_else(|| MonoseedError::Internal {
            message: format!("no bundle registered for add-on '{module}'"),
        })?;
        bundle.validate()?;
        Ok(bundle)
    }

    fn inject_bundle(
        &self,
        bundle: &AddonBundle,
        config: &ScaffoldConfig,
        target: &Path,
        run: &mut Run<'_>,
    ) {
        let vars = self.variables(config);

        for file in &bundle.files {
            let path = file.path.under(target);
            let action = PlannedAction::new(Stage::Inject, format!("create {}", file.path));
            let content = vars.substitute(&file.content);
            if let Err(e) = run.perform(action, || self.filesystem.write_file(&path, &content)) {
                run.warn(ScaffoldWarning::new(format!("Could not create {}: {e}", file.path)));
            }
        }

        for append in &bundle.appends {
            let path = append.path.under(target);
            let action = PlannedAction::new(Stage::Inject, format!("append to {}", append.path));
            let snippet = vars.substitute(&append.snippet);
            if let Err(e) = run.perform(action, || self.filesystem.append_file(&path, &snippet)) {
                run.warn(ScaffoldWarning::new(format!(
                    "Could not append to {}: {e}",
                    append.path
                )));
            }
        }
    }

    fn init_vcs(&self, target: &Path, run: &mut Run<'_>) {
        let init = CommandSpec::new("git").arg("init").current_dir(target);
        let action = PlannedAction::new(Stage::InitVcs, init.to_string());

        if let Err(e) = run.perform(action, || self.run_checked(&init)) {
            run.warn(
                ScaffoldWarning::new(format!("Failed to initialize git repository: {e}"))
                    .with_remediation("git init"),
            );
        }
    }

    fn install(&self, config: &ScaffoldConfig, target: &Path, run: &mut Run<'_>) {
        let (program, args) = config.package_manager.install_command();
        let install = CommandSpec::new(program)
            .args(args.iter().copied())
            .current_dir(target)
            .timeout(INSTALL_TIMEOUT);
        let action = PlannedAction::new(Stage::Install, install.to_string());

        if let Err(e) = run.perform(action, || self.run_checked(&install)) {
            run.warn(
                ScaffoldWarning::new(format!("Dependency installation failed: {e}"))
                    .with_remediation(format!(
                        "cd {} && {}",
                        target.display(),
                        config.package_manager.install_command_line()
                    )),
            );
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn variables(&self, config: &ScaffoldConfig) -> TemplateVariables {
        let year = self.year.unwrap_or_else(|| chrono::Local::now().year());
        TemplateVariables::for_config(config, &self.source, year)
    }

    /// Run a command, mapping every non-success outcome to an error.
    fn run_checked(&self, spec: &CommandSpec) -> MonoseedResult<()> {
        let output = self.runner.run(spec);
        match output.outcome {
            _ if output.success() => Ok(()),
            ProcessOutcome::TimedOut => Err(ApplicationError::Timeout {
                command: spec.to_string(),
                after: spec.timeout.unwrap_or_default(),
            }
            .into()),
            _ => Err(ApplicationError::ProcessFailed {
                command: spec.to_string(),
                reason: output.diagnostic().to_string(),
            }
            .into()),
        }
    }
}

/// Files that receive placeholder substitution under `target`: the fixed
/// root files plus every package manifest one level inside the workspace
/// directories that still exist.
pub fn substitution_targets(fs: &dyn Filesystem, target: &Path) -> MonoseedResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = SUBSTITUTED_FILES.iter().map(|f| target.join(f)).collect();

    for dir in WORKSPACE_DIRS {
        for package in fs.list_dirs(&target.join(dir))? {
            let manifest = package.join("package.json");
            if fs.exists(&manifest) {
                files.push(manifest);
            }
        }
    }

    Ok(files)
}

/// Per-run bookkeeping shared by all stages.
struct Run<'a> {
    sink: &'a dyn ProgressSink,
    dry_run: bool,
    result: ScaffoldResult,
}

impl Run<'_> {
    /// Announce and record `action`, executing `op` unless this is a dry run.
    fn perform(
        &mut self,
        action: PlannedAction,
        op: impl FnOnce() -> MonoseedResult<()>,
    ) -> MonoseedResult<()> {
        self.sink.begin(&action);

        let (outcome, status) = if self.dry_run {
            debug!(action = %action, "Planned");
            (Ok(()), StepStatus::Planned)
        } else {
            match op() {
                Ok(()) => (Ok(()), StepStatus::Done),
                Err(e) => (Err(e), StepStatus::Failed),
            }
        };

        self.sink.finish(&action, status);
        self.result.actions.push(action);
        outcome
    }

    fn warn(&mut self, warning: ScaffoldWarning) {
        warn!(message = %warning.message, "Scaffold warning");
        self.sink.warning(&warning);
        self.result.warnings.push(warning);
    }
}
