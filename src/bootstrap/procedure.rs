//! The bootstrap procedure.
//!
//! Seven steps, strictly in order, each a prerequisite for the next. The
//! first failure aborts the run; nothing is retried or rolled back, so a
//! failed run leaves whatever earlier steps produced in place.

use std::path::{Path, PathBuf};

use crate::config::{
    materialize_env_file, plan_env_file, BootstrapSettings, EnvFileAction, EnvFileParser,
};
use crate::error::{DevstrapError, Result};
use crate::shell::{CommandResult, Invocation};
use crate::ui::UserInterface;

use super::compose::{parse_compose_version, ComposeCli};
use super::runner::ProcessRunner;
use super::summary::{relative, Summary};
use super::venv::{create_invocation, Virtualenv};

/// Number of steps shown in progress labels.
pub const STEP_COUNT: usize = 7;

/// What a completed bootstrap produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Interpreter used to create the virtualenv.
    pub python: PathBuf,
    /// Virtualenv directory.
    pub venv_dir: PathBuf,
    /// What happened to the environment file.
    pub env_action: EnvFileAction,
    /// Compose plugin version, when it could be parsed.
    pub compose_version: Option<String>,
}

/// Runs the bootstrap for one project.
pub struct Bootstrapper<'a> {
    project_root: PathBuf,
    settings: BootstrapSettings,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Bootstrapper<'a> {
    /// Create a bootstrapper for `project_root`.
    pub fn new(
        project_root: &Path,
        settings: BootstrapSettings,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            settings,
            runner,
        }
    }

    /// Settings in effect.
    pub fn settings(&self) -> &BootstrapSettings {
        &self.settings
    }

    fn path(&self, rel: &Path) -> PathBuf {
        self.project_root.join(rel)
    }

    /// Run every step in order.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<BootstrapReport> {
        if self.runner.is_dry_run() {
            ui.warning("Running in dry-run mode: commands are shown, not executed");
        }

        let python = self.check_interpreter(ui)?;
        let venv = self.create_virtualenv(&python, ui)?;
        self.install_dependencies(&venv, ui)?;
        let env_action = self.materialize_env(ui)?;
        let (compose, compose_version) = self.check_compose(ui)?;
        self.launch_services(&compose, ui)?;

        let summary = self.summary(&venv, &env_action)?;
        ui.success(&step_label(7, "Development environment is up"));
        summary.render(ui);

        Ok(BootstrapReport {
            python,
            venv_dir: venv.dir().to_path_buf(),
            env_action,
            compose_version,
        })
    }

    /// Step 1: the interpreter must be on PATH.
    pub fn check_interpreter(&self, ui: &mut dyn UserInterface) -> Result<PathBuf> {
        let tool = &self.settings.python;
        let mut spinner = ui.start_spinner(&step_label(1, &format!("Checking for {}", tool)));

        match self.runner.locate(tool) {
            Some(path) => {
                tracing::info!("Found {} at {}", tool, path.display());
                spinner.finish_success(&format!("Found {} at {}", tool, path.display()));
                Ok(path)
            }
            None => {
                spinner.finish_error(&format!("{} not found", tool));
                Err(DevstrapError::MissingTool {
                    tool: tool.clone(),
                    hint: "Install Python 3 (https://www.python.org/downloads/) and make sure it is on PATH".to_string(),
                })
            }
        }
    }

    /// Step 2: recreate and activate the virtualenv.
    pub fn create_virtualenv(
        &self,
        python: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<Virtualenv> {
        let dir = self.path(&self.settings.venv_dir);
        let inv = create_invocation(python, &dir, &self.project_root);
        let rel = relative(&dir, &self.project_root);

        self.run_step(
            2,
            &format!("Creating virtualenv in {}", rel),
            &format!("Created virtualenv in {}", rel),
            &inv,
            ui,
        )?;

        Ok(Virtualenv::activate(&dir))
    }

    /// Step 3: upgrade packaging tools, then install the manifest.
    pub fn install_dependencies(&self, venv: &Virtualenv, ui: &mut dyn UserInterface) -> Result<()> {
        let manifest = self.path(&self.settings.requirements);
        if !manifest.is_file() {
            return Err(DevstrapError::ManifestMissing { path: manifest });
        }

        let upgrade = venv.upgrade_invocation(&self.settings.packaging_tools, &self.project_root);
        self.run_step(
            3,
            "Upgrading packaging tools",
            &format!("Upgraded {}", self.settings.packaging_tools.join(", ")),
            &upgrade,
            ui,
        )?;

        let rel = relative(&manifest, &self.project_root);
        let install = venv.install_invocation(&self.settings.requirements, &self.project_root);
        self.run_step(
            3,
            &format!("Installing {}", rel),
            &format!("Installed {}", rel),
            &install,
            ui,
        )?;

        Ok(())
    }

    /// Step 4: make sure the environment file exists.
    pub fn materialize_env(&self, ui: &mut dyn UserInterface) -> Result<EnvFileAction> {
        let env_file = self.path(&self.settings.env_file);
        let template = self.path(&self.settings.env_template);

        let action = if self.runner.is_dry_run() {
            plan_env_file(&env_file, &template)
        } else {
            materialize_env_file(&env_file, &template)?
        };

        let text = step_label(4, &action.describe(&self.project_root));
        match &action {
            EnvFileAction::Kept { .. } => ui.message(&format!("○ {}", text)),
            _ if self.runner.is_dry_run() => ui.message(&format!("[dry-run] {}", text)),
            _ => ui.success(&text),
        }

        Ok(action)
    }

    /// Step 5: the container engine and its compose plugin must be present.
    pub fn check_compose(&self, ui: &mut dyn UserInterface) -> Result<(ComposeCli, Option<String>)> {
        let engine_name = &self.settings.container_engine;
        let mut spinner =
            ui.start_spinner(&step_label(5, &format!("Checking for {} compose", engine_name)));

        let Some(engine) = self.runner.locate(engine_name) else {
            spinner.finish_error(&format!("{} not found", engine_name));
            return Err(DevstrapError::MissingTool {
                tool: engine_name.clone(),
                hint: "Install Docker Desktop or Docker Engine (https://docs.docker.com/get-docker/)"
                    .to_string(),
            });
        };

        let compose = ComposeCli::new(
            engine,
            self.settings.compose_file.clone(),
            &self.project_root,
        );
        let result = self.runner.inspect(&compose.version_invocation())?;
        if !result.success {
            spinner.finish_error(&format!("{} compose is not available", engine_name));
            return Err(DevstrapError::MissingTool {
                tool: format!("{} compose", engine_name),
                hint: "Install the Docker Compose v2 plugin (https://docs.docker.com/compose/install/)"
                    .to_string(),
            });
        }

        let version = parse_compose_version(&result.stdout);
        tracing::info!("{} compose version: {:?}", engine_name, version);
        match &version {
            Some(v) => spinner.finish_success(&format!("{} compose {}", engine_name, v)),
            None => spinner.finish_success(&format!("{} compose available", engine_name)),
        }

        Ok((compose, version))
    }

    /// Step 6: start the services detached.
    pub fn launch_services(&self, compose: &ComposeCli, ui: &mut dyn UserInterface) -> Result<()> {
        self.run_step(
            6,
            "Starting services",
            "Services started",
            &compose.up_invocation(),
            ui,
        )?;
        Ok(())
    }

    /// Stop the services (used by `devstrap down`).
    pub fn stop_services(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let (compose, _) = self.check_compose(ui)?;
        self.run_step(
            6,
            "Stopping services",
            "Services stopped",
            &compose.down_invocation(),
            ui,
        )?;
        Ok(())
    }

    /// Step 7 input: endpoints from the environment file.
    fn summary(&self, venv: &Virtualenv, env_action: &EnvFileAction) -> Result<Summary> {
        let vars = EnvFileParser::load_optional(env_action.path())?;
        Ok(Summary::from_env(
            &vars,
            &self.settings,
            &venv.activate_hint(&self.project_root),
        ))
    }

    /// Run one external command under a spinner, failing on non-zero exit.
    fn run_step(
        &self,
        step: usize,
        running: &str,
        done: &str,
        inv: &Invocation,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        tracing::info!("Step {}/{}: {}", step, STEP_COUNT, inv);

        if self.runner.is_dry_run() {
            ui.message(&format!("[dry-run] {}", step_label(step, &inv.to_string())));
            return self.runner.run(inv, None);
        }

        let mut spinner = ui.start_spinner(&step_label(step, running));
        let result = self.runner.run(inv, spinner.output_callback())?;

        if result.success {
            spinner.finish_success(done);
            Ok(result)
        } else {
            spinner.finish_error(&format!("{} failed", running));
            let output = if result.stderr.trim().is_empty() {
                &result.stdout
            } else {
                &result.stderr
            };
            ui.show_error_block(&inv.to_string(), output);
            Err(DevstrapError::CommandFailed {
                command: inv.to_string(),
                code: result.exit_code,
            })
        }
    }
}

fn step_label(step: usize, text: &str) -> String {
    format!("[{}/{}] {}", step, STEP_COUNT, text)
}
