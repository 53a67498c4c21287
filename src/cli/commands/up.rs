//! Up command implementation.
//!
//! The `devstrap up` command runs the full bootstrap. It is also what a bare
//! `devstrap` invocation does.

use std::path::{Path, PathBuf};

use crate::bootstrap::{Bootstrapper, DryRunRunner, ProcessRunner, SystemRunner};
use crate::cli::args::UpArgs;
use crate::config::BootstrapSettings;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The up command implementation.
pub struct UpCommand {
    project_root: PathBuf,
    args: UpArgs,
}

impl UpCommand {
    /// Create a new up command.
    pub fn new(project_root: &Path, args: UpArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

}

impl Command for UpCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = BootstrapSettings::load(&self.project_root)?;
        tracing::debug!("Bootstrap settings: {:?}", settings);

        let runner: Box<dyn ProcessRunner> = if self.args.dry_run {
            Box::new(DryRunRunner)
        } else {
            Box::new(SystemRunner)
        };

        ui.show_header("Bootstrapping development environment");
        let report = Bootstrapper::new(&self.project_root, settings, runner.as_ref()).run(ui)?;
        tracing::info!("Bootstrap finished: {:?}", report.env_action);

        Ok(CommandResult::success())
    }
}
