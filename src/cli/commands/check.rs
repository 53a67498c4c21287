//! Check command implementation.
//!
//! The `devstrap check` command reports which prerequisites are in place
//! without creating or starting anything.

use std::path::{Path, PathBuf};

use crate::bootstrap::{preflight, PreflightReport, SystemRunner};
use crate::cli::args::CheckArgs;
use crate::config::BootstrapSettings;
use crate::error::{DevstrapError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = BootstrapSettings::load(&self.project_root)?;
        let report = preflight(&self.project_root, &settings, &SystemRunner);

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| DevstrapError::Other(e.into()))?;
            ui.output(&json);
        } else {
            render_report(&report, ui);
        }

        if report.all_ok() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

fn render_report(report: &PreflightReport, ui: &mut dyn UserInterface) {
    let width = report
        .items
        .iter()
        .map(|item| item.name.len())
        .max()
        .unwrap_or(0);

    ui.show_header("Prerequisites");
    for item in &report.items {
        let line = format!("{:<width$}  {}", item.name, item.detail, width = width);
        if item.ok {
            ui.success(&line);
        } else {
            ui.warning(&line);
        }
    }

    if report.all_ok() {
        ui.message("");
        ui.message("Ready. Run `devstrap up` to bootstrap.");
    }
}
