//! Down command implementation.
//!
//! The `devstrap down` command stops the services started by `devstrap up`.
//! The virtualenv and environment file are left in place.

use std::path::{Path, PathBuf};

use crate::bootstrap::{Bootstrapper, SystemRunner};
use crate::config::BootstrapSettings;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The down command implementation.
pub struct DownCommand {
    project_root: PathBuf,
}

impl DownCommand {
    /// Create a new down command.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }
}

impl Command for DownCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = BootstrapSettings::load(&self.project_root)?;
        Bootstrapper::new(&self.project_root, settings, &SystemRunner).stop_services(ui)?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn invalid_settings_file_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".devstrap.yml"), "engine: podman\n").unwrap();
        let cmd = DownCommand::new(temp.path());
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();

        assert!(err.to_string().contains("Failed to parse settings"));
        assert!(ui.spinners().is_empty());
    }
}
