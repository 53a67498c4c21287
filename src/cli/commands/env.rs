//! Env command implementation.
//!
//! The `devstrap env` command prints the materialized environment file with
//! secret values masked.

use std::path::{Path, PathBuf};

use crate::cli::args::EnvArgs;
use crate::config::{BootstrapSettings, EnvFileParser};
use crate::error::{DevstrapError, Result};
use crate::secrets::EntryMasker;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The env command implementation.
pub struct EnvCommand {
    project_root: PathBuf,
    args: EnvArgs,
}

impl EnvCommand {
    /// Create a new env command.
    pub fn new(project_root: &Path, args: EnvArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

}

impl Command for EnvCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = BootstrapSettings::load(&self.project_root)?;
        let path = self.project_root.join(&settings.env_file);
        let entries = EnvFileParser::load_entries(&path)?;

        let entries = if self.args.show_secrets {
            entries
        } else {
            EntryMasker::new().mask_entries(&entries)
        };

        if self.args.json {
            let map: serde_json::Map<String, serde_json::Value> = entries
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v)))
                .collect();
            let json = serde_json::to_string_pretty(&map)
                .map_err(|e| DevstrapError::Other(e.into()))?;
            ui.output(&json);
        } else {
            for (key, value) in &entries {
                ui.output(&format!("{}={}", key, value));
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, OutputMode};
    use tempfile::TempDir;

    fn project(env: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".env"), env).unwrap();
        temp
    }

    #[test]
    fn masks_secrets_by_default() {
        let temp = project("POSTGRES_USER=postgres\nPOSTGRES_PASSWORD=hunter2\n");
        let cmd = EnvCommand::new(temp.path(), EnvArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert_eq!(
            ui.outputs(),
            ["POSTGRES_USER=postgres", "POSTGRES_PASSWORD=********"]
        );
    }

    #[test]
    fn show_secrets_prints_values() {
        let temp = project("POSTGRES_PASSWORD=hunter2\n");
        let args = EnvArgs {
            show_secrets: true,
            ..Default::default()
        };
        let mut ui = MockUI::new();

        EnvCommand::new(temp.path(), args).execute(&mut ui).unwrap();

        assert_eq!(ui.outputs(), ["POSTGRES_PASSWORD=hunter2"]);
    }

    #[test]
    fn json_output() {
        let temp = project("APP_PORT=8000\nREDIS_PORT=6379\n");
        let args = EnvArgs {
            json: true,
            ..Default::default()
        };
        let mut ui = MockUI::new();

        EnvCommand::new(temp.path(), args).execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.outputs()[0]).unwrap();
        assert_eq!(value["APP_PORT"], "8000");
        assert_eq!(value["REDIS_PORT"], "6379");
    }

    #[test]
    fn quiet_mode_still_prints_entries() {
        let temp = project("APP_PORT=8000\n");
        let mut ui = MockUI::with_mode(OutputMode::Quiet);

        EnvCommand::new(temp.path(), EnvArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(ui.outputs(), ["APP_PORT=8000"]);
    }

    #[test]
    fn missing_env_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let cmd = EnvCommand::new(temp.path(), EnvArgs::default());
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();

        assert!(matches!(err, DevstrapError::EnvFileMissing { .. }));
        assert!(!temp.path().join(".env").exists());
    }
}
