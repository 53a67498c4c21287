//! Environment file materialization.
//!
//! The environment file is first-writer-wins: once it exists devstrap never
//! touches it again, so manual edits are permanent.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::defaults::{default_entries, render_env_file};

/// What happened (or would happen) to the environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileAction {
    /// The file already existed and was left alone.
    Kept { path: PathBuf },
    /// The template was copied into place.
    CopiedTemplate { template: PathBuf, path: PathBuf },
    /// Neither file existed; the defaults were written.
    WroteDefaults { path: PathBuf },
}

impl EnvFileAction {
    /// Path of the environment file.
    pub fn path(&self) -> &Path {
        match self {
            Self::Kept { path } | Self::CopiedTemplate { path, .. } | Self::WroteDefaults { path } => {
                path
            }
        }
    }

    /// Human-readable description, relative to the project root.
    pub fn describe(&self, project_root: &Path) -> String {
        let rel = |p: &Path| {
            p.strip_prefix(project_root)
                .unwrap_or(p)
                .display()
                .to_string()
        };
        match self {
            Self::Kept { path } => format!("{} exists, leaving it untouched", rel(path)),
            Self::CopiedTemplate { template, path } => {
                format!("Created {} from {}", rel(path), rel(template))
            }
            Self::WroteDefaults { path } => format!("Created {} with default settings", rel(path)),
        }
    }
}

/// Decide the action for the environment file without touching the disk.
///
/// Any directory entry at `env_file` counts as present, including a
/// symlink whose target is missing.
pub fn plan_env_file(env_file: &Path, template: &Path) -> EnvFileAction {
    if env_file.symlink_metadata().is_ok() {
        EnvFileAction::Kept {
            path: env_file.to_path_buf(),
        }
    } else if template.exists() {
        EnvFileAction::CopiedTemplate {
            template: template.to_path_buf(),
            path: env_file.to_path_buf(),
        }
    } else {
        EnvFileAction::WroteDefaults {
            path: env_file.to_path_buf(),
        }
    }
}

/// Ensure the environment file exists.
///
/// Existing file: untouched. Template present: byte-for-byte copy.
/// Otherwise: the default entries are written.
pub fn materialize_env_file(env_file: &Path, template: &Path) -> Result<EnvFileAction> {
    let action = plan_env_file(env_file, template);

    match &action {
        EnvFileAction::Kept { .. } => {}
        EnvFileAction::CopiedTemplate { template, path } => {
            let bytes = std::fs::read(template)?;
            write_new(path, &bytes)?;
        }
        EnvFileAction::WroteDefaults { path } => {
            let content = render_env_file(&default_entries());
            write_new(path, content.as_bytes())?;
        }
    }

    tracing::info!("{:?}", action);
    Ok(action)
}

/// Write a file that must not already exist.
fn write_new(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvFileParser;
    use tempfile::TempDir;

    fn paths(temp: &TempDir) -> (PathBuf, PathBuf) {
        (temp.path().join(".env"), temp.path().join(".env.example"))
    }

    #[test]
    fn existing_file_is_kept_byte_for_byte() {
        let temp = TempDir::new().unwrap();
        let (env, template) = paths(&temp);
        std::fs::write(&env, "APP_PORT=9999\n# hand edited\n").unwrap();
        std::fs::write(&template, "APP_PORT=1\n").unwrap();

        let action = materialize_env_file(&env, &template).unwrap();

        assert!(matches!(action, EnvFileAction::Kept { .. }));
        assert_eq!(
            std::fs::read_to_string(&env).unwrap(),
            "APP_PORT=9999\n# hand edited\n"
        );
    }

    #[test]
    fn template_is_copied_exactly() {
        let temp = TempDir::new().unwrap();
        let (env, template) = paths(&temp);
        let bytes = b"# from template\r\nAPP_PORT=8123\nODD = ' spaced '\n\n";
        std::fs::write(&template, bytes).unwrap();

        let action = materialize_env_file(&env, &template).unwrap();

        assert!(matches!(action, EnvFileAction::CopiedTemplate { .. }));
        assert_eq!(std::fs::read(&env).unwrap(), bytes);
    }

    #[test]
    fn defaults_are_written_when_nothing_exists() {
        let temp = TempDir::new().unwrap();
        let (env, template) = paths(&temp);

        let action = materialize_env_file(&env, &template).unwrap();

        assert!(matches!(action, EnvFileAction::WroteDefaults { .. }));
        let vars = EnvFileParser::load(&env).unwrap();
        assert_eq!(vars.len(), default_entries().len());
        assert_eq!(vars.get("APP_PORT"), Some(&"8000".to_string()));
        assert_eq!(vars.get("REDIS_PORT"), Some(&"6379".to_string()));
        assert!(!template.exists());
    }

    #[test]
    fn second_run_keeps_first_result() {
        let temp = TempDir::new().unwrap();
        let (env, template) = paths(&temp);

        materialize_env_file(&env, &template).unwrap();
        std::fs::write(&env, "APP_PORT=7000\n").unwrap();
        let action = materialize_env_file(&env, &template).unwrap();

        assert!(matches!(action, EnvFileAction::Kept { .. }));
        assert_eq!(std::fs::read_to_string(&env).unwrap(), "APP_PORT=7000\n");
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_kept() {
        let temp = TempDir::new().unwrap();
        let (env, template) = paths(&temp);
        std::os::unix::fs::symlink(temp.path().join("secrets/.env"), &env).unwrap();

        let action = materialize_env_file(&env, &template).unwrap();

        assert!(matches!(action, EnvFileAction::Kept { .. }));
        assert!(env.symlink_metadata().unwrap().file_type().is_symlink());
        assert!(!temp.path().join("secrets/.env").exists());
    }

    #[test]
    fn plan_does_not_write() {
        let temp = TempDir::new().unwrap();
        let (env, template) = paths(&temp);

        let action = plan_env_file(&env, &template);

        assert!(matches!(action, EnvFileAction::WroteDefaults { .. }));
        assert!(!env.exists());
    }

    #[test]
    fn describe_uses_relative_paths() {
        let root = Path::new("/proj");
        let action = EnvFileAction::CopiedTemplate {
            template: root.join(".env.example"),
            path: root.join(".env"),
        };
        assert_eq!(action.describe(root), "Created .env from .env.example");
        assert_eq!(action.path(), root.join(".env"));
    }
}
