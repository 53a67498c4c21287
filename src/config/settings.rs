//! Bootstrap settings.
//!
//! A project can rename the paths and binaries devstrap uses by dropping a
//! `.devstrap.yml` next to its `requirements.txt`. Every field is optional;
//! an absent file yields the fixed defaults.
//!
//! ```yaml
//! python: python3.12
//! venv_dir: .venv
//! compose_file: deploy/docker-compose.yml
//! ```

use crate::error::{DevstrapError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the optional settings file, relative to the project root.
pub const SETTINGS_FILE: &str = ".devstrap.yml";

/// Paths and binaries used by the bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapSettings {
    /// Interpreter used to create the virtualenv.
    pub python: String,

    /// Virtualenv directory (relative to project root).
    pub venv_dir: PathBuf,

    /// Dependency manifest (relative to project root).
    pub requirements: PathBuf,

    /// Environment file to materialize.
    pub env_file: PathBuf,

    /// Template copied to `env_file` when present.
    pub env_template: PathBuf,

    /// Container engine binary.
    pub container_engine: String,

    /// Compose file passed with `-f`; compose discovers its own when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compose_file: Option<PathBuf>,

    /// Packages upgraded before installing the manifest.
    pub packaging_tools: Vec<String>,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            venv_dir: PathBuf::from(".venv"),
            requirements: PathBuf::from("requirements.txt"),
            env_file: PathBuf::from(".env"),
            env_template: PathBuf::from(".env.example"),
            container_engine: "docker".to_string(),
            compose_file: None,
            packaging_tools: vec![
                "pip".to_string(),
                "setuptools".to_string(),
                "wheel".to_string(),
            ],
        }
    }
}

impl BootstrapSettings {
    /// Load settings for a project, falling back to defaults.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(SETTINGS_FILE);
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", SETTINGS_FILE);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content, &path)
    }

    /// Parse settings from YAML text.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| DevstrapError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_fixed_layout() {
        let settings = BootstrapSettings::default();
        assert_eq!(settings.python, "python3");
        assert_eq!(settings.venv_dir, PathBuf::from(".venv"));
        assert_eq!(settings.requirements, PathBuf::from("requirements.txt"));
        assert_eq!(settings.env_file, PathBuf::from(".env"));
        assert_eq!(settings.env_template, PathBuf::from(".env.example"));
        assert_eq!(settings.container_engine, "docker");
        assert!(settings.compose_file.is_none());
        assert_eq!(settings.packaging_tools, ["pip", "setuptools", "wheel"]);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = BootstrapSettings::load(temp.path()).unwrap();
        assert_eq!(settings, BootstrapSettings::default());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(SETTINGS_FILE),
            "python: python3.12\ncompose_file: deploy/compose.yml\n",
        )
        .unwrap();

        let settings = BootstrapSettings::load(temp.path()).unwrap();

        assert_eq!(settings.python, "python3.12");
        assert_eq!(
            settings.compose_file,
            Some(PathBuf::from("deploy/compose.yml"))
        );
        assert_eq!(settings.container_engine, "docker");
    }

    #[test]
    fn empty_file_yields_defaults() {
        let settings = BootstrapSettings::parse("  \n", Path::new(SETTINGS_FILE)).unwrap();
        assert_eq!(settings, BootstrapSettings::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = BootstrapSettings::parse("pyton: python3\n", Path::new(SETTINGS_FILE))
            .unwrap_err();
        match err {
            DevstrapError::ConfigParse { path, message } => {
                assert_eq!(path, PathBuf::from(SETTINGS_FILE));
                assert!(message.contains("pyton"));
            }
            other => panic!("expected ConfigParse, got {other:?}"),
        }
    }
}
