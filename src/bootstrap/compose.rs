//! Docker Compose invocations.

use regex::Regex;
use std::path::{Path, PathBuf};

use crate::shell::Invocation;

/// The `compose` sub-command of a located container engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeCli {
    engine: PathBuf,
    compose_file: Option<PathBuf>,
    project_root: PathBuf,
}

impl ComposeCli {
    /// Create for a resolved engine binary.
    pub fn new(engine: PathBuf, compose_file: Option<PathBuf>, project_root: &Path) -> Self {
        Self {
            engine,
            compose_file,
            project_root: project_root.to_path_buf(),
        }
    }

    fn base(&self) -> Invocation {
        let inv = Invocation::new(self.engine.display().to_string())
            .arg("compose")
            .cwd(&self.project_root);
        match &self.compose_file {
            Some(file) => inv.arg("-f").arg(file.display().to_string()),
            None => inv,
        }
    }

    /// `docker compose version`, used to detect the plugin.
    pub fn version_invocation(&self) -> Invocation {
        Invocation::new(self.engine.display().to_string())
            .args(["compose", "version"])
            .cwd(&self.project_root)
    }

    /// Start every declared service in the background.
    pub fn up_invocation(&self) -> Invocation {
        self.base().args(["up", "-d"])
    }

    /// Stop and remove the services.
    pub fn down_invocation(&self) -> Invocation {
        self.base().arg("down")
    }

    /// Command line a user would type, e.g. `docker compose logs -f`.
    pub fn user_command(engine_name: &str, compose_file: Option<&Path>, args: &str) -> String {
        match compose_file {
            Some(file) => format!("{} compose -f {} {}", engine_name, file.display(), args),
            None => format!("{} compose {}", engine_name, args),
        }
    }
}

/// Extract a semantic version from `docker compose version` output.
///
/// Handles both `Docker Compose version v2.24.5` and the bare `2.24.5`
/// printed by `--short`.
pub fn parse_compose_version(output: &str) -> Option<String> {
    let re = Regex::new(r"v?(\d+\.\d+\.\d+(?:[-+][0-9A-Za-z.\-]+)?)").ok()?;
    re.captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(file: Option<&str>) -> ComposeCli {
        ComposeCli::new(
            PathBuf::from("docker"),
            file.map(PathBuf::from),
            Path::new("/proj"),
        )
    }

    #[test]
    fn up_is_detached() {
        assert_eq!(cli(None).up_invocation().to_string(), "docker compose up -d");
    }

    #[test]
    fn compose_file_goes_before_subcommand() {
        let compose = cli(Some("deploy/compose.yml"));
        assert_eq!(
            compose.up_invocation().to_string(),
            "docker compose -f deploy/compose.yml up -d"
        );
        assert_eq!(
            compose.down_invocation().to_string(),
            "docker compose -f deploy/compose.yml down"
        );
    }

    #[test]
    fn version_ignores_compose_file() {
        assert_eq!(
            cli(Some("x.yml")).version_invocation().to_string(),
            "docker compose version"
        );
    }

    #[test]
    fn invocations_run_in_project_root() {
        assert_eq!(cli(None).up_invocation().cwd, Some(PathBuf::from("/proj")));
    }

    #[test]
    fn parses_compose_versions() {
        assert_eq!(
            parse_compose_version("Docker Compose version v2.24.5"),
            Some("2.24.5".to_string())
        );
        assert_eq!(
            parse_compose_version("Docker Compose version v2.29.1-desktop.1"),
            Some("2.29.1-desktop.1".to_string())
        );
        assert_eq!(parse_compose_version("2.20.3\n"), Some("2.20.3".to_string()));
        assert_eq!(parse_compose_version("unknown"), None);
    }

    #[test]
    fn user_command_formats() {
        assert_eq!(
            ComposeCli::user_command("docker", None, "logs -f"),
            "docker compose logs -f"
        );
        assert_eq!(
            ComposeCli::user_command("docker", Some(Path::new("c.yml")), "down"),
            "docker compose -f c.yml down"
        );
    }
}
