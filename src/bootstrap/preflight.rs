//! Side-effect-free readiness report.

use serde::Serialize;
use std::path::Path;

use crate::config::{plan_env_file, BootstrapSettings, EnvFileAction};

use super::compose::{parse_compose_version, ComposeCli};
use super::runner::ProcessRunner;
use super::summary::relative;

/// One prerequisite and whether it is satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreflightItem {
    /// What was checked.
    pub name: String,
    /// Whether the bootstrap can proceed past it.
    pub ok: bool,
    /// Location, version or reason.
    pub detail: String,
}

/// Result of checking every prerequisite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreflightReport {
    /// Checks in bootstrap order.
    pub items: Vec<PreflightItem>,
}

impl PreflightReport {
    /// Whether every prerequisite is satisfied.
    pub fn all_ok(&self) -> bool {
        self.items.iter().all(|item| item.ok)
    }

    fn push(&mut self, name: impl Into<String>, ok: bool, detail: impl Into<String>) {
        self.items.push(PreflightItem {
            name: name.into(),
            ok,
            detail: detail.into(),
        });
    }
}

/// Check every prerequisite without changing anything.
///
/// Unlike the bootstrap this does not stop at the first problem.
pub fn preflight(
    project_root: &Path,
    settings: &BootstrapSettings,
    runner: &dyn ProcessRunner,
) -> PreflightReport {
    let mut report = PreflightReport { items: Vec::new() };

    match runner.locate(&settings.python) {
        Some(path) => report.push(&settings.python, true, path.display().to_string()),
        None => report.push(&settings.python, false, "not found on PATH"),
    }

    let manifest = project_root.join(&settings.requirements);
    let manifest_name = relative(&manifest, project_root);
    if manifest.is_file() {
        report.push(manifest_name, true, "present");
    } else {
        report.push(manifest_name, false, "missing");
    }

    let env_file = project_root.join(&settings.env_file);
    let template = project_root.join(&settings.env_template);
    let env_detail = match plan_env_file(&env_file, &template) {
        EnvFileAction::Kept { .. } => "present".to_string(),
        EnvFileAction::CopiedTemplate { template, .. } => {
            format!("will be copied from {}", relative(&template, project_root))
        }
        EnvFileAction::WroteDefaults { .. } => "will be written with defaults".to_string(),
    };
    report.push(relative(&env_file, project_root), true, env_detail);

    let engine_name = &settings.container_engine;
    let compose_name = format!("{} compose", engine_name);
    match runner.locate(engine_name) {
        Some(engine) => {
            report.push(engine_name, true, engine.display().to_string());

            let compose = ComposeCli::new(engine, settings.compose_file.clone(), project_root);
            match runner.inspect(&compose.version_invocation()) {
                Ok(result) if result.success => {
                    let detail = parse_compose_version(&result.stdout)
                        .unwrap_or_else(|| "available".to_string());
                    report.push(compose_name, true, detail);
                }
                _ => report.push(compose_name, false, "plugin not available"),
            }
        }
        None => {
            report.push(engine_name, false, "not found on PATH");
            report.push(compose_name, false, format!("requires {}", engine_name));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CannedResult, RecordingRunner};
    use tempfile::TempDir;

    #[test]
    fn everything_present() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("requirements.txt"), "").unwrap();
        let runner = RecordingRunner::new()
            .with_tool("python3", "/usr/bin/python3")
            .with_tool("docker", "/usr/bin/docker")
            .respond("/usr/bin/docker compose version", CannedResult::ok("v2.24.5"));

        let report = preflight(temp.path(), &BootstrapSettings::default(), &runner);

        assert!(report.all_ok());
        let names: Vec<_> = report.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            ["python3", "requirements.txt", ".env", "docker", "docker compose"]
        );
        assert_eq!(report.items[2].detail, "will be written with defaults");
        assert_eq!(report.items[4].detail, "2.24.5");
    }

    #[test]
    fn reports_every_problem() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".env.example"), "A=1\n").unwrap();
        let runner = RecordingRunner::new();

        let report = preflight(temp.path(), &BootstrapSettings::default(), &runner);

        assert!(!report.all_ok());
        let failed: Vec<_> = report
            .items
            .iter()
            .filter(|i| !i.ok)
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(failed, ["python3", "requirements.txt", "docker", "docker compose"]);
        assert_eq!(report.items[2].detail, "will be copied from .env.example");
        assert!(runner.invocations().is_empty());
        assert!(!temp.path().join(".env").exists());
    }

    #[test]
    fn serializes_to_json() {
        let report = PreflightReport {
            items: vec![PreflightItem {
                name: "python3".to_string(),
                ok: true,
                detail: "/usr/bin/python3".to_string(),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["items"][0]["name"], "python3");
        assert_eq!(json["items"][0]["ok"], true);
    }
}
