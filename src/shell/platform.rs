//! Platform and environment detection.

use std::path::{Path, PathBuf};

/// Environment variables set by common CI providers.
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "BUILDKITE",
    "JENKINS_URL",
];

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    is_ci_with(|key| std::env::var(key).ok())
}

/// CI detection with a custom env lookup (for testing).
pub fn is_ci_with<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    CI_VARS.iter().any(|key| {
        lookup(key)
            .map(|v| !v.is_empty() && v != "false" && v != "0")
            .unwrap_or(false)
    })
}

/// Directory inside a virtualenv that holds its executables.
pub fn venv_bin_dir(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts")
    } else {
        venv.join("bin")
    }
}

/// The interpreter inside a virtualenv.
pub fn venv_python(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_bin_dir(venv).join("python.exe")
    } else {
        venv_bin_dir(venv).join("python")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn detects_ci_vars() {
        assert!(is_ci_with(lookup(&[("CI", "true")])));
        assert!(is_ci_with(lookup(&[("GITHUB_ACTIONS", "true")])));
        assert!(is_ci_with(lookup(&[("JENKINS_URL", "http://ci")])));
    }

    #[test]
    fn ignores_falsey_ci_values() {
        assert!(!is_ci_with(lookup(&[])));
        assert!(!is_ci_with(lookup(&[("CI", "false")])));
        assert!(!is_ci_with(lookup(&[("CI", "0")])));
        assert!(!is_ci_with(lookup(&[("CI", "")])));
    }

    #[cfg(unix)]
    #[test]
    fn venv_paths_on_unix() {
        let venv = Path::new("/proj/.venv");
        assert_eq!(venv_bin_dir(venv), PathBuf::from("/proj/.venv/bin"));
        assert_eq!(venv_python(venv), PathBuf::from("/proj/.venv/bin/python"));
    }
}
