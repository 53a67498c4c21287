//! Python virtualenv handling.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::shell::{split_path, venv_bin_dir, venv_python, Invocation};

/// Invocation that (re)creates a virtualenv at `dir`.
///
/// `--clear` wipes an existing environment first, so every run starts
/// from an empty venv.
pub fn create_invocation(python: &Path, dir: &Path, cwd: &Path) -> Invocation {
    Invocation::new(python.display().to_string())
        .args(["-m", "venv", "--clear"])
        .arg(dir.display().to_string())
        .cwd(cwd)
}

/// An activated virtualenv.
///
/// Activation is expressed as the environment every later command runs
/// with: `VIRTUAL_ENV` points at the venv and its bin directory leads PATH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Virtualenv {
    dir: PathBuf,
    env: BTreeMap<String, String>,
}

impl Virtualenv {
    /// Activate the virtualenv at `dir` on top of the current PATH.
    pub fn activate(dir: &Path) -> Self {
        Self::activate_with_path(dir, std::env::var_os("PATH"))
    }

    /// Activate on top of an explicit PATH value (for testing).
    pub fn activate_with_path(dir: &Path, path: Option<std::ffi::OsString>) -> Self {
        let mut entries = vec![venv_bin_dir(dir)];
        entries.extend(split_path(path));

        let joined = std::env::join_paths(&entries)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| venv_bin_dir(dir).display().to_string());

        let mut env = BTreeMap::new();
        env.insert("VIRTUAL_ENV".to_string(), dir.display().to_string());
        env.insert("PATH".to_string(), joined);
        env.insert("PIP_DISABLE_PIP_VERSION_CHECK".to_string(), "1".to_string());

        Self {
            dir: dir.to_path_buf(),
            env,
        }
    }

    /// Virtualenv directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Interpreter inside the virtualenv.
    pub fn python(&self) -> PathBuf {
        venv_python(&self.dir)
    }

    /// Environment applied to every command run inside the virtualenv.
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// `python -m pip <args>` inside the virtualenv.
    pub fn pip<I, S>(&self, args: I, cwd: &Path) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(self.python().display().to_string())
            .args(["-m", "pip"])
            .args(args)
            .cwd(cwd)
            .envs(&self.env)
    }

    /// Upgrade the packaging tools.
    pub fn upgrade_invocation(&self, tools: &[String], cwd: &Path) -> Invocation {
        self.pip(["install", "--upgrade"], cwd)
            .args(tools.iter().cloned())
    }

    /// Install a requirements file.
    pub fn install_invocation(&self, requirements: &Path, cwd: &Path) -> Invocation {
        self.pip(["install", "-r"], cwd)
            .arg(requirements.display().to_string())
    }

    /// Shell command a user runs to activate the venv themselves.
    pub fn activate_hint(&self, project_root: &Path) -> String {
        let rel = self.dir.strip_prefix(project_root).unwrap_or(&self.dir);
        if cfg!(windows) {
            format!("{}\\Scripts\\activate", rel.display())
        } else {
            format!("source {}/bin/activate", rel.display())
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn create_clears_existing_env() {
        let inv = create_invocation(
            Path::new("/usr/bin/python3"),
            Path::new("/proj/.venv"),
            Path::new("/proj"),
        );
        assert_eq!(inv.to_string(), "/usr/bin/python3 -m venv --clear /proj/.venv");
        assert_eq!(inv.cwd, Some(PathBuf::from("/proj")));
    }

    #[test]
    fn activation_prepends_bin_dir() {
        let venv = Virtualenv::activate_with_path(
            Path::new("/proj/.venv"),
            Some(OsString::from("/usr/bin:/bin")),
        );

        assert_eq!(
            venv.env().get("PATH").map(String::as_str),
            Some("/proj/.venv/bin:/usr/bin:/bin")
        );
        assert_eq!(
            venv.env().get("VIRTUAL_ENV").map(String::as_str),
            Some("/proj/.venv")
        );
    }

    #[test]
    fn activation_without_path() {
        let venv = Virtualenv::activate_with_path(Path::new("/proj/.venv"), None);
        assert_eq!(
            venv.env().get("PATH").map(String::as_str),
            Some("/proj/.venv/bin")
        );
    }

    #[test]
    fn pip_commands_use_venv_python() {
        let venv = Virtualenv::activate_with_path(Path::new("/proj/.venv"), None);
        let tools = vec!["pip".to_string(), "setuptools".to_string()];

        let upgrade = venv.upgrade_invocation(&tools, Path::new("/proj"));
        let install = venv.install_invocation(Path::new("requirements.txt"), Path::new("/proj"));

        assert_eq!(
            upgrade.to_string(),
            "/proj/.venv/bin/python -m pip install --upgrade pip setuptools"
        );
        assert_eq!(
            install.to_string(),
            "/proj/.venv/bin/python -m pip install -r requirements.txt"
        );
        assert!(install.env.contains_key("VIRTUAL_ENV"));
    }

    #[test]
    fn activate_hint_is_relative() {
        let venv = Virtualenv::activate_with_path(Path::new("/proj/.venv"), None);
        assert_eq!(venv.activate_hint(Path::new("/proj")), "source .venv/bin/activate");
    }
}
