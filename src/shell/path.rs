//! Executable lookup on PATH.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Split a PATH-style value into directories.
pub fn split_path(value: Option<OsString>) -> Vec<PathBuf> {
    value
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    split_path(std::env::var_os("PATH"))
}

/// Candidate file names for a tool on this platform.
fn candidate_names(tool: &str) -> Vec<String> {
    if cfg!(windows) && Path::new(tool).extension().is_none() {
        vec![
            format!("{}.exe", tool),
            format!("{}.cmd", tool),
            format!("{}.bat", tool),
        ]
    } else {
        vec![tool.to_string()]
    }
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command, whose behavior varies across systems. A tool given
/// as a path (containing a separator) is checked directly.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let as_path = Path::new(tool);
    if as_path.components().count() > 1 {
        return (as_path.is_file() && is_executable(as_path)).then(|| as_path.to_path_buf());
    }

    let names = candidate_names(tool);
    path_entries.iter().find_map(|dir| {
        names
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file() && is_executable(candidate))
    })
}

/// Resolve a tool against the current process PATH.
pub fn find_on_path(tool: &str) -> Option<PathBuf> {
    resolve_tool_path(tool, &parse_system_path())
}
