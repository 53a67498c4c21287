//! .env file parsing.
//!
//! This module reads environment files in the standard KEY=value format.
//! devstrap only ever writes these files once; reading them back is used to
//! report connection details and to print the current configuration.

use crate::error::{DevstrapError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Parses .env files into key/value pairs.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Exported: `export KEY=value`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment`
/// - Whitespace around equals: `KEY = value`
/// - Values with equals signs: `URL=https://example.com?foo=bar`
///
/// # Example
///
/// ```
/// use devstrap::config::EnvFileParser;
///
/// let content = r#"
/// # Postgres
/// POSTGRES_HOST=localhost
/// POSTGRES_PASSWORD="s3cret"
/// EMPTY=
/// "#;
///
/// let vars = EnvFileParser::parse(content).unwrap();
/// assert_eq!(vars.get("POSTGRES_HOST"), Some(&"localhost".to_string()));
/// assert_eq!(vars.get("POSTGRES_PASSWORD"), Some(&"s3cret".to_string()));
/// assert_eq!(vars.get("EMPTY"), Some(&"".to_string()));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse an env file content string into a map of variables.
    ///
    /// When a key repeats, the last assignment wins.
    pub fn parse(content: &str) -> Result<HashMap<String, String>> {
        Ok(Self::entries(content).into_iter().collect())
    }

    /// Parse an env file into entries, keeping file order.
    pub fn entries(content: &str) -> Vec<(String, String)> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(Self::parse_line)
            .collect()
    }

    /// Parse a single line.
    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        Some((key.to_string(), Self::unquote(value.trim())))
    }

    /// Remove surrounding quotes from a value.
    fn unquote(value: &str) -> String {
        let quoted = value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')));

        if quoted {
            value[1..value.len() - 1].to_string()
        } else {
            value.to_string()
        }
    }

    /// Load and parse an env file from a path.
    pub fn load(path: &Path) -> Result<HashMap<String, String>> {
        let content = Self::read(path)?;
        Self::parse(&content)
    }

    /// Load an env file as ordered entries.
    pub fn load_entries(path: &Path) -> Result<Vec<(String, String)>> {
        let content = Self::read(path)?;
        Ok(Self::entries(&content))
    }

    /// Load and parse an env file, returning empty map if file doesn't exist.
    pub fn load_optional(path: &Path) -> Result<HashMap<String, String>> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(HashMap::new())
        }
    }

    fn read(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(DevstrapError::EnvFileMissing {
                path: path.to_path_buf(),
            });
        }
        Ok(std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_env_file() {
        let content = r#"
APP_PORT=8000
LOG_LEVEL=info
"#;

        let vars = EnvFileParser::parse(content).unwrap();

        assert_eq!(vars.get("APP_PORT"), Some(&"8000".to_string()));
        assert_eq!(vars.get("LOG_LEVEL"), Some(&"info".to_string()));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = r#"
# Redis
REDIS_HOST=localhost

# trailing comment
"#;

        let vars = EnvFileParser::parse(content).unwrap();

        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("REDIS_HOST"), Some(&"localhost".to_string()));
    }

    #[test]
    fn handles_quoted_values() {
        let content = r#"
DOUBLE="double quoted"
SINGLE='single quoted'
UNQUOTED=no quotes
LONE="
"#;

        let vars = EnvFileParser::parse(content).unwrap();

        assert_eq!(vars.get("DOUBLE"), Some(&"double quoted".to_string()));
        assert_eq!(vars.get("SINGLE"), Some(&"single quoted".to_string()));
        assert_eq!(vars.get("UNQUOTED"), Some(&"no quotes".to_string()));
        assert_eq!(vars.get("LONE"), Some(&"\"".to_string()));
    }

    #[test]
    fn handles_export_prefix() {
        let vars = EnvFileParser::parse("export OTEL_SERVICE_NAME=agent-factory").unwrap();
        assert_eq!(
            vars.get("OTEL_SERVICE_NAME"),
            Some(&"agent-factory".to_string())
        );
    }

    #[test]
    fn handles_values_with_equals() {
        let vars = EnvFileParser::parse("URL=https://example.com?foo=bar").unwrap();
        assert_eq!(
            vars.get("URL"),
            Some(&"https://example.com?foo=bar".to_string())
        );
    }

    #[test]
    fn ignores_lines_without_key() {
        let content = r#"
KEY1=value1
invalid line without equals
=orphan
KEY2=value2
"#;

        let vars = EnvFileParser::parse(content).unwrap();

        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn entries_keep_file_order() {
        let entries = EnvFileParser::entries("B=2\nA=1\nC=3\n");
        let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["B", "A", "C"]);
    }

    #[test]
    fn last_assignment_wins() {
        let vars = EnvFileParser::parse("LOG_LEVEL=info\nLOG_LEVEL=debug\n").unwrap();
        assert_eq!(vars.get("LOG_LEVEL"), Some(&"debug".to_string()));
    }

    #[test]
    fn load_missing_file_is_env_file_missing() {
        let err = EnvFileParser::load(Path::new("/nonexistent/path/.env")).unwrap_err();
        assert!(matches!(err, DevstrapError::EnvFileMissing { .. }));
    }

    #[test]
    fn load_optional_returns_empty_for_missing_file() {
        let result = EnvFileParser::load_optional(Path::new("/nonexistent/path/.env"));

        assert!(result.is_ok());
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn load_reads_from_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "POSTGRES_PORT=5433\n").unwrap();

        let vars = EnvFileParser::load(&path).unwrap();

        assert_eq!(vars.get("POSTGRES_PORT"), Some(&"5433".to_string()));
    }
}
