//! Secret key detection.
//!
//! Keys are matched by name only; values are never inspected.

use regex::Regex;

/// Built-in patterns for secret-looking environment keys, as (name, regex).
pub const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    ("password", r"(?i)(PASSWORD|PASSWD|PWD)$"),
    ("secret", r"(?i)SECRET"),
    ("token", r"(?i)TOKEN$"),
    ("key", r"(?i)(^|_)(API_?)?KEY$"),
    ("otlp_headers", r"(?i)^OTEL_EXPORTER_OTLP_HEADERS$"),
];

/// Matches environment variable names against secret patterns.
///
/// # Example
///
/// ```
/// use devstrap::secrets::SecretMatcher;
///
/// let matcher = SecretMatcher::with_builtins();
/// assert!(matcher.is_secret("POSTGRES_PASSWORD"));
/// assert!(matcher.is_secret("OPENAI_API_KEY"));
/// assert!(!matcher.is_secret("POSTGRES_HOST"));
/// ```
pub struct SecretMatcher {
    patterns: Vec<(String, Regex)>,
}

impl SecretMatcher {
    /// Create a matcher with built-in patterns.
    pub fn with_builtins() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .filter_map(|(name, pattern)| {
                Regex::new(pattern)
                    .ok()
                    .map(|re| (name.to_string(), re))
            })
            .collect();

        Self { patterns }
    }

    /// Check whether a key looks like it holds a secret.
    pub fn is_secret(&self, key: &str) -> bool {
        self.matching_pattern(key).is_some()
    }

    /// Name of the first pattern matching `key`, if any.
    pub fn matching_pattern(&self, key: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(key))
            .map(|(name, _)| name.as_str())
    }
}

impl Default for SecretMatcher {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_patterns_compile() {
        let matcher = SecretMatcher::with_builtins();
        assert_eq!(matcher.patterns.len(), BUILTIN_PATTERNS.len());
    }

    #[test]
    fn detects_secret_keys() {
        let matcher = SecretMatcher::with_builtins();
        assert_eq!(matcher.matching_pattern("POSTGRES_PASSWORD"), Some("password"));
        assert_eq!(matcher.matching_pattern("AWS_SECRET_ACCESS_KEY"), Some("secret"));
        assert_eq!(matcher.matching_pattern("VAULT_TOKEN"), Some("token"));
        assert_eq!(matcher.matching_pattern("OPENAI_API_KEY"), Some("key"));
        assert_eq!(
            matcher.matching_pattern("OTEL_EXPORTER_OTLP_HEADERS"),
            Some("otlp_headers")
        );
    }

    #[test]
    fn default_settings_are_not_secret() {
        let matcher = SecretMatcher::with_builtins();
        for key in [
            "APP_PORT",
            "LOG_LEVEL",
            "POSTGRES_USER",
            "POSTGRES_DB",
            "REDIS_HOST",
            "OTEL_SERVICE_NAME",
            "MONKEY",
        ] {
            assert!(!matcher.is_secret(key), "{key} flagged as secret");
        }
    }
}
