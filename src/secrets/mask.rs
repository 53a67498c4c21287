//! Masking of secret values for display.

use super::pattern::SecretMatcher;

/// Replacement shown instead of a secret value.
pub const MASK: &str = "********";

/// Masks the values of secret-looking keys.
///
/// # Example
///
/// ```
/// use devstrap::secrets::EntryMasker;
///
/// let masker = EntryMasker::new();
/// assert_eq!(masker.mask_value("POSTGRES_PASSWORD", "postgres"), "********");
/// assert_eq!(masker.mask_value("POSTGRES_HOST", "localhost"), "localhost");
/// ```
#[derive(Default)]
pub struct EntryMasker {
    matcher: SecretMatcher,
}

impl EntryMasker {
    /// Create a masker with built-in secret patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value to display for `key`.
    ///
    /// Empty secrets stay empty so an unset password remains visible as such.
    pub fn mask_value<'a>(&self, key: &str, value: &'a str) -> &'a str {
        if !value.is_empty() && self.matcher.is_secret(key) {
            MASK
        } else {
            value
        }
    }

    /// Mask a list of entries.
    pub fn mask_entries(&self, entries: &[(String, String)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.clone(), self.mask_value(k, v).to_string()))
            .collect()
    }
}
