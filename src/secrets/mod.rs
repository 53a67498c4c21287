//! Secret detection and masking.
//!
//! Used when printing the environment file so that passwords and tokens do
//! not end up in terminal scrollback or CI logs.
//!
//! - [`SecretMatcher`] - Matches environment variable names against secret patterns
//! - [`EntryMasker`] - Replaces secret values with a fixed mask

pub mod mask;
pub mod pattern;

pub use mask::{EntryMasker, MASK};
pub use pattern::{SecretMatcher, BUILTIN_PATTERNS};
