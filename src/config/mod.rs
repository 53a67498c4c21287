//! Configuration handling for devstrap.
//!
//! Two kinds of configuration live here:
//! - The project's `.env` file, which devstrap creates once and then only reads
//!   ([`env_file`], [`defaults`], [`materialize`])
//! - devstrap's own optional settings file, `.devstrap.yml` ([`settings`])
//!
//! # Example
//!
//! ```
//! use devstrap::config::{materialize_env_file, EnvFileAction};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let env = temp.path().join(".env");
//! let template = temp.path().join(".env.example");
//!
//! let first = materialize_env_file(&env, &template).unwrap();
//! assert!(matches!(first, EnvFileAction::WroteDefaults { .. }));
//!
//! let second = materialize_env_file(&env, &template).unwrap();
//! assert!(matches!(second, EnvFileAction::Kept { .. }));
//! ```

pub mod defaults;
pub mod env_file;
pub mod materialize;
pub mod settings;

pub use defaults::{default_entries, default_value, render_env_file, EnvSection, DEFAULT_SECTIONS};
pub use env_file::EnvFileParser;
pub use materialize::{materialize_env_file, plan_env_file, EnvFileAction};
pub use settings::{BootstrapSettings, SETTINGS_FILE};

