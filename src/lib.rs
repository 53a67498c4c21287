//! devstrap - Local development environment bootstrapper.
//!
//! devstrap brings a project's local environment up in one fixed sequence:
//! it checks for a Python interpreter, recreates the project virtualenv,
//! installs `requirements.txt`, makes sure a `.env` file exists, and starts
//! the Docker Compose services (Postgres, Redis, Jaeger, Prometheus).
//!
//! # Modules
//!
//! - [`bootstrap`] - The sequential bootstrap procedure and its process seam
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.env` parsing and materialization, settings file
//! - [`error`] - Error types and result aliases
//! - [`secrets`] - Masking of secret values in printed configuration
//! - [`shell`] - Process execution and PATH lookup
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use devstrap::config::{default_entries, render_env_file, EnvFileParser};
//!
//! let content = render_env_file(&default_entries());
//! let vars = EnvFileParser::parse(&content).unwrap();
//! assert_eq!(vars.get("APP_PORT"), Some(&"8000".to_string()));
//! assert_eq!(vars.get("REDIS_PORT"), Some(&"6379".to_string()));
//! ```

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod secrets;
pub mod shell;
pub mod ui;

pub use error::{DevstrapError, Result};
