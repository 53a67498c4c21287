//! The environment bootstrap.
//!
//! - [`procedure`] - [`Bootstrapper`], the seven-step sequence
//! - [`runner`] - [`ProcessRunner`] seam with real, dry-run and recording runners
//! - [`venv`] - Virtualenv creation and activation
//! - [`compose`] - Container engine compose invocations
//! - [`preflight`] - Readiness report without side effects
//! - [`summary`] - Endpoints and next steps printed at the end
//!
//! # Example
//!
//! ```
//! use devstrap::bootstrap::{Bootstrapper, RecordingRunner};
//! use devstrap::config::BootstrapSettings;
//! use devstrap::ui::MockUI;
//! use devstrap::DevstrapError;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let runner = RecordingRunner::new(); // nothing installed
//! let mut ui = MockUI::new();
//!
//! let err = Bootstrapper::new(temp.path(), BootstrapSettings::default(), &runner)
//!     .run(&mut ui)
//!     .unwrap_err();
//! assert!(matches!(err, DevstrapError::MissingTool { .. }));
//! assert!(runner.invocations().is_empty());
//! ```

pub mod compose;
pub mod preflight;
pub mod procedure;
pub mod runner;
pub mod summary;
pub mod venv;

pub use compose::{parse_compose_version, ComposeCli};
pub use preflight::{preflight, PreflightItem, PreflightReport};
pub use procedure::{BootstrapReport, Bootstrapper, STEP_COUNT};
pub use runner::{CannedResult, DryRunRunner, ProcessRunner, RecordingRunner, SystemRunner};
pub use summary::Summary;
pub use venv::Virtualenv;
