//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Running `devstrap` with no
//! subcommand is the same as `devstrap up`.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod down;
pub mod env;
pub mod up;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
