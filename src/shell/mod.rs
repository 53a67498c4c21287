//! Process execution and tool lookup.

pub mod command;
pub mod path;
pub mod platform;

pub use command::{
    execute, execute_streaming, CommandResult, Invocation, OutputCallback, OutputLine,
};
pub use path::{find_on_path, is_executable, parse_system_path, resolve_tool_path, split_path};
pub use platform::{is_ci, is_ci_with, venv_bin_dir, venv_python};
