//! Process runner seam.
//!
//! The bootstrap never spawns processes directly; it goes through a
//! [`ProcessRunner`] so dry runs and tests can observe every invocation
//! without touching the system.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::shell::{self, CommandResult, Invocation, OutputCallback};

/// Runs external programs on behalf of the bootstrap.
pub trait ProcessRunner {
    /// Resolve a program on PATH.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run a command that changes the system.
    fn run(&self, invocation: &Invocation, output: Option<OutputCallback>)
        -> Result<CommandResult>;

    /// Run a read-only check (e.g. `docker compose version`).
    fn inspect(&self, invocation: &Invocation) -> Result<CommandResult> {
        self.run(invocation, None)
    }

    /// Whether commands are only being previewed.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Runs real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        shell::find_on_path(program)
    }

    fn run(
        &self,
        invocation: &Invocation,
        output: Option<OutputCallback>,
    ) -> Result<CommandResult> {
        tracing::debug!("Running: {}", invocation);
        let result = match output {
            Some(callback) => shell::execute_streaming(invocation, callback)?,
            None => shell::execute(invocation)?,
        };
        tracing::debug!(
            "Finished {} with {:?} in {:?}",
            invocation.program,
            result.exit_code,
            result.duration
        );
        Ok(result)
    }
}

/// Resolves tools and runs read-only checks for real, but never runs
/// commands that change the system.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

impl ProcessRunner for DryRunRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        shell::find_on_path(program)
    }

    fn run(
        &self,
        invocation: &Invocation,
        _output: Option<OutputCallback>,
    ) -> Result<CommandResult> {
        tracing::debug!("Dry run, skipping: {}", invocation);
        Ok(CommandResult::success(
            String::new(),
            String::new(),
            Duration::ZERO,
        ))
    }

    fn inspect(&self, invocation: &Invocation) -> Result<CommandResult> {
        SystemRunner.run(invocation, None)
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

/// A canned response for [`RecordingRunner`].
#[derive(Debug, Clone)]
pub struct CannedResult {
    /// Exit code to report.
    pub exit_code: i32,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

impl CannedResult {
    /// Successful exit with the given stdout.
    pub fn ok(stdout: &str) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    /// Failing exit with the given stderr.
    pub fn fail(exit_code: i32, stderr: &str) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Test runner that records invocations instead of spawning them.
///
/// Tools are "installed" with [`RecordingRunner::with_tool`]; responses are
/// keyed by a prefix of the rendered command line (see [`Invocation`]'s
/// `Display`), and anything unmatched succeeds with empty output.
///
/// # Example
///
/// ```
/// use devstrap::bootstrap::{CannedResult, ProcessRunner, RecordingRunner};
/// use devstrap::shell::Invocation;
///
/// let runner = RecordingRunner::new()
///     .with_tool("docker", "/usr/bin/docker")
///     .respond("/usr/bin/docker compose version", CannedResult::ok("v2.24.5"));
///
/// assert!(runner.locate("docker").is_some());
/// let inv = Invocation::new("/usr/bin/docker").args(["compose", "version"]);
/// let result = runner.inspect(&inv).unwrap();
/// assert!(result.stdout.contains("2.24.5"));
/// assert_eq!(runner.commands(), ["/usr/bin/docker compose version"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingRunner {
    tools: HashMap<String, PathBuf>,
    responses: Vec<(String, CannedResult)>,
    invocations: RefCell<Vec<Invocation>>,
}

impl RecordingRunner {
    /// Create a runner with no tools available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program` resolvable at `path`.
    pub fn with_tool(mut self, program: &str, path: impl Into<PathBuf>) -> Self {
        self.tools.insert(program.to_string(), path.into());
        self
    }

    /// Respond to commands starting with `prefix`.
    pub fn respond(mut self, prefix: &str, result: CannedResult) -> Self {
        self.responses.push((prefix.to_string(), result));
        self
    }

    /// Every invocation seen, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Every invocation rendered as a command line, in order.
    pub fn commands(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.tools.get(program).cloned()
    }

    fn run(
        &self,
        invocation: &Invocation,
        _output: Option<OutputCallback>,
    ) -> Result<CommandResult> {
        self.invocations.borrow_mut().push(invocation.clone());

        let line = invocation.to_string();
        let canned = self
            .responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| CannedResult::ok(""));

        if canned.exit_code == 0 {
            Ok(CommandResult::success(
                canned.stdout,
                canned.stderr,
                Duration::ZERO,
            ))
        } else {
            Ok(CommandResult::failure(
                Some(canned.exit_code),
                canned.stdout,
                canned.stderr,
                Duration::ZERO,
            ))
        }
    }
}
