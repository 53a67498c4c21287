//! Non-interactive UI for CI/headless environments.

use crate::shell::{OutputCallback, OutputLine};

use super::{output_tail, OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Spinners become plain status lines so log-based environments get one
/// line per step. Errors, warnings and hints go to stderr.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn output(&mut self, text: &str) {
        println!("{}", text);
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_hint(&mut self, hint: &str) {
        eprintln!("  Hint: {}", hint);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        println!("→ {}", message);
        Box::new(LineSpinner { mode: self.mode })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        eprintln!();
        eprintln!("    ┌─ Command ──────────────────────────");
        eprintln!("    │ {}", command);
        let tail = output_tail(output, 20);
        if !tail.is_empty() {
            eprintln!("    ├─ Output ───────────────────────────");
            for line in tail.lines() {
                eprintln!("    │ {}", line);
            }
        }
        eprintln!("    └────────────────────────────────────");
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner replacement that prints its final state as a line.
struct LineSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn output_callback(&self) -> Option<OutputCallback> {
        if !self.mode.shows_command_output() {
            return None;
        }
        Some(Box::new(|line: OutputLine| match line {
            OutputLine::Stdout(s) => println!("  {}", s),
            OutputLine::Stderr(s) => eprintln!("  {}", s),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_is_not_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn spinner_streams_only_in_verbose() {
        let mut verbose = NonInteractiveUI::new(OutputMode::Verbose);
        let mut quiet = NonInteractiveUI::new(OutputMode::Quiet);

        assert!(verbose.start_spinner("x").output_callback().is_some());
        assert!(quiet.start_spinner("x").output_callback().is_none());
    }
}
