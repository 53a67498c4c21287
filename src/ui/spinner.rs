//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::shell::{OutputCallback, OutputLine};

use super::theme::DevstrapTheme;
use super::SpinnerHandle;

/// A progress spinner for long-running operations.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: DevstrapTheme,
    live_lines: usize,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    ///
    /// `live_lines` is how many trailing lines of command output to show
    /// under the spinner while it runs (0 disables live output).
    pub fn new(message: &str, theme: DevstrapTheme, live_lines: usize) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            bar,
            theme,
            live_lines,
        }
    }

    fn finish_with(&mut self, text: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(text);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        let text = self.theme.format_success(msg);
        self.finish_with(text);
    }

    fn finish_error(&mut self, msg: &str) {
        let text = self.theme.format_error(msg);
        self.finish_with(text);
    }

    fn output_callback(&self) -> Option<OutputCallback> {
        if self.live_lines == 0 {
            return None;
        }
        Some(live_output_callback(
            self.bar.clone(),
            self.bar.message(),
            2,
            self.live_lines,
        ))
    }
}

/// Create an output callback that updates a spinner with live output lines.
///
/// The callback keeps a ring buffer of the last `max_lines` output lines
/// and redraws the spinner message as the base message plus those lines.
pub fn live_output_callback(
    bar: ProgressBar,
    base_message: String,
    indent: usize,
    max_lines: usize,
) -> OutputCallback {
    let buffer: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(VecDeque::new()));
    let theme = DevstrapTheme::new();

    Box::new(move |line: OutputLine| {
        let text = match &line {
            OutputLine::Stdout(s) | OutputLine::Stderr(s) => s.trim_end().to_string(),
        };

        if text.is_empty() {
            return;
        }

        let display_text = if text.chars().count() > 72 {
            format!("{}...", text.chars().take(69).collect::<String>())
        } else {
            text
        };

        let Ok(mut buf) = buffer.lock() else {
            return;
        };
        buf.push_back(display_text);
        while buf.len() > max_lines {
            buf.pop_front();
        }

        let prefix = " ".repeat(indent);
        let mut msg = base_message.clone();
        for line in buf.iter() {
            msg.push('\n');
            msg.push_str(&prefix);
            msg.push_str(&theme.dim.apply_to(format!("» {}", line)).to_string());
        }

        bar.set_message(msg);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_without_live_lines_has_no_callback() {
        let mut spinner = ProgressSpinner::new("Working", DevstrapTheme::plain(), 0);
        assert!(spinner.output_callback().is_none());
        spinner.finish_success("Done");
    }

    #[test]
    fn spinner_with_live_lines_has_callback() {
        let mut spinner = ProgressSpinner::new("Installing", DevstrapTheme::plain(), 3);
        assert!(spinner.output_callback().is_some());
        spinner.finish_error("Failed");
    }

    #[test]
    fn live_output_callback_keeps_last_lines() {
        let bar = ProgressBar::hidden();
        let callback = live_output_callback(bar.clone(), "Installing...".to_string(), 2, 2);

        callback(OutputLine::Stdout("Collecting fastapi".to_string()));
        callback(OutputLine::Stderr("warning: cache".to_string()));
        callback(OutputLine::Stdout("Installing collected packages".to_string()));

        let msg = bar.message();
        assert!(msg.starts_with("Installing..."));
        assert!(!msg.contains("Collecting fastapi"));
        assert!(msg.contains("warning: cache"));
        assert!(msg.contains("Installing collected packages"));

        bar.finish();
    }

    #[test]
    fn live_output_callback_skips_empty_lines() {
        let bar = ProgressBar::hidden();
        let callback = live_output_callback(bar.clone(), "Running...".to_string(), 2, 2);

        callback(OutputLine::Stdout(String::new()));
        callback(OutputLine::Stdout("real output".to_string()));

        let msg = bar.message();
        assert!(msg.contains("real output"));
        assert_eq!(msg.matches('\n').count(), 1);

        bar.finish();
    }

    #[test]
    fn live_output_callback_truncates_long_lines() {
        let bar = ProgressBar::hidden();
        let callback = live_output_callback(bar.clone(), "Running...".to_string(), 2, 2);

        callback(OutputLine::Stdout("x".repeat(100)));

        let msg = bar.message();
        assert!(msg.contains("..."));
        assert!(!msg.contains(&"x".repeat(100)));

        bar.finish();
    }
}
