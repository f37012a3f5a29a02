//! Output formatting module

pub mod json;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use styles::Styles;

use crate::application::HookOutcome;
use crate::domain::UnitStatus;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }

    /// Print a unit status line. Suppressed when `quiet`.
    pub fn status(&self, status: &UnitStatus) {
        if !self.quiet {
            println!(
                "  {}  {}",
                status.kind().style(self.styles.for_status(status)),
                status.message()
            );
        }
    }

    /// Render a trigger outcome and its event log for a human reader.
    pub fn outcome(&self, outcome: &HookOutcome, messages: &[String], failure: Option<&str>) {
        self.kv("trigger", outcome.trigger.name());
        for message in messages {
            self.info(message);
        }
        match &outcome.status {
            Some(status) => self.status(status),
            None => self.kv("status", "unchanged"),
        }
        if let Some(failure) = failure {
            self.error(failure);
        } else if outcome.trigger.is_action() {
            self.success("action completed");
        }
    }
}
