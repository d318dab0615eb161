//! Terminal output utilities.
//!
//! Command results go to stdout; status and errors go to stderr.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    stdout: Term,
    term: Term,
    green: Style,
    red: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            stdout: Term::stdout(),
            term: Term::stderr(),
            green: Style::new().green(),
            red: Style::new().red(),
        }
    }

    /// Print a command result to stdout, as is.
    pub(crate) fn result(&self, content: &str) -> std::io::Result<()> {
        self.stdout.write_str(content)?;
        if !content.ends_with('\n') {
            self.stdout.write_line("")?;
        }
        Ok(())
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
