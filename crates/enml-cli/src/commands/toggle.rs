//! `enml toggle` command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::CliError;
use crate::input::{is_stdin, read_input};
use crate::output::Output;

/// Arguments for the toggle command.
#[derive(Args)]
pub(crate) struct ToggleArgs {
    /// Note to rewrite (`-` for stdin).
    file: PathBuf,

    /// Zero-based position of the checklist item in document order.
    index: usize,

    /// Uncheck the item instead of checking it.
    #[arg(long)]
    uncheck: bool,

    /// Write the result back to the file instead of stdout.
    #[arg(short, long)]
    in_place: bool,
}

impl ToggleArgs {
    /// Execute the toggle command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, parsed or written back.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        if self.in_place && is_stdin(&self.file) {
            return Err(CliError::Validation(
                "--in-place requires a file, not stdin".to_owned(),
            ));
        }

        let enml = read_input(&self.file)?;
        let rewritten = enml::toggle_todo(&enml, self.index, !self.uncheck)?;

        if self.in_place {
            std::fs::write(&self.file, rewritten)?;
            output.success(&format!("Updated {}", self.file.display()));
        } else {
            output.result(&rewritten)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_place_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.enml");
        std::fs::write(&path, "<en-note><en-todo/>a</en-note>").unwrap();

        let args = ToggleArgs {
            file: path.clone(),
            index: 0,
            uncheck: false,
            in_place: true,
        };
        args.execute(&Output::new()).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"<en-note><en-todo checked="true"/>a</en-note>"#
        );
    }

    #[test]
    fn test_in_place_rejects_stdin() {
        let args = ToggleArgs {
            file: PathBuf::from("-"),
            index: 0,
            uncheck: false,
            in_place: true,
        };
        assert!(matches!(
            args.execute(&Output::new()),
            Err(CliError::Validation(_))
        ));
    }
}
