//! `enml text` and `enml from-text` command implementations.

use std::path::PathBuf;

use clap::Args;

use crate::error::CliError;
use crate::input::read_input;
use crate::output::Output;

/// Arguments for the text command.
#[derive(Args)]
pub(crate) struct TextArgs {
    /// Note to convert (`-` for stdin).
    file: PathBuf,
}

impl TextArgs {
    /// Execute the text command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let enml = read_input(&self.file)?;
        output.result(enml::plain_text_of_enml(&enml).trim())?;
        Ok(())
    }
}

/// Arguments for the from-text command.
#[derive(Args)]
pub(crate) struct FromTextArgs {
    /// Plain text file to convert (`-` for stdin).
    file: PathBuf,
}

impl FromTextArgs {
    /// Execute the from-text command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let text = read_input(&self.file)?;
        // Drop the final line break so it does not become an empty div
        let text = text
            .strip_suffix("\r\n")
            .or_else(|| text.strip_suffix('\n'))
            .unwrap_or(&text);
        output.result(&enml::enml_of_plain_text(text)?)?;
        Ok(())
    }
}
