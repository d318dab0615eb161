//! `enml todos` command implementation.

use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use enml::Todo;

use crate::error::CliError;
use crate::input::read_input;
use crate::output::Output;

/// Arguments for the todos command.
#[derive(Args)]
pub(crate) struct TodosArgs {
    /// Note to read (`-` for stdin).
    file: PathBuf,

    /// Print the items as a JSON array.
    #[arg(long)]
    json: bool,
}

impl TodosArgs {
    /// Execute the todos command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or parsed.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let enml = read_input(&self.file)?;
        let todos = enml::extract_todos(&enml)?;

        if self.json {
            output.result(&serde_json::to_string_pretty(&todos)?)?;
        } else if !todos.is_empty() {
            output.result(&format_todos(&todos))?;
        }
        Ok(())
    }
}

/// One `[x] text` line per item, prefixed with its index.
fn format_todos(todos: &[Todo]) -> String {
    let mut out = String::new();
    for (index, todo) in todos.iter().enumerate() {
        let mark = if todo.checked { 'x' } else { ' ' };
        let _ = writeln!(out, "{index}: [{mark}] {}", todo.text.trim());
    }
    out
}
