//! `enml html` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use enml::{HtmlRenderer, Resources};
use enml_config::{CliSettings, Config};

use crate::error::CliError;
use crate::input::read_input;
use crate::output::Output;

/// Arguments for the html command.
#[derive(Args)]
pub(crate) struct HtmlArgs {
    /// Note to render (`-` for stdin).
    file: PathBuf,

    /// JSON file mapping resource hashes to URLs or `{url, title}` records.
    #[arg(short, long)]
    resources: Option<PathBuf>,

    /// Body style for notes that set none (overrides config).
    #[arg(long)]
    note_style: Option<String>,

    /// Path to configuration file (default: auto-discover enml.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl HtmlArgs {
    /// Execute the html command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or rendering fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            note_style: self.note_style,
            ..Default::default()
        };
        let mut config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let mut resources = std::mem::take(&mut config.resources.table);
        if let Some(path) = &self.resources {
            resources.extend(load_resources(path)?);
        }
        tracing::info!(count = resources.len(), "Resources loaded");

        let enml = read_input(&self.file)?;
        let html = HtmlRenderer::new(&resources)
            .with_note_style(config.render.note_style)
            .render(&enml)?;
        output.result(&html)?;
        Ok(())
    }
}

/// Read a resource table from a JSON file.
fn load_resources(path: &Path) -> Result<Resources, CliError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
