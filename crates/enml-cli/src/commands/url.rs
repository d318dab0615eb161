//! `enml url` command implementation.

use std::path::PathBuf;

use clap::Args;
use enml_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the url command.
#[derive(Args)]
pub(crate) struct UrlArgs {
    /// Resource guid.
    guid: String,

    /// Shard of the resource owner (overrides config).
    #[arg(short, long, env = "ENML_SHARD")]
    shard: Option<String>,

    /// Resource host (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Path to configuration file (default: auto-discover enml.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl UrlArgs {
    /// Execute the url command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or no shard is known.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            resource_host: self.host,
            shard: self.shard,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        output.result(&config.resource_url(&self.guid)?)?;
        Ok(())
    }
}
