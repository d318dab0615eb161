//! Configuration management for the ENML toolkit.
//!
//! Parses `enml.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [render]
//! note_style = "font-family: serif;"
//!
//! [resources]
//! host = "${ENML_HOST:-https://www.evernote.com}"
//! shard = "s1"
//!
//! [resources.table]
//! "d41d8cd98f00b204e9800998ecf8427e" = "https://example.com/a.png"
//! "0cc175b9c0f1b6a831c399e269772661" = { url = "https://example.com/b.pdf", title = "b.pdf" }
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `resources.host` and `resources.shard` support `${VAR}` and
//! `${VAR:-default}`.

use std::path::{Path, PathBuf};

use enml::{DEFAULT_NOTE_STYLE, DEFAULT_RESOURCE_HOST, Resources};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the default note style.
    pub note_style: Option<String>,
    /// Override the resource host.
    pub resource_host: Option<String>,
    /// Override the resource shard.
    pub shard: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "enml.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Resource lookup configuration.
    pub resources: ResourcesConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Body style for notes that set none.
    pub note_style: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            note_style: DEFAULT_NOTE_STYLE.to_owned(),
        }
    }
}

/// Resource lookup configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Host serving resources.
    pub host: String,
    /// Shard of the note owner, needed to build resource URLs.
    pub shard: Option<String>,
    /// Known resources by content hash.
    pub table: Resources,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RESOURCE_HOST.to_owned(),
            shard: None,
            table: Resources::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`resources.shard`").
        field: String,
        /// Error message (e.g., "`ENML_SHARD`: environment variable not found").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Expand `${VAR}` and `${VAR:-default}` references in a field value.
///
/// Bare `$VAR` is left alone so literal dollars in URLs survive.
fn expand_field(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }
    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("{}: {}", e.var_name, e.cause),
        })
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `enml.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Build the URL of a resource from its guid and the configured shard.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no shard is configured.
    pub fn resource_url(&self, guid: &str) -> Result<String, ConfigError> {
        let shard = self.resources.shard.as_deref().ok_or_else(|| {
            ConfigError::Validation("resources.shard required to build resource URLs".into())
        })?;
        Ok(enml::url_of_resource_on(&self.resources.host, guid, shard))
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(note_style) = &settings.note_style {
            self.render.note_style.clone_from(note_style);
        }
        if let Some(host) = &settings.resource_host {
            self.resources.host.clone_from(host);
        }
        if let Some(shard) = &settings.shard {
            self.resources.shard = Some(shard.clone());
        }
    }

    /// Search for a config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.note_style, "render.note_style")?;
        require_non_empty(&self.resources.host, "resources.host")?;
        require_http_url(&self.resources.host, "resources.host")?;
        if let Some(shard) = &self.resources.shard {
            require_non_empty(shard, "resources.shard")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.resources.host = expand_field(&self.resources.host, "resources.host")?;
        if let Some(shard) = &self.resources.shard {
            self.resources.shard = Some(expand_field(shard, "resources.shard")?);
        }
        Ok(())
    }
}
