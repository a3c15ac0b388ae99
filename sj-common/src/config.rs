//! Configuration loading and config file resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "SJ_CROP_CONFIG";

/// Output format for command-line tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Tool configuration loaded from TOML
///
/// ```toml
/// output = "json"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputFormat,
}

impl ToolConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }
}

/// Where the effective config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    DefaultFile(PathBuf),
    CompiledDefaults,
}

/// Config file resolution in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. Platform config file, if present
/// 4. Compiled defaults (fallback)
pub fn resolve_config_source(cli_arg: Option<&Path>) -> ConfigSource {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return ConfigSource::CommandLine(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return ConfigSource::Environment(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config file
    if let Some(path) = default_config_path() {
        if path.exists() {
            return ConfigSource::DefaultFile(path);
        }
    }

    // Priority 4: Compiled defaults
    ConfigSource::CompiledDefaults
}

/// Effective configuration plus where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: ToolConfig,
    pub source: ConfigSource,
    /// Why compiled defaults replaced a config file, if they did
    pub fallback_reason: Option<String>,
}

impl LoadedConfig {
    /// Log how the configuration was resolved
    ///
    /// Kept apart from [`load_config`] because the log level itself comes
    /// from the config, so the subscriber is installed in between.
    pub fn log_source(&self) {
        if let Some(reason) = &self.fallback_reason {
            warn!("{}, using default configuration", reason);
        }
        match &self.source {
            ConfigSource::CommandLine(path)
            | ConfigSource::Environment(path)
            | ConfigSource::DefaultFile(path) => {
                debug!("Configuration source: {}", path.display())
            }
            ConfigSource::CompiledDefaults => {
                debug!("No config file found, using compiled defaults")
            }
        }
    }
}

/// Resolve and load the tool configuration
///
/// Files named explicitly (argument or environment) must exist and parse.
/// A broken platform default file is replaced by defaults and the reason is
/// kept in [`LoadedConfig::fallback_reason`].
pub fn load_config(cli_arg: Option<&Path>) -> Result<LoadedConfig> {
    let source = resolve_config_source(cli_arg);
    let (config, fallback_reason) = match &source {
        ConfigSource::CommandLine(path) | ConfigSource::Environment(path) => {
            (ToolConfig::from_file(path)?, None)
        }
        ConfigSource::DefaultFile(path) => match ToolConfig::from_file(path) {
            Ok(config) => (config, None),
            Err(e) => (
                ToolConfig::default(),
                Some(format!("Ignoring {}: {}", path.display(), e)),
            ),
        },
        ConfigSource::CompiledDefaults => (ToolConfig::default(), None),
    };

    Ok(LoadedConfig {
        config,
        source,
        fallback_reason,
    })
}

/// `<config dir>/sj-crop/config.toml` for the current platform
///
/// Linux: `~/.config`, macOS: `~/Library/Application Support`,
/// Windows: `%APPDATA%`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sj-crop").join("config.toml"))
}
