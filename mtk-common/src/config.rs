//! Bootstrap configuration and rules source resolution
//!
//! Configuration file location, first match wins:
//! 1. Command-line argument
//! 2. `MTK_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/mtk/config.toml` on Linux)
//!
//! A missing configuration file is not an error: built-in defaults are used
//! and [`ConfigSource::report`] logs a warning. A file that exists but does
//! not parse is an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "MTK_CONFIG";

/// Environment variable naming the rules file
pub const RULES_ENV_VAR: &str = "MTK_RULES_FILE";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Rule definition file (JSON); the embedded default rules when unset
    #[serde(default)]
    pub rules_file: Option<PathBuf>,

    /// Refuse rule sets that use reserved conditions or unimplemented chains
    #[serde(default = "default_strict")]
    pub strict: bool,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            rules_file: None,
            strict: default_strict(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_strict() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where the rule definitions come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesSource {
    /// JSON rule definition file
    File(PathBuf),
    /// Rule set compiled into the binary
    Embedded,
}

/// Where [`load_config`] found its configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from this file
    File(PathBuf),
    /// This file was looked for but does not exist; defaults in use
    Missing(PathBuf),
    /// No platform config directory; defaults in use
    NoConfigDir,
}

impl ConfigSource {
    /// Log where the configuration came from (call after tracing is set up)
    pub fn report(&self) {
        match self {
            ConfigSource::File(path) => info!("Config file: {}", path.display()),
            ConfigSource::Missing(path) => warn!(
                "Config file not found: {}, using default configuration",
                path.display()
            ),
            ConfigSource::NoConfigDir => {
                warn!("Could not determine config directory, using default configuration")
            }
        }
    }
}

/// Platform default configuration file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mtk").join("config.toml"))
}

/// Parse a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Configuration file to use: CLI argument, environment, platform default
///
/// The returned path may not exist.
fn config_file_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| {
            std::env::var_os(CONFIG_ENV_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .or_else(default_config_path)
}

/// Locate and load the configuration file
///
/// Falls back to defaults when no file is found.
pub fn load_config(cli_path: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    let Some(path) = config_file_path(cli_path) else {
        return Ok((TomlConfig::default(), ConfigSource::NoConfigDir));
    };

    if !path.exists() {
        return Ok((TomlConfig::default(), ConfigSource::Missing(path)));
    }

    let config = load_toml_config(&path)?;
    Ok((config, ConfigSource::File(path)))
}

/// Resolve the rules source
///
/// Priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML `rules_file`
/// 4. Embedded default rule set (fallback)
pub fn resolve_rules_source(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    config: &TomlConfig,
) -> RulesSource {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return RulesSource::File(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Some(path) = std::env::var_os(env_var_name).filter(|v| !v.is_empty()) {
        return RulesSource::File(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.rules_file {
        return RulesSource::File(path.clone());
    }

    // Priority 4: Embedded defaults
    RulesSource::Embedded
}
