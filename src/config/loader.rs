//! Configuration file loading with precedence handling.

use super::ConsoleConfig;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "DBGCON_CONFIG";

/// Environment variable overriding `collapse_identical_lines`.
pub const COLLAPSE_ENV_VAR: &str = "DBGCON_COLLAPSE_IDENTICAL_LINES";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/dbgcon/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Collapse consecutive identical output lines into a repeat count.
    #[serde(default)]
    pub collapse_identical_lines: Option<bool>,

    /// Append the source file name to exported output lines.
    #[serde(default)]
    pub include_source: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Collapse identical lines.
    pub collapse_identical_lines: bool,
    /// Include source names in the export.
    pub include_source: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            collapse_identical_lines: ConsoleConfig::default().collapse_identical_lines,
            include_source: false,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// The part of the configuration the log store consumes.
    pub fn console(&self) -> ConsoleConfig {
        ConsoleConfig {
            collapse_identical_lines: self.collapse_identical_lines,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/dbgcon/dbgcon.log` on Linux, or the platform's
/// state directory elsewhere. Falls back to the current directory if no
/// state directory can be determined.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("dbgcon").join("dbgcon.log")
    } else {
        PathBuf::from("dbgcon.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/dbgcon/config.toml` on Linux, the platform's config
/// directory elsewhere, or `None` if it cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dbgcon").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `DBGCON_CONFIG` environment variable
/// 3. Default path `~/.config/dbgcon/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        collapse_identical_lines: config
            .collapse_identical_lines
            .unwrap_or(defaults.collapse_identical_lines),
        include_source: config.include_source.unwrap_or(defaults.include_source),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Parse a boolean environment value (`true/false`, `1/0`, `yes/no`, `on/off`).
fn parse_env_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `DBGCON_COLLAPSE_IDENTICAL_LINES`. Unparseable values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(collapse) = std::env::var(COLLAPSE_ENV_VAR)
        .ok()
        .as_deref()
        .and_then(parse_env_bool)
    {
        config.collapse_identical_lines = collapse;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    collapse_override: Option<bool>,
    include_source_override: Option<bool>,
    log_file_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(collapse) = collapse_override {
        config.collapse_identical_lines = collapse;
    }

    if let Some(include_source) = include_source_override {
        config.include_source = include_source;
    }

    if let Some(path) = log_file_override {
        config.log_file_path = path;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
