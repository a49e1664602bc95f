//! Configuration module.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};

/// Console settings consumed by the log store.
///
/// Read on every append, so changing it through `ReplModel::set_config`
/// takes effect for the next piece of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Whether consecutive identical output lines collapse into one entry
    /// with a repeat count.
    pub collapse_identical_lines: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            collapse_identical_lines: true,
        }
    }
}
