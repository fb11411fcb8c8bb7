//! # Configuration Loader
//!
//! Reads the widget TOML file into a [`WidgetConfig`] DTO and applies
//! environment overrides. Accepts whatever is in the file; an empty
//! encryption key is a fact the wiring layer handles, not a load error.

use anyhow::Context;
use std::path::{Path, PathBuf};

use hk_core::config::WidgetConfig;

/// Environment variable overriding `security.encryption_key`.
pub const ENCRYPTION_KEY_ENV: &str = "HIVE_AUTH_ENCRYPTION_KEY";

const APP_DIR_NAME: &str = "hive-auth-kit";

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
pub fn load_config(config_path: &Path) -> anyhow::Result<WidgetConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    let config = WidgetConfig::from_toml(&toml_value)?;
    Ok(apply_env_overrides(config, |name| std::env::var(name).ok()))
}

/// Apply environment overrides using `lookup` to read variables.
///
/// A set but empty variable does not clear a key from the file.
pub fn apply_env_overrides(
    mut config: WidgetConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> WidgetConfig {
    if let Some(key) = lookup(ENCRYPTION_KEY_ENV).filter(|k| !k.is_empty()) {
        config.encryption_key = key;
    }
    config
}

/// Platform data directory for the widget, e.g.
/// `~/.local/share/hive-auth-kit` on Linux.
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir().context("Failed to resolve platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}
