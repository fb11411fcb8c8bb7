use std::fmt;
use std::path::PathBuf;

/// Widget configuration DTO (pure data, no logic)
#[derive(Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Key used to encrypt the persisted session (may be empty)
    pub encryption_key: String,

    /// Directory holding the encrypted session file (path info only)
    pub session_dir: PathBuf,

    /// Show the "switch user" entry in the account menu
    pub should_show_switch_user: bool,

    /// Show the optional active key field in private key login
    pub is_active_field_visible: bool,

    pub logging: LoggingConfig,
}

impl fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.encryption_key.is_empty() {
            "<empty>"
        } else {
            "[REDACTED]"
        };
        f.debug_struct("WidgetConfig")
            .field("encryption_key", &key)
            .field("session_dir", &self.session_dir)
            .field("should_show_switch_user", &self.should_show_switch_user)
            .field("is_active_field_visible", &self.is_active_field_visible)
            .field("logging", &self.logging)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (may be empty)
    pub level: String,

    /// Directory for the log file; `None` logs to stdout only
    pub log_dir: Option<PathBuf>,
}

fn str_at<'a>(value: &'a toml::Value, section: &str, key: &str) -> Option<&'a str> {
    value
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_str())
}

fn bool_at(value: &toml::Value, section: &str, key: &str) -> Option<bool> {
    value
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_bool())
}

impl WidgetConfig {
    /// Create WidgetConfig from a TOML value.
    ///
    /// Missing strings become empty. `should_show_switch_user` is shown unless
    /// explicitly disabled and the active key field is hidden unless enabled,
    /// matching the widget's component defaults.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            encryption_key: str_at(toml_value, "security", "encryption_key")
                .unwrap_or("")
                .to_string(),
            session_dir: PathBuf::from(str_at(toml_value, "storage", "session_dir").unwrap_or("")),
            should_show_switch_user: bool_at(toml_value, "ui", "should_show_switch_user")
                .unwrap_or(true),
            is_active_field_visible: bool_at(toml_value, "ui", "is_active_field_visible")
                .unwrap_or(false),
            logging: LoggingConfig {
                level: str_at(toml_value, "logging", "level")
                    .unwrap_or("")
                    .to_string(),
                log_dir: str_at(toml_value, "logging", "log_dir").map(PathBuf::from),
            },
        })
    }

    /// Create WidgetConfig with all paths under `data_dir`.
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            encryption_key: String::new(),
            session_dir: data_dir.join("session"),
            should_show_switch_user: true,
            is_active_field_visible: false,
            logging: LoggingConfig {
                level: String::new(),
                log_dir: Some(data_dir.join("logs")),
            },
        }
    }
}
