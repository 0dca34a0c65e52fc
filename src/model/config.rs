use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from `config.toml` in the data directory. Every section is
/// optional; a missing file means all defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level for the debug log file ("off" disables logging entirely).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "off".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides, keyed by theme slot name (e.g. `highlight = "#FB4196"`).
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Show the key-hint line in the status row.
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            colors: HashMap::new(),
            show_key_hints: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.log.level, "off");
        assert!(config.ui.colors.is_empty());
        assert!(config.ui.show_key_hints);
    }

    #[test]
    fn sections_parse_independently() {
        let config: Config = toml::from_str(
            r##"
[log]
level = "debug"

[ui]
show_key_hints = false

[ui.colors]
highlight = "#FF00AA"
"##,
        )
        .unwrap();
        assert_eq!(config.log.level, "debug");
        assert!(!config.ui.show_key_hints);
        assert_eq!(config.ui.colors["highlight"], "#FF00AA");
    }
}
