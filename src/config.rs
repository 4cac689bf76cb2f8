//! Configuration file support for the color flipper.
//!
//! Preferences are read once at startup: from a JSON file in the user's
//! config directory on native builds, from localStorage in the browser.
//! Engine state (current color, lock, history) is never persisted.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::constants::{
    DEFAULT_COLOR, DEFAULT_COPY_FEEDBACK_MS, DEFAULT_HISTORY_LIMIT, DEFAULT_SHADE_RANGE,
    MAX_HISTORY_LIMIT,
};
use crate::history::HistoryConfig;
use crate::keybindings::KeyBindings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Convert to log crate's Level, for loggers that take a max level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Keybinding configuration
    #[serde(default)]
    pub keybindings: KeyBindings,
}

fn default_app_name() -> String {
    "Color Flipper".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Color shown at startup, as `#RRGGBB`
    #[serde(default = "default_initial_color")]
    pub initial_color: String,

    /// Number of swatches kept in the history strip, 1 to 8
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Shade factors are drawn from `[-shade_range, shade_range)`
    #[serde(default = "default_shade_range")]
    pub shade_range: u8,

    /// How long the copy button shows its result, in milliseconds
    #[serde(default = "default_copy_feedback_ms")]
    pub copy_feedback_ms: u64,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_initial_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_shade_range() -> u8 {
    DEFAULT_SHADE_RANGE
}

fn default_copy_feedback_ms() -> u64 {
    DEFAULT_COPY_FEEDBACK_MS
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            initial_color: default_initial_color(),
            history_limit: default_history_limit(),
            shade_range: default_shade_range(),
            copy_feedback_ms: default_copy_feedback_ms(),
            log_level: LogLevel::default(),
        }
    }
}

impl UserPreferences {
    /// The configured start color, or the built-in default if it does not parse.
    pub fn initial_color(&self) -> Rgb {
        match Rgb::from_hex(&self.initial_color) {
            Ok(color) => color,
            Err(e) => {
                log::warn!("{}; starting with {}", e, DEFAULT_COLOR);
                Rgb::new(0x00, 0x7B, 0xFF)
            }
        }
    }

    /// History bound, capped so every slot has a digit key.
    pub fn history_config(&self) -> HistoryConfig {
        if self.history_limit > MAX_HISTORY_LIMIT {
            log::warn!(
                "history_limit {} exceeds {}, capping",
                self.history_limit,
                MAX_HISTORY_LIMIT
            );
        }
        HistoryConfig {
            max_entries: self.history_limit.min(MAX_HISTORY_LIMIT),
        }
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
            keybindings: KeyBindings::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default config filename.
    pub fn default_filename() -> &'static str {
        "color-flipper.json"
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("color-flipper").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("color-flipper")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load configuration from `path` if the file exists.
    ///
    /// A missing file is `Ok(None)`; an unreadable, malformed or too-new file
    /// is an error so the caller can report it once logging is up.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_if_present(path: &std::path::Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from_path(path).map(Some)
    }

    /// Load configuration from the default path, if there is one.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Result<Option<Self>, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_if_present(&path),
            None => Ok(None),
        }
    }

    /// LocalStorage key for WASM config.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "color-flipper-config";

    /// Load configuration from localStorage (WASM only).
    ///
    /// `Ok(None)` when storage is unavailable or holds no config.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Result<Option<Self>, ConfigError> {
        let Some(window) = web_sys::window() else {
            return Ok(None);
        };
        let storage = window
            .local_storage()
            .map_err(|e| ConfigError::Storage(format!("{:?}", e)))?;
        let Some(storage) = storage else {
            return Ok(None);
        };

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => Self::from_json(&json).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(ConfigError::Storage(format!("{:?}", e))),
        }
    }

    /// Settle a load result into the config to run with.
    ///
    /// Call after the logger is installed: a failed load is logged and
    /// replaced by defaults.
    pub fn resolve_loaded(loaded: Result<Option<Self>, ConfigError>, source: &str) -> Self {
        match loaded {
            Ok(Some(config)) => {
                log::info!("Loaded configuration from {}", source);
                config
            }
            Ok(None) => {
                log::debug!("No configuration at {}, using defaults", source);
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load configuration from {}: {}", source, e);
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Browser storage could not be read
    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.preferences.initial_color(), Rgb::new(0, 123, 255));
        assert_eq!(config.preferences.history_config().max_entries, 8);
        assert_eq!(config.preferences.shade_range, 30);
        assert_eq!(config.preferences.copy_feedback(), Duration::from_millis(1200));
        assert_eq!(config.preferences.log_level, LogLevel::Info);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = AppConfig::new();
        config.preferences.initial_color = "#FF8800".to_string();
        config.preferences.log_level = LogLevel::Debug;
        config.keybindings.generate = 'n';

        let json = config.to_json().unwrap();
        let loaded = AppConfig::from_json(&json).unwrap();
        assert_eq!(loaded.preferences.initial_color(), Rgb::new(255, 136, 0));
        assert_eq!(loaded.preferences.log_level, LogLevel::Debug);
        assert_eq!(loaded.keybindings.generate, 'n');
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "version": 1, "preferences": { "history_limit": 4, "log_level": "warn" } }"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.app_name, "Color Flipper");
        assert_eq!(config.preferences.history_limit, 4);
        assert_eq!(config.preferences.shade_range, 30);
        assert_eq!(
            config.preferences.log_level.to_level_filter(),
            log::LevelFilter::Warn
        );
        assert_eq!(config.keybindings, KeyBindings::default());
    }

    #[test]
    fn test_version_too_new() {
        let json = r#"{ "version": 99 }"#;
        let err = AppConfig::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_invalid_initial_color_falls_back() {
        let prefs = UserPreferences {
            initial_color: "not a color".to_string(),
            ..UserPreferences::default()
        };
        assert_eq!(prefs.initial_color(), Rgb::new(0, 123, 255));
    }

    #[test]
    fn test_history_limit_is_capped() {
        let prefs = UserPreferences {
            history_limit: 20,
            ..UserPreferences::default()
        };
        assert_eq!(prefs.history_config().max_entries, MAX_HISTORY_LIMIT);

        let prefs = UserPreferences {
            history_limit: 3,
            ..UserPreferences::default()
        };
        assert_eq!(prefs.history_config().max_entries, 3);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            AppConfig::from_json("{"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn scratch_path(name: &str) -> std::path::PathBuf {
        let file = format!("color-flipper-{}-{}.json", name, std::process::id());
        std::env::temp_dir().join(file)
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_load_if_present_missing_file() {
        let path = scratch_path("missing");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(AppConfig::load_if_present(&path), Ok(None)));
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_load_if_present_reports_newer_version() {
        let path = scratch_path("too-new");
        std::fs::write(&path, r#"{ "version": 99 }"#).unwrap();
        let loaded = AppConfig::load_if_present(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            loaded,
            Err(ConfigError::VersionTooNew {
                file_version: 99,
                ..
            })
        ));

        let config = AppConfig::resolve_loaded(loaded, "test file");
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.preferences.initial_color, DEFAULT_COLOR);
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_load_if_present_reads_file() {
        let path = scratch_path("valid");
        let json = r#"{ "version": 1, "preferences": { "shade_range": 12 } }"#;
        std::fs::write(&path, json).unwrap();
        let loaded = AppConfig::load_if_present(&path);
        std::fs::remove_file(&path).unwrap();

        let config = AppConfig::resolve_loaded(loaded, "test file");
        assert_eq!(config.preferences.shade_range, 12);
    }
}
