//! Logger settings and the key/value sources they are read from

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use std::collections::HashMap;

pub const KEY_SERVICE_NAME: &str = "LOG_SERVICE_NAME";
pub const KEY_LEVEL: &str = "LOG_LEVEL";
pub const KEY_CONSOLE: &str = "LOG_CONSOLE";
pub const KEY_COLORS: &str = "LOG_COLORS";
pub const KEY_USE_TCP: &str = "LOG_USE_TCP";
pub const KEY_TCP_ADDRESS: &str = "LOG_TCP_ADDRESS";

pub const DEFAULT_TCP_ADDRESS: &str = "logger:8082";

/// A provider of string configuration values
pub trait SettingsSource {
    /// Value for `key`, or `fallback` when unset
    fn get(&self, key: &str, fallback: &str) -> String;

    /// Boolean value for `key`; unset or unparsable values yield `fallback`
    fn get_bool(&self, key: &str, fallback: bool) -> bool {
        parse_bool(&self.get(key, "")).unwrap_or(fallback)
    }
}

/// Reads settings from process environment variables
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl SettingsSource for EnvSettings {
    fn get(&self, key: &str, fallback: &str) -> String {
        std::env::var(key).unwrap_or_else(|_| fallback.to_string())
    }
}

/// In-memory settings, handy for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MapSettings {
    values: HashMap<String, String>,
}

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl SettingsSource for MapSettings {
    fn get(&self, key: &str, fallback: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Core logger settings. Owned by a single logger and fixed once it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_name: String,
    pub min_log_level: LogLevel,
    pub log_to_console: bool,
    /// Colorize the `[Level]` tag on the console
    pub colors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            min_log_level: LogLevel::Info,
            log_to_console: true,
            colors: false,
        }
    }
}

impl Settings {
    pub fn from_source(source: &dyn SettingsSource) -> Self {
        let min_log_level = parse_level(&source.get(KEY_LEVEL, LogLevel::Info.text()))
            .unwrap_or_else(|e| {
                eprintln!("[LOGGER ERROR] {}", e);
                LogLevel::Info
            });

        Self {
            service_name: source.get(KEY_SERVICE_NAME, ""),
            min_log_level,
            log_to_console: source.get_bool(KEY_CONSOLE, true),
            colors: source.get_bool(KEY_COLORS, false),
        }
    }
}

/// Strict form of [`LogLevel::resolve`] for configuration values.
pub fn parse_level(raw: &str) -> Result<LogLevel> {
    raw.parse().map_err(|e: String| LoggerError::config(KEY_LEVEL, e))
}

/// Settings for the TCP publisher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpSettings {
    pub address: String,
}

impl Default for TcpSettings {
    fn default() -> Self {
        Self {
            address: DEFAULT_TCP_ADDRESS.to_string(),
        }
    }
}

impl TcpSettings {
    pub fn from_source(source: &dyn SettingsSource) -> Self {
        Self {
            address: source.get(KEY_TCP_ADDRESS, DEFAULT_TCP_ADDRESS),
        }
    }
}

/// Best-effort host name of this machine; empty when it cannot be found.
pub fn resolve_hostname() -> String {
    for var in ["HOSTNAME", "COMPUTERNAME"] {
        if let Ok(name) = std::env::var(var) {
            if !name.trim().is_empty() {
                return name.trim().to_string();
            }
        }
    }

    std::fs::read_to_string("/etc/hostname")
        .map(|name| name.trim().to_string())
        .unwrap_or_default()
}
