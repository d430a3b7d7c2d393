//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log message.
///
/// Ranks are strictly increasing in declaration order and are the only
/// thing compared when filtering. On the wire a level is a nested object
/// `{"text": "Warning", "severity": 2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(Serialize, Deserialize)]
#[serde(into = "LevelRepr", try_from = "LevelRepr")]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warning = 2,
    Error = 3,
    Fatal = 4,
}

impl LogLevel {
    /// All levels in ascending severity
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn text(&self) -> &'static str {
        match self {
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
        }
    }

    #[inline]
    pub fn severity(&self) -> i32 {
        *self as i32
    }

    /// Look a level up by name, falling back to `Info` when unrecognized.
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or(LogLevel::Info)
    }

    /// Look a level up by its numeric rank
    pub fn from_severity(severity: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.severity() == severity)
    }

    /// Whether a message at this level passes a `min` threshold
    #[inline]
    pub fn passes(&self, min: LogLevel) -> bool {
        self.severity() >= min.severity()
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Wire shape of a level. Older senders capitalize the keys.
#[derive(Debug, Serialize, Deserialize)]
struct LevelRepr {
    #[serde(alias = "Text")]
    text: String,
    #[serde(alias = "Severity")]
    severity: i32,
}

impl From<LogLevel> for LevelRepr {
    fn from(level: LogLevel) -> Self {
        LevelRepr {
            text: level.text().to_string(),
            severity: level.severity(),
        }
    }
}

impl TryFrom<LevelRepr> for LogLevel {
    type Error = String;

    fn try_from(repr: LevelRepr) -> Result<Self, String> {
        match LogLevel::from_severity(repr.severity) {
            Some(level) if level.text() == repr.text => Ok(level),
            _ => Err(format!(
                "unknown level {{text: {:?}, severity: {}}}",
                repr.text, repr.severity
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_strictly_increasing() {
        for pair in LogLevel::ALL.windows(2) {
            assert!(pair[0].severity() < pair[1].severity());
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(LogLevel::Debug.severity(), 0);
        assert_eq!(LogLevel::Fatal.severity(), 4);
    }

    #[test]
    fn test_resolve_known_names() {
        assert_eq!(LogLevel::resolve("Debug"), LogLevel::Debug);
        assert_eq!(LogLevel::resolve("Warning"), LogLevel::Warning);
        assert_eq!(LogLevel::resolve("Fatal"), LogLevel::Fatal);
        assert_eq!(LogLevel::resolve("error"), LogLevel::Error);
    }

    #[test]
    fn test_resolve_falls_back_to_info() {
        assert_eq!(LogLevel::resolve(""), LogLevel::Info);
        assert_eq!(LogLevel::resolve("verbose"), LogLevel::Info);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_passes() {
        assert!(LogLevel::Warning.passes(LogLevel::Warning));
        assert!(LogLevel::Error.passes(LogLevel::Warning));
        assert!(!LogLevel::Debug.passes(LogLevel::Info));
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_string(&LogLevel::Warning).unwrap();
        assert_eq!(json, r#"{"text":"Warning","severity":2}"#);

        let level: LogLevel = serde_json::from_str(r#"{"Text":"Error","Severity":3}"#).unwrap();
        assert_eq!(level, LogLevel::Error);
    }

    #[test]
    fn test_wire_rejects_mismatched_pair() {
        let result: Result<LogLevel, _> = serde_json::from_str(r#"{"text":"Error","severity":1}"#);
        assert!(result.is_err());
    }
}
