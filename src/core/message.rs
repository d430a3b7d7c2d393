//! Message envelope handed to the console and to every publisher

use super::log_level::LogLevel;
use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Console timestamp layout: `2024-03-01 14:05:09 +01:00` for the local
/// zone, `2024-03-01 14:05:09 UTC` when rendered in `Utc`
pub const CONSOLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// One log message.
///
/// Built fresh for every log call and never mutated afterwards. The JSON
/// form keeps the field names remote sinks expect:
///
/// ```
/// use uatu_logger::{LogLevel, Message};
///
/// let message = Message::at("disk low", LogLevel::Warning, "svc", "h1", 1_700_000_000_000);
/// let json = message.to_json().unwrap();
/// assert_eq!(
///     json,
///     r#"{"text":"disk low","level":{"text":"Warning","severity":2},"serviceName":"svc","time":1700000000000,"hostname":"h1"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub text: String,
    pub level: LogLevel,
    pub service_name: String,
    /// Milliseconds since the Unix epoch
    pub time: i64,
    pub hostname: String,
}

impl Message {
    /// Build a message stamped with the current wall-clock time
    pub fn new(
        text: impl Into<String>,
        level: LogLevel,
        service_name: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self::at(
            text,
            level,
            service_name,
            hostname,
            Utc::now().timestamp_millis(),
        )
    }

    /// Build a message with an explicit timestamp
    pub fn at(
        text: impl Into<String>,
        level: LogLevel,
        service_name: impl Into<String>,
        hostname: impl Into<String>,
        time: i64,
    ) -> Self {
        Self {
            text: text.into(),
            level,
            service_name: service_name.into(),
            time,
            hostname: hostname.into(),
        }
    }

    /// Render the console line using the local time zone
    pub fn render(&self) -> String {
        self.render_in(&Local)
    }

    /// Render the console line in an arbitrary time zone
    pub fn render_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format!(
            "[{}] {} {} - {}",
            self.level.text(),
            self.format_time(tz),
            self.service_name,
            self.text
        )
    }

    /// Console timestamp, truncated to whole seconds
    fn format_time<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match tz.timestamp_opt(self.time.div_euclid(1000), 0).single() {
            Some(dt) => dt.format(CONSOLE_TIME_FORMAT).to_string(),
            None => self.time.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
