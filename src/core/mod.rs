//! Core logger types and traits

pub mod error;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod publisher;
pub mod settings;
pub mod stack_trace;
pub mod writer;

pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use message::Message;
pub use metrics::DispatchMetrics;
pub use publisher::Publisher;
pub use settings::{resolve_hostname, EnvSettings, MapSettings, Settings, SettingsSource, TcpSettings};
pub use stack_trace::{capture_stack, enrich, ErrorTrace, TracedError};
pub use writer::LogWriter;
