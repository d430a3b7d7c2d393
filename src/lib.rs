//! # Uatu Logger
//!
//! A structured logging facade: messages are filtered by severity for the
//! console, rendered as one human-readable line, and a JSON copy of every
//! message is fanned out to any number of remote publishers.
//!
//! ## Features
//!
//! - **Severity levels**: Debug, Info, Warning, Error and Fatal
//! - **Error enrichment**: errors and their stack traces folded into messages
//! - **Publishers**: pluggable remote sinks, failures isolated per publisher
//! - **Stream adapter**: an `io::Write` sink bound to a level

pub mod core;
pub mod macros;
pub mod publishers;

pub mod prelude {
    pub use crate::core::{
        ErrorTrace, LogLevel, LogWriter, Logger, LoggerBuilder, LoggerError, Message, Publisher,
        Result, Settings, SettingsSource, TracedError,
    };
    pub use crate::publishers::{ChannelPublisher, TcpPublisher};
}

pub use crate::core::{
    capture_stack, enrich, resolve_hostname, DispatchMetrics, EnvSettings, ErrorTrace, LogLevel,
    LogWriter, Logger, LoggerBuilder, LoggerError, MapSettings, Message, Publisher, Result,
    Settings, SettingsSource, TcpSettings, TracedError,
};
pub use publishers::{ChannelPublisher, TcpPublisher};
