//! Main logger implementation

use super::{
    log_level::LogLevel,
    message::Message,
    metrics::DispatchMetrics,
    publisher::Publisher,
    settings::{resolve_hostname, Settings, SettingsSource, TcpSettings, KEY_USE_TCP},
    stack_trace::{enrich, ErrorTrace},
    writer::LogWriter,
};
use crate::publishers::TcpPublisher;
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Builds, prints and fans out log messages.
///
/// Settings and publishers are fixed once the logger is built, so a logger
/// can be shared across threads behind an `Arc` without further locking.
/// Every call runs to completion on the calling thread: the console line is
/// written first, then each publisher is tried in the order it was added.
///
/// The minimum level only gates the console. Publishers receive every
/// message so that the remote side can apply its own filtering.
pub struct Logger {
    settings: Settings,
    hostname: String,
    publishers: Vec<Arc<dyn Publisher>>,
    console: Mutex<Box<dyn Write + Send>>,
    metrics: DispatchMetrics,
}

impl Logger {
    /// Console-only logger with default settings
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Build a logger from a key/value settings source.
    ///
    /// Reads the core settings and connects the TCP publisher when
    /// `LOG_USE_TCP` is set. A publisher that cannot be set up is reported
    /// on stderr and left out.
    pub fn from_source(source: &dyn SettingsSource) -> Self {
        let mut builder = LoggerBuilder::new().settings(Settings::from_source(source));

        if source.get_bool(KEY_USE_TCP, false) {
            let tcp = TcpSettings::from_source(source);
            match TcpPublisher::connect(&tcp.address) {
                Ok(publisher) => builder = builder.publisher(publisher),
                Err(e) => eprintln!(
                    "[LOGGER ERROR] Unable to set up TCP publisher for {}: {}",
                    tcp.address, e
                ),
            }
        }

        builder.build()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn publisher_count(&self) -> usize {
        self.publishers.len()
    }

    /// Dispatch counters for this logger
    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Log `text` at an arbitrary level
    pub fn log(&self, level: LogLevel, text: impl Into<String>) {
        self.dispatch(text.into(), level);
    }

    #[inline]
    pub fn debug(&self, text: impl Into<String>) {
        self.log(LogLevel::Debug, text);
    }

    #[inline]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, fmt::format(args));
    }

    /// Log at `Info`
    #[inline]
    pub fn print(&self, text: impl Into<String>) {
        self.log(LogLevel::Info, text);
    }

    #[inline]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, fmt::format(args));
    }

    #[inline]
    pub fn info(&self, text: impl Into<String>) {
        self.print(text);
    }

    #[inline]
    pub fn warn(&self, text: impl Into<String>) {
        self.log(LogLevel::Warning, text);
    }

    #[inline]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warning, fmt::format(args));
    }

    /// Log at `Error`, folding `err` and its stack into the text
    pub fn error(&self, err: Option<&dyn ErrorTrace>, text: impl Into<String>) {
        self.dispatch_error(err, &text.into(), LogLevel::Error);
    }

    pub fn errorf(&self, err: Option<&dyn ErrorTrace>, args: fmt::Arguments<'_>) {
        self.dispatch_error(err, &fmt::format(args), LogLevel::Error);
    }

    /// Log at `Fatal`, then panic with `text`.
    ///
    /// The message is printed and offered to every publisher before the
    /// panic is raised.
    pub fn fatal(&self, err: Option<&dyn ErrorTrace>, text: impl Into<String>) -> ! {
        let text = text.into();
        self.dispatch_error(err, &text, LogLevel::Fatal);
        panic!("{}", text);
    }

    pub fn fatalf(&self, err: Option<&dyn ErrorTrace>, args: fmt::Arguments<'_>) -> ! {
        self.fatal(err, fmt::format(args))
    }

    /// A byte sink that logs everything written to it at `level`
    pub fn writer(&self, level: LogLevel) -> LogWriter<'_> {
        LogWriter::new(self, level)
    }

    fn dispatch_error(&self, err: Option<&dyn ErrorTrace>, text: &str, level: LogLevel) {
        self.dispatch(enrich(err, text), level);
    }

    fn dispatch(&self, text: String, level: LogLevel) {
        let message = Message::new(text, level, &self.settings.service_name, &self.hostname);
        self.metrics.record_dispatched();

        if level.passes(self.settings.min_log_level) && self.settings.log_to_console {
            self.write_console(&message);
        }

        if self.publishers.is_empty() {
            return;
        }

        let payload = match message.to_bytes() {
            Ok(payload) => payload,
            Err(e) => {
                self.metrics.record_serialization_failed();
                eprintln!("[LOGGER ERROR] Unable to serialize log message: {}", e);
                return;
            }
        };

        self.fan_out(&message, &payload);
    }

    fn write_console(&self, message: &Message) {
        let line = self.render_console(message);
        let mut console = self.console.lock();

        // Multi-line stack traces already end in a newline.
        let written = if line.ends_with('\n') {
            console.write_all(line.as_bytes())
        } else {
            writeln!(console, "{}", line)
        };

        match written.and_then(|()| console.flush()) {
            Ok(()) => {
                self.metrics.record_console_line();
            }
            Err(e) => eprintln!("[LOGGER ERROR] Console write failed: {}", e),
        }
    }

    #[cfg(feature = "console")]
    fn render_console(&self, message: &Message) -> String {
        use colored::Colorize;

        let line = message.render();
        if !self.settings.colors {
            return line;
        }

        let tag = format!("[{}]", message.level.text());
        format!(
            "{}{}",
            tag.color(message.level.color_code()),
            &line[tag.len()..]
        )
    }

    #[cfg(not(feature = "console"))]
    fn render_console(&self, message: &Message) -> String {
        message.render()
    }

    /// Offer the payload to each publisher in turn.
    ///
    /// A publisher that errors or panics is reported and skipped; the rest
    /// still receive the message.
    fn fan_out(&self, message: &Message, payload: &[u8]) {
        for (idx, publisher) in self.publishers.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                publisher.publish(payload)
            }));

            match result {
                Ok(Ok(())) => {
                    self.metrics.record_published();
                }
                Ok(Err(e)) => {
                    self.metrics.record_publish_failed();
                    eprintln!(
                        "[LOGGER ERROR] Unable to send log to publisher #{} '{}' ({}): {}",
                        idx,
                        publisher.name(),
                        e,
                        message.render()
                    );
                }
                Err(panic_info) => {
                    self.metrics.record_publish_failed();
                    eprintln!(
                        "[LOGGER CRITICAL] Publisher #{} '{}' panicked ({}): {}",
                        idx,
                        publisher.name(),
                        panic_message(&*panic_info),
                        message.render()
                    );
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("settings", &self.settings)
            .field("hostname", &self.hostname)
            .field(
                "publishers",
                &self.publishers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use uatu_logger::prelude::*;
///
/// let (publisher, receiver) = ChannelPublisher::bounded(16);
///
/// let logger = Logger::builder()
///     .service_name("billing")
///     .min_level(LogLevel::Warning)
///     .hostname("h1")
///     .publisher(publisher)
///     .build();
///
/// logger.debug("tick");
/// let message = Message::from_slice(&receiver.recv().unwrap()).unwrap();
/// assert_eq!(message.text, "tick");
/// ```
pub struct LoggerBuilder {
    settings: Settings,
    hostname: Option<String>,
    publishers: Vec<Arc<dyn Publisher>>,
    console: Option<Box<dyn Write + Send>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            hostname: None,
            publishers: Vec::new(),
            console: None,
        }
    }

    /// Replace all core settings at once
    #[must_use = "builder methods return a new value"]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.settings.service_name = name.into();
        self
    }

    /// Set minimum console level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.settings.min_log_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_to_console(mut self, enabled: bool) -> Self {
        self.settings.log_to_console = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.settings.colors = enabled;
        self
    }

    /// Override the host name stamped on every message
    #[must_use = "builder methods return a new value"]
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Add a publisher owned by this logger
    #[must_use = "builder methods return a new value"]
    pub fn publisher<P: Publisher + 'static>(mut self, publisher: P) -> Self {
        self.publishers.push(Arc::new(publisher));
        self
    }

    /// Add a publisher that is shared with other owners
    #[must_use = "builder methods return a new value"]
    pub fn shared_publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publishers.push(publisher);
        self
    }

    /// Send console lines somewhere other than stdout
    #[must_use = "builder methods return a new value"]
    pub fn console_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.console = Some(Box::new(writer));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            settings: self.settings,
            hostname: self.hostname.unwrap_or_else(resolve_hostname),
            publishers: self.publishers,
            console: Mutex::new(
                self.console
                    .unwrap_or_else(|| Box::new(io::stdout()) as Box<dyn Write + Send>),
            ),
            metrics: DispatchMetrics::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
