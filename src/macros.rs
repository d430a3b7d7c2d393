//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use uatu_logger::prelude::*;
//! use uatu_logger::{error, info};
//!
//! let logger = Logger::builder().service_name("api").build();
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
//! error!(logger, Some(&err), "Could not bind port {}", port);
//! ```

/// Log a message at an arbitrary level.
///
/// ```
/// # use uatu_logger::prelude::*;
/// # let logger = Logger::new();
/// use uatu_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Warning, "Queue depth: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message with an optional error value.
///
/// ```
/// # use uatu_logger::prelude::*;
/// # let logger = Logger::new();
/// use uatu_logger::error;
/// error!(logger, None, "Failed to connect to database");
///
/// let err = TracedError::new("connection refused");
/// error!(logger, Some(&err), "Retry {} of {}", 3, 3);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $err:expr, $($arg:tt)+) => {
        $logger.errorf($err, format_args!($($arg)+))
    };
}

/// Log a fatal-level message, then panic.
///
/// ```should_panic
/// # use uatu_logger::prelude::*;
/// # let logger = Logger::new();
/// use uatu_logger::fatal;
/// fatal!(logger, None, "Unable to recover: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $err:expr, $($arg:tt)+) => {
        $logger.fatalf($err, format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger, Message};
    use crate::publishers::ChannelPublisher;

    fn logger_with_queue() -> (Logger, crossbeam_channel::Receiver<Vec<u8>>) {
        let (publisher, receiver) = ChannelPublisher::bounded(8);
        let logger = Logger::builder()
            .log_to_console(false)
            .publisher(publisher)
            .build();
        (logger, receiver)
    }

    fn next(receiver: &crossbeam_channel::Receiver<Vec<u8>>) -> Message {
        Message::from_slice(&receiver.recv().unwrap()).unwrap()
    }

    #[test]
    fn test_log_macro() {
        let (logger, receiver) = logger_with_queue();
        log!(logger, LogLevel::Warning, "Formatted: {}", 42);

        let message = next(&receiver);
        assert_eq!(message.level, LogLevel::Warning);
        assert_eq!(message.text, "Formatted: 42");
    }

    #[test]
    fn test_level_macros() {
        let (logger, receiver) = logger_with_queue();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);

        assert_eq!(next(&receiver).level, LogLevel::Debug);
        assert_eq!(next(&receiver).level, LogLevel::Info);
        assert_eq!(next(&receiver).text, "Retry 1 of 3");
    }

    #[test]
    fn test_error_macro() {
        let (logger, receiver) = logger_with_queue();
        error!(logger, None, "Code: {}", 500);

        let err = String::from("boom");
        error!(logger, Some(&err), "Code: {}", 501);

        let plain = next(&receiver);
        assert_eq!(plain.level, LogLevel::Error);
        assert_eq!(plain.text, "Code: 500");

        let enriched = next(&receiver);
        assert!(enriched.text.starts_with("Code: 501\nError: boom\n"));
    }

    #[test]
    #[should_panic(expected = "Critical failure: system")]
    fn test_fatal_macro() {
        let logger = Logger::builder().log_to_console(false).build();
        fatal!(logger, None, "Critical failure: {}", "system");
    }
}
