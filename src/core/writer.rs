//! `std::io::Write` adapter bound to a fixed level

use super::{log_level::LogLevel, logger::Logger};
use std::fmt;
use std::io::{self, Write};

/// Byte sink that turns every write into one log message.
///
/// Writes never fail: logging problems are handled by the logger and are
/// not surfaced to the code doing the writing.
///
/// ```
/// use std::io::Write;
/// use uatu_logger::prelude::*;
///
/// let logger = Logger::builder().log_to_console(false).build();
/// let mut out = logger.writer(LogLevel::Warning);
///
/// write!(out, "{} retries left", 2).unwrap();
/// assert_eq!(logger.metrics().dispatched(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogWriter<'a> {
    logger: &'a Logger,
    level: LogLevel,
}

impl<'a> LogWriter<'a> {
    pub fn new(logger: &'a Logger, level: LogLevel) -> Self {
        Self { logger, level }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }
}

impl Write for LogWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.logger.log(self.level, String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    // One message per `write!`, not one per formatted fragment.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.logger.log(self.level, fmt::format(args));
        Ok(())
    }
}
