//! Basic logger usage example
//!
//! Demonstrates console logging at different levels, error enrichment and
//! the stream adapter.
//!
//! Run with: cargo run --example basic_usage

use std::io::Write;
use uatu_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Uatu Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .service_name("basic-usage")
        .min_level(LogLevel::Debug)
        .colors(true)
        .build();

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.print("This is an info message");
    logger.warnf(format_args!("Disk {}% full", 91));
    logger.error(None, "This is an error message without an error value");

    println!("\n2. Errors with stack traces:");
    let err = TracedError::new("connection refused");
    logger.error(Some(&err), "Unable to reach the database");

    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
    logger.errorf(Some(&io_err), format_args!("Loading {}", "settings"));

    println!("\n3. Writing through an io::Write adapter:");
    let mut out = logger.writer(LogLevel::Warning);
    writeln!(out, "child process exited with status {}", 3)?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
