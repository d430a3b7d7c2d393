//! Fan-out example
//!
//! Publishes every message to an in-process consumer thread while only
//! warnings and above reach the console.
//!
//! Run with: cargo run --example channel_publisher

use std::thread;
use uatu_logger::prelude::*;

fn main() {
    println!("=== Uatu Logger - Channel Publisher Example ===\n");

    let (publisher, receiver) = ChannelPublisher::bounded(64);

    let consumer = thread::spawn(move || {
        let mut received = 0;
        for payload in receiver {
            match Message::from_slice(&payload) {
                Ok(message) => {
                    received += 1;
                    println!("   consumer got {} '{}'", message.level, message.text);
                }
                Err(e) => eprintln!("   consumer could not decode payload: {}", e),
            }
        }
        received
    });

    let logger = Logger::builder()
        .service_name("fan-out")
        .min_level(LogLevel::Warning)
        .publisher(publisher)
        .build();

    logger.debug("cache warmed");
    logger.print("listening on :8080");
    logger.warn("slow request: 1.2s");

    // Dropping the logger drops its publisher and closes the channel
    drop(logger);

    let received = consumer.join().expect("consumer thread panicked");
    println!("\n=== Consumer received {} messages ===", received);
}
