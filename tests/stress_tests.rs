//! Concurrency tests for a logger shared across threads
//!
//! These tests verify:
//! - Every message from every thread is offered to the publishers
//! - Console lines are never torn or merged
//! - Per-thread ordering is preserved on a single publisher

use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use uatu_logger::prelude::*;

#[derive(Clone, Default)]
struct Console(Arc<Mutex<Vec<u8>>>);

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

const THREADS: usize = 8;
const PER_THREAD: usize = 200;

#[test]
fn test_concurrent_fan_out_delivers_everything() {
    let (publisher, receiver) = ChannelPublisher::bounded(THREADS * PER_THREAD);
    let logger = Arc::new(
        Logger::builder()
            .log_to_console(false)
            .publisher(publisher)
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.print(format!("{}:{}", thread_id, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let mut last_seen: HashMap<usize, usize> = HashMap::new();
    let mut total = 0;
    while let Ok(payload) = receiver.try_recv() {
        let message = Message::from_slice(&payload).unwrap();
        let (thread_id, seq) = message.text.split_once(':').unwrap();
        let thread_id: usize = thread_id.parse().unwrap();
        let seq: usize = seq.parse().unwrap();

        if let Some(prev) = last_seen.insert(thread_id, seq) {
            assert!(seq > prev, "thread {} out of order: {} after {}", thread_id, seq, prev);
        }
        total += 1;
    }

    assert_eq!(total, THREADS * PER_THREAD);
    assert_eq!(logger.metrics().published(), (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_concurrent_console_lines_stay_whole() {
    let console = Console::default();
    let logger = Arc::new(
        Logger::builder()
            .service_name("svc")
            .console_writer(console.clone())
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.warn(format!("thread {} message {}", thread_id, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let out = String::from_utf8(console.0.lock().clone()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    for line in lines {
        assert!(line.starts_with("[Warning] "), "torn line: {:?}", line);
        assert!(line.contains(" svc - thread "), "torn line: {:?}", line);
    }
}
