//! TCP publisher for remote logging
//!
//! Sends each serialized message as one line of newline-delimited JSON.
//! Useful for centralized logging in distributed systems.

use crate::core::{LoggerError, Publisher, Result};
use parking_lot::Mutex;
use std::io::Write;
use std::net::TcpStream;
use std::time::Duration;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Publisher that streams messages to a remote TCP collector
///
/// # Example
///
/// ```no_run
/// use uatu_logger::prelude::*;
///
/// let publisher = TcpPublisher::connect("127.0.0.1:8082")
///     .expect("Failed to connect to log collector");
///
/// let logger = Logger::builder()
///     .service_name("billing")
///     .publisher(publisher)
///     .build();
/// logger.print("This log will be sent to 127.0.0.1:8082");
/// ```
pub struct TcpPublisher {
    stream: Mutex<Option<TcpStream>>,
    address: String,
    reconnect_on_error: bool,
}

impl TcpPublisher {
    /// Connect to a collector
    ///
    /// # Arguments
    ///
    /// * `address` - Socket address (e.g., "localhost:8082", "192.168.1.1:9000")
    ///
    /// # Errors
    ///
    /// Returns error if connection fails
    pub fn connect(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        let stream = open_stream(&address)?;

        Ok(Self {
            stream: Mutex::new(Some(stream)),
            address,
            reconnect_on_error: true,
        })
    }

    /// Enable or disable reconnect-and-resend after a failed write
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_connected(&self) -> bool {
        self.stream.lock().is_some()
    }
}

fn open_stream(address: &str) -> Result<TcpStream> {
    let stream = TcpStream::connect(address)?;

    // Set timeouts to prevent hanging
    stream.set_write_timeout(Some(IO_TIMEOUT))?;
    stream.set_read_timeout(Some(IO_TIMEOUT))?;

    // Enable TCP_NODELAY for low-latency logging
    stream.set_nodelay(true)?;

    Ok(stream)
}

fn frame(payload: &[u8]) -> Vec<u8> {
    let mut line = Vec::with_capacity(payload.len() + 1);
    line.extend_from_slice(payload);
    line.push(b'\n');
    line
}

impl Publisher for TcpPublisher {
    fn publish(&self, payload: &[u8]) -> Result<()> {
        let line = frame(payload);
        let mut guard = self.stream.lock();

        if guard.is_none() {
            if !self.reconnect_on_error {
                return Err(LoggerError::not_connected(&self.address));
            }
            *guard = Some(open_stream(&self.address)?);
        }

        let result = match guard.as_mut() {
            Some(stream) => stream.write_all(&line),
            None => return Err(LoggerError::not_connected(&self.address)),
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                // Connection lost
                *guard = None;

                if !self.reconnect_on_error {
                    return Err(e.into());
                }

                match open_stream(&self.address) {
                    Ok(mut stream) => {
                        stream.write_all(&line)?;
                        *guard = Some(stream);
                        Ok(())
                    }
                    Err(reconnect_err) => Err(LoggerError::publish(
                        self.name(),
                        format!(
                            "failed to send log and reconnect: {} (reconnect: {})",
                            e, reconnect_err
                        ),
                    )),
                }
            }
        }
    }

    fn name(&self) -> &str {
        "tcp"
    }
}

impl Drop for TcpPublisher {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.get_mut() {
            let _ = stream.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Message};
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;

    #[test]
    fn test_connect_fails_without_server() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();
        drop(listener);

        assert!(TcpPublisher::connect(address).is_err());
    }

    #[test]
    fn test_publish_writes_json_line() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let server = std::thread::spawn(move || {
            let (socket, _) = listener.accept().unwrap();
            let mut line = String::new();
            BufReader::new(socket).read_line(&mut line).unwrap();
            line
        });

        let publisher = TcpPublisher::connect(&address).unwrap();
        assert!(publisher.is_connected());
        assert_eq!(publisher.address(), address);

        let message = Message::at("over the wire", LogLevel::Info, "svc", "h1", 42);
        publisher.publish(&message.to_bytes().unwrap()).unwrap();

        let line = server.join().unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(Message::from_slice(line.trim_end().as_bytes()).unwrap(), message);
    }

    #[test]
    fn test_publish_without_connection_and_no_reconnect() {
        let publisher = TcpPublisher {
            stream: Mutex::new(None),
            address: "127.0.0.1:9".to_string(),
            reconnect_on_error: false,
        };

        let result = publisher.publish(b"{}");
        assert!(matches!(result, Err(LoggerError::NotConnected { .. })));
    }

    #[test]
    fn test_frame_appends_newline() {
        assert_eq!(frame(b"{}"), b"{}\n".to_vec());
    }
}
