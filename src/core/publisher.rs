//! Publisher trait for remote log sinks

use super::error::Result;

/// A remote sink that accepts serialized log messages.
///
/// The logger hands every publisher the same JSON payload and reports
/// failures locally; it never retries. Transport, batching and connection
/// management are up to the implementation, which is also responsible for
/// its own synchronization since publishers may be shared between loggers.
pub trait Publisher: Send + Sync {
    fn publish(&self, payload: &[u8]) -> Result<()>;
    fn name(&self) -> &str;
}
