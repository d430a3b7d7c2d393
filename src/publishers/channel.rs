//! In-process publisher backed by a bounded channel

use crate::core::{LoggerError, Publisher, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Hands serialized messages to a consumer on another thread.
///
/// Publishing never blocks: when the queue is full the message is refused
/// with [`LoggerError::QueueFull`], and once the receiver is gone every
/// publish fails with [`LoggerError::Disconnected`].
///
/// ```
/// use uatu_logger::prelude::*;
///
/// let (publisher, receiver) = ChannelPublisher::bounded(8);
/// publisher.publish(b"{}").unwrap();
/// assert_eq!(receiver.recv().unwrap(), b"{}".to_vec());
/// ```
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    sender: Sender<Vec<u8>>,
    capacity: usize,
}

impl ChannelPublisher {
    /// Create a publisher and the receiving end of its queue
    pub fn bounded(capacity: usize) -> (Self, Receiver<Vec<u8>>) {
        let (sender, receiver) = bounded(capacity);
        (Self { sender, capacity }, receiver)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Publisher for ChannelPublisher {
    fn publish(&self, payload: &[u8]) -> Result<()> {
        match self.sender.try_send(payload.to_vec()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(LoggerError::QueueFull {
                capacity: self.capacity,
            }),
            Err(TrySendError::Disconnected(_)) => Err(LoggerError::Disconnected),
        }
    }

    fn name(&self) -> &str {
        "channel"
    }
}
