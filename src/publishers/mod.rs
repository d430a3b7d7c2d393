//! Publisher implementations

pub mod channel;
pub mod tcp;

pub use channel::ChannelPublisher;
pub use tcp::TcpPublisher;

// Re-export the trait next to its implementations
pub use crate::core::Publisher;
