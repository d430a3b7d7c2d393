//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A publisher refused or failed to deliver a message
    #[error("Publisher '{publisher}' failed: {message}")]
    PublishError { publisher: String, message: String },

    /// Remote sink has no live connection
    #[error("Publisher not connected to {address}")]
    NotConnected { address: String },

    /// In-process publisher queue is full
    #[error("Publisher queue full: {capacity} messages buffered")]
    QueueFull { capacity: usize },

    /// Consumer side of an in-process publisher went away
    #[error("Publisher consumer disconnected")]
    Disconnected,

    /// Invalid configuration value
    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfiguration { key: String, message: String },
}

impl LoggerError {
    /// Create a publish error for the named publisher
    pub fn publish(publisher: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::PublishError {
            publisher: publisher.into(),
            message: message.into(),
        }
    }

    /// Create a not-connected error
    pub fn not_connected(address: impl Into<String>) -> Self {
        LoggerError::NotConnected {
            address: address.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            key: key.into(),
            message: message.into(),
        }
    }
}
