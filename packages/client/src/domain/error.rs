//! Domain-level error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Username is empty after trimming
    #[error("Username must not be empty")]
    EmptyUsername,

    /// Message text is empty after trimming
    #[error("Message must not be empty")]
    EmptyMessage,
}

/// Errors raised by a chat channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The transport behind the channel is gone
    #[error("Channel is closed")]
    Closed,

    /// Outbound event could not be encoded
    #[error("Failed to encode event: {0}")]
    Encode(String),
}
