//! Boundary with the companion-device message channel.
//!
//! The channel is message-oriented and best-effort: sends either hand the
//! message to the link or fail immediately, and all retry policy lives in the
//! fetch coordinator.

mod channel;
mod message;

pub use channel::{ChannelTransport, channel};
pub use message::{Inbound, Outbound};

use thiserror::Error;

/// Failures raised at the transport boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The far side of the channel is gone.
    #[error("transport channel closed")]
    Closed,

    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Outbound half of the companion link.
///
/// No implicit retries: an `Err` is the explicit send-failure path the
/// coordinator reacts to.
pub trait Transport {
    fn send(&mut self, message: Outbound) -> Result<(), TransportError>;
}
