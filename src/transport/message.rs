use serde::{Deserialize, Serialize};

use super::TransportError;
use crate::fetch::FetchKind;

/// Messages the watch side emits toward the companion device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    /// Ask the companion to run a backend query.
    Request { correlation_id: u16, kind: FetchKind },
    /// Best-effort notice that a correlation id is no longer wanted.
    Quiet { correlation_id: u16 },
}

/// Messages the companion device emits toward the watch side.
///
/// A closed vocabulary decoded exactly once at the transport boundary; the
/// rest of the crate never inspects tag strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inbound {
    /// The companion's data-fetching logic is initialised.
    Ready,
    /// One streamed result out of `expected_total`.
    Data {
        correlation_id: u16,
        index: u8,
        expected_total: u8,
        street: String,
        city: String,
        last_checked: String,
        status: String,
    },
    /// Terminal backend failure for the given request.
    Error { correlation_id: u16, text: String },
}

impl Outbound {
    pub fn encode(&self) -> Result<String, TransportError> {
        serde_json::to_string(self).map_err(TransportError::Encode)
    }

    pub fn decode(raw: &str) -> Result<Self, TransportError> {
        serde_json::from_str(raw).map_err(TransportError::Decode)
    }
}

impl Inbound {
    pub fn encode(&self) -> Result<String, TransportError> {
        serde_json::to_string(self).map_err(TransportError::Encode)
    }

    pub fn decode(raw: &str) -> Result<Self, TransportError> {
        serde_json::from_str(raw).map_err(TransportError::Decode)
    }
}
