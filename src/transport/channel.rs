use std::sync::mpsc::{self, Receiver, Sender};

use super::{Outbound, Transport, TransportError};

/// In-process transport carrying encoded messages over an mpsc channel.
///
/// Stands in for the watch-to-phone link when the companion runs in the same
/// process (the CLI driver and the integration tests).
#[derive(Debug)]
pub struct ChannelTransport {
    tx: Sender<String>,
}

/// Create a transport plus the receiver the companion side drains.
#[must_use]
pub fn channel() -> (ChannelTransport, Receiver<String>) {
    let (tx, rx) = mpsc::channel();
    (ChannelTransport { tx }, rx)
}

impl Transport for ChannelTransport {
    fn send(&mut self, message: Outbound) -> Result<(), TransportError> {
        let raw = message.encode()?;
        self.tx.send(raw).map_err(|_| TransportError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchKind;

    #[test]
    fn delivers_encoded_messages() {
        let (mut transport, rx) = channel();
        transport
            .send(Outbound::Request {
                correlation_id: 99,
                kind: FetchKind::Nearby,
            })
            .expect("send succeeds");
        let raw = rx.recv().expect("message delivered");
        assert_eq!(
            Outbound::decode(&raw).expect("decodable"),
            Outbound::Request {
                correlation_id: 99,
                kind: FetchKind::Nearby,
            }
        );
    }

    #[test]
    fn dropped_receiver_is_a_send_failure() {
        let (mut transport, rx) = channel();
        drop(rx);
        let result = transport.send(Outbound::Quiet { correlation_id: 1 });
        assert!(matches!(result, Err(TransportError::Closed)));
    }
}
