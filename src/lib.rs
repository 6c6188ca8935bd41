//! Core crate exports for the `mcfetch` soft-serve status fetcher.
//!
//! The root module re-exports the fetch coordinator and transport types so
//! that embedders can wire a presentation layer and a companion link without
//! digging through the module hierarchy.

pub mod companion;
pub mod fetch;
pub mod logging;
pub mod transport;

pub use fetch::{
    FetchCoordinator, FetchKind, FetchPhase, FetchSnapshot, MachineStatus, ResultSlot, SignalSink,
    UiSignal,
};
pub use transport::{ChannelTransport, Inbound, Outbound, Transport, TransportError};
