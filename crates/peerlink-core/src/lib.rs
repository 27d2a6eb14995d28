//! Peerlink Core
//!
//! Shared vocabulary for the peerlink transport adapter: participant
//! identifiers on the P2P service, connection lifecycle states, channel and
//! delivery-policy types, and the error taxonomy crossing the relay
//! boundary.
//!
//! This crate defines no behavior of its own beyond derivations (channel
//! byte → delivery policy); the relay and transport implementations live in
//! `peerlink-transport`.

pub mod channel;
pub mod error;
pub mod identifiers;
pub mod state;

// Re-export commonly used types
pub use channel::{Channel, DeliveryPolicy, Reliability};
pub use error::{RelayError, RelayResult, TransportError};
pub use identifiers::{EndpointId, SocketId};
pub use state::{ConnectionState, PeerRole};
