//! Peerlink Transport
//!
//! Adapter between a host networking framework and a peer-to-peer
//! relay/NAT-traversal service. The framework drives a [`PacketRelay`]
//! from its per-tick update cycle; the relay gates all I/O on its
//! connection state, maps the framework's channel byte to a delivery
//! policy, and forwards send/receive calls to an injected
//! [`PacketTransport`] capability. Inbound packets are pulled by polling;
//! the transport pushes nothing.
//!
//! NAT traversal, routing, encryption, and session negotiation all live
//! behind the transport capability. This crate is glue, kept deliberately
//! thin.

pub mod core;
pub mod memory;
pub mod queue;
pub mod relay;

// Re-export essential components
pub use crate::core::traits::{PacketTransport, ReceivedPacket, SendPacketOptions, StateSink};
pub use memory::MemoryTransport;
pub use queue::PendingQueue;
pub use relay::{InboundPacket, PacketRelay};
