//! Core transport trait definitions

use peerlink_core::{
    ConnectionState, EndpointId, PeerRole, Reliability, SocketId, TransportError,
};
use std::sync::Arc;

/// One outbound packet, fully parameterized for the transport capability
///
/// The payload is a borrowed view; the transport must copy it if it needs
/// to retain the bytes past the call.
#[derive(Debug, Clone)]
pub struct SendPacketOptions<'a> {
    /// Sending participant
    pub local: EndpointId,
    /// Receiving participant
    pub remote: EndpointId,
    /// Optional named socket scoping this send
    pub socket_id: Option<&'a SocketId>,
    /// Application channel byte, passed through to the receiver
    pub channel_id: u8,
    /// Packet payload
    pub payload: &'a [u8],
    /// Reliability class for this send
    pub reliability: Reliability,
    /// Whether the packet may be held until a route to the remote exists
    pub allow_delayed: bool,
}

/// One inbound packet as reported by the transport capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedPacket {
    /// Sending participant
    pub remote: EndpointId,
    /// Application channel byte as sent
    pub channel_id: u8,
    /// Packet payload
    pub payload: Vec<u8>,
}

/// The P2P packet transport capability
///
/// All operations are synchronous and non-blocking: they return immediately
/// with success, failure, or (for the receive path) `NotFound` when no
/// packet is queued. One transport instance may be shared by several relay
/// peers; implementations must tolerate interleaved requests for different
/// local endpoints.
pub trait PacketTransport: Send + Sync {
    /// Transmit one packet to a remote participant
    fn send_packet(&self, options: SendPacketOptions<'_>) -> Result<(), TransportError>;

    /// Size in bytes of the next queued inbound packet for a local endpoint
    ///
    /// Returns `Err(TransportError::NotFound)` when nothing is queued.
    fn next_packet_size(&self, local: &EndpointId) -> Result<usize, TransportError>;

    /// Retrieve the next queued inbound packet, truncated to `max_size`
    fn receive_packet(
        &self,
        local: &EndpointId,
        max_size: usize,
    ) -> Result<ReceivedPacket, TransportError>;

    /// Number of inbound packets queued and not yet retrieved for a local
    /// endpoint
    fn queue_depth(&self, local: &EndpointId) -> Result<u64, TransportError>;
}

impl<T: PacketTransport + ?Sized> PacketTransport for &T {
    fn send_packet(&self, options: SendPacketOptions<'_>) -> Result<(), TransportError> {
        (**self).send_packet(options)
    }

    fn next_packet_size(&self, local: &EndpointId) -> Result<usize, TransportError> {
        (**self).next_packet_size(local)
    }

    fn receive_packet(
        &self,
        local: &EndpointId,
        max_size: usize,
    ) -> Result<ReceivedPacket, TransportError> {
        (**self).receive_packet(local, max_size)
    }

    fn queue_depth(&self, local: &EndpointId) -> Result<u64, TransportError> {
        (**self).queue_depth(local)
    }
}

impl<T: PacketTransport + ?Sized> PacketTransport for Arc<T> {
    fn send_packet(&self, options: SendPacketOptions<'_>) -> Result<(), TransportError> {
        (**self).send_packet(options)
    }

    fn next_packet_size(&self, local: &EndpointId) -> Result<usize, TransportError> {
        (**self).next_packet_size(local)
    }

    fn receive_packet(
        &self,
        local: &EndpointId,
        max_size: usize,
    ) -> Result<ReceivedPacket, TransportError> {
        (**self).receive_packet(local, max_size)
    }

    fn queue_depth(&self, local: &EndpointId) -> Result<u64, TransportError> {
        (**self).queue_depth(local)
    }
}

/// Observer of relay connection-state transitions
///
/// A single sink serves both roles; the role tag tells the host framework
/// which of its peers changed state.
pub trait StateSink {
    /// Called once per distinct state transition
    fn state_changed(&mut self, role: PeerRole, state: ConnectionState, transport_index: u8);
}

/// Sink that discards all notifications, for peers without an observer
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStateSink;

impl StateSink for NullStateSink {
    fn state_changed(&mut self, _role: PeerRole, _state: ConnectionState, _transport_index: u8) {}
}
