//! State-gated packet relay over an injected transport capability
//!
//! One `PacketRelay` instance backs one peer role (server or client) of the
//! host framework. It owns that peer's [`ConnectionState`], notifies the
//! injected [`StateSink`] exactly once per distinct transition, and refuses
//! all I/O unless the state is `Started`. Send and receive are thin,
//! synchronous forwards to the [`PacketTransport`] capability: no buffering,
//! no retries, no teardown policy. Whatever the transport reports is either
//! passed through verbatim (send) or collapsed to "no packet" (receive),
//! with failures logged and left for the caller's next poll.

use crate::core::traits::{PacketTransport, SendPacketOptions, StateSink};
use peerlink_core::{
    Channel, ConnectionState, EndpointId, PeerRole, RelayError, RelayResult, SocketId,
    TransportError,
};
use tracing::{error, warn};

/// One inbound packet, decoded for the host framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundPacket {
    /// Participant that sent the packet
    pub remote: EndpointId,
    /// Channel classification derived from the sender's channel byte
    pub channel: Channel,
    /// Packet payload
    pub payload: Vec<u8>,
}

/// Relay peer bridging the host framework to the P2P transport capability
pub struct PacketRelay<T, S> {
    transport: T,
    sink: S,
    state: ConnectionState,
    transport_index: u8,
}

impl<T: PacketTransport, S: StateSink> PacketRelay<T, S> {
    /// Create a relay over an injected transport and state sink
    ///
    /// `transport_index` identifies which transport slot of the host
    /// framework this relay occupies; it is carried verbatim in every
    /// state-change notification.
    pub fn new(transport: T, sink: S, transport_index: u8) -> Self {
        Self {
            transport,
            sink,
            state: ConnectionState::Stopped,
            transport_index,
        }
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Transition to a new connection state
    ///
    /// Redundant calls (same state) are a no-op and produce no
    /// notification. All lifecycle logic (connect, disconnect, error paths)
    /// must go through here rather than tracking state on the side; this is
    /// the only path by which observers learn of connectivity changes.
    pub fn set_state(&mut self, state: ConnectionState, role: PeerRole) {
        if state == self.state {
            return;
        }
        self.state = state;
        self.sink.state_changed(role, state, self.transport_index);
    }

    /// Send one payload to a remote participant
    ///
    /// Channel byte 0 requests reliable-ordered delivery and allows the
    /// transport to hold the packet until a route exists; any other channel
    /// byte requests best-effort delivery with no holding. The transport's
    /// result is returned verbatim; on failure a warning is logged but the
    /// send is never retried here.
    pub fn send(
        &self,
        local: EndpointId,
        remote: EndpointId,
        socket_id: Option<&SocketId>,
        channel_id: u8,
        payload: &[u8],
    ) -> RelayResult<()> {
        if !self.state.is_started() {
            return Err(RelayError::InvalidState(self.state));
        }

        let policy = Channel::from_id(channel_id).delivery_policy();
        let result = self.transport.send_packet(SendPacketOptions {
            local,
            remote,
            socket_id,
            channel_id,
            payload,
            reliability: policy.reliability,
            allow_delayed: policy.allow_delayed,
        });
        if let Err(err) = &result {
            warn!(
                remote = %remote,
                size = payload.len(),
                error = %err,
                "Failed to send packet"
            );
        }
        result.map_err(RelayError::from)
    }

    /// Retrieve at most one queued inbound packet for a local endpoint
    ///
    /// `None` means no packet: either nothing is queued (routine, not
    /// logged), the relay is not started, or the transport failed (logged,
    /// treated as transient; poll again next tick). Callers drain by
    /// calling repeatedly until `None`.
    pub fn receive(&self, local: &EndpointId) -> Option<InboundPacket> {
        if !self.state.is_started() {
            return None;
        }

        let size = match self.transport.next_packet_size(local) {
            Ok(size) => size,
            // No packets queued; the routine polling outcome.
            Err(TransportError::NotFound) => return None,
            Err(err) => {
                error!(local = %local, error = %err, "Failed to query next packet size");
                return None;
            }
        };

        match self.transport.receive_packet(local, size) {
            Ok(packet) => Some(InboundPacket {
                remote: packet.remote,
                channel: Channel::from_id(packet.channel_id),
                payload: packet.payload,
            }),
            Err(err) => {
                error!(local = %local, size, error = %err, "Failed to receive packet");
                None
            }
        }
    }

    /// Number of inbound packets queued and not yet retrieved
    ///
    /// Reports zero when the relay is not started or the transport query
    /// fails (logged). Callers use this to bound the receive attempts made
    /// in one scheduling tick.
    pub fn queue_depth(&self, local: &EndpointId) -> u64 {
        if !self.state.is_started() {
            return 0;
        }
        match self.transport.queue_depth(local) {
            Ok(depth) => depth,
            Err(err) => {
                error!(local = %local, error = %err, "Failed to query packet queue depth");
                0
            }
        }
    }

    /// Drain the packets currently queued for a local endpoint
    ///
    /// Snapshots the queue depth first and performs at most that many
    /// receive attempts, so a tick does bounded work even while packets
    /// keep arriving. Stops early once the queue reports empty.
    pub fn drain(&self, local: &EndpointId) -> Vec<InboundPacket> {
        let depth = self.queue_depth(local);
        let mut packets = Vec::new();
        for _ in 0..depth {
            match self.receive(local) {
                Some(packet) => packets.push(packet),
                None => break,
            }
        }
        packets
    }
}
