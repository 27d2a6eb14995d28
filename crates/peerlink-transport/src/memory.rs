//! In-memory transport implementation
//!
//! A process-local packet hub for tests and same-process loopback. Each
//! registered endpoint owns a FIFO inbox; sends append to the remote's
//! inbox, and the receive path pops from the local one. Delayed-delivery
//! sends addressed to a not-yet-registered endpoint are held and flushed
//! when it registers, mirroring the route-establishment behavior of a real
//! P2P service.

use crate::core::traits::{PacketTransport, ReceivedPacket, SendPacketOptions};
use parking_lot::Mutex;
use peerlink_core::{EndpointId, TransportError};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

#[derive(Debug)]
struct QueuedPacket {
    remote: EndpointId,
    channel_id: u8,
    payload: Vec<u8>,
}

#[derive(Default)]
struct Hub {
    /// Inboxes of currently registered endpoints
    inboxes: HashMap<EndpointId, VecDeque<QueuedPacket>>,
    /// Packets held for endpoints with no route yet (delayed delivery)
    delayed: HashMap<EndpointId, VecDeque<QueuedPacket>>,
    /// Endpoints that registered and later unregistered
    closed: HashSet<EndpointId>,
}

/// In-memory [`PacketTransport`] for testing and local communication
///
/// Cloning yields another handle onto the same hub, so a server-role and a
/// client-role relay can share one transport instance.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    hub: Arc<Mutex<Hub>>,
}

impl MemoryTransport {
    /// Create an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a local endpoint, creating its inbox
    ///
    /// Any delayed packets already addressed to the endpoint are delivered
    /// immediately, in the order they were sent.
    pub fn register(&self, endpoint: EndpointId) {
        let mut hub = self.hub.lock();
        let held = hub.delayed.remove(&endpoint).unwrap_or_default();
        hub.inboxes.entry(endpoint).or_insert(held);
        hub.closed.remove(&endpoint);
    }

    /// Unregister an endpoint, dropping its inbox
    ///
    /// Subsequent sends to it fail with `NoRoute` regardless of delivery
    /// policy.
    pub fn unregister(&self, endpoint: &EndpointId) {
        let mut hub = self.hub.lock();
        hub.inboxes.remove(endpoint);
        hub.delayed.remove(endpoint);
        hub.closed.insert(*endpoint);
    }
}

impl PacketTransport for MemoryTransport {
    fn send_packet(&self, options: SendPacketOptions<'_>) -> Result<(), TransportError> {
        let packet = QueuedPacket {
            remote: options.local,
            channel_id: options.channel_id,
            payload: options.payload.to_vec(),
        };

        let mut hub = self.hub.lock();
        if let Some(inbox) = hub.inboxes.get_mut(&options.remote) {
            inbox.push_back(packet);
            return Ok(());
        }
        if hub.closed.contains(&options.remote) {
            return Err(TransportError::NoRoute);
        }
        if options.allow_delayed {
            hub.delayed
                .entry(options.remote)
                .or_default()
                .push_back(packet);
        }
        // Best-effort sends to an unknown endpoint are dropped silently.
        Ok(())
    }

    fn next_packet_size(&self, local: &EndpointId) -> Result<usize, TransportError> {
        let hub = self.hub.lock();
        let inbox = hub
            .inboxes
            .get(local)
            .ok_or_else(|| TransportError::InvalidParameters(format!("unknown endpoint {local}")))?;
        inbox
            .front()
            .map(|packet| packet.payload.len())
            .ok_or(TransportError::NotFound)
    }

    fn receive_packet(
        &self,
        local: &EndpointId,
        max_size: usize,
    ) -> Result<ReceivedPacket, TransportError> {
        let mut hub = self.hub.lock();
        let inbox = hub
            .inboxes
            .get_mut(local)
            .ok_or_else(|| TransportError::InvalidParameters(format!("unknown endpoint {local}")))?;
        let mut packet = inbox.pop_front().ok_or(TransportError::NotFound)?;
        packet.payload.truncate(max_size);
        Ok(ReceivedPacket {
            remote: packet.remote,
            channel_id: packet.channel_id,
            payload: packet.payload,
        })
    }

    fn queue_depth(&self, local: &EndpointId) -> Result<u64, TransportError> {
        let hub = self.hub.lock();
        let inbox = hub
            .inboxes
            .get(local)
            .ok_or_else(|| TransportError::InvalidParameters(format!("unknown endpoint {local}")))?;
        Ok(inbox.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peerlink_core::Reliability;

    fn send_options<'a>(
        local: EndpointId,
        remote: EndpointId,
        channel_id: u8,
        payload: &'a [u8],
    ) -> SendPacketOptions<'a> {
        let policy = peerlink_core::Channel::from_id(channel_id).delivery_policy();
        SendPacketOptions {
            local,
            remote,
            socket_id: None,
            channel_id,
            payload,
            reliability: policy.reliability,
            allow_delayed: policy.allow_delayed,
        }
    }

    #[test]
    fn test_inbox_is_fifo() {
        let transport = MemoryTransport::new();
        let (a, b) = (EndpointId::new(), EndpointId::new());
        transport.register(b);

        for payload in [&[1u8][..], &[2, 2][..], &[3, 3, 3][..]] {
            transport.send_packet(send_options(a, b, 1, payload)).unwrap();
        }

        assert_eq!(transport.queue_depth(&b).unwrap(), 3);
        assert_eq!(transport.next_packet_size(&b).unwrap(), 1);
        for expected in [vec![1u8], vec![2, 2], vec![3, 3, 3]] {
            let size = transport.next_packet_size(&b).unwrap();
            let packet = transport.receive_packet(&b, size).unwrap();
            assert_eq!(packet.remote, a);
            assert_eq!(packet.payload, expected);
        }
        assert_eq!(transport.next_packet_size(&b), Err(TransportError::NotFound));
    }

    #[test]
    fn test_delayed_delivery_flushes_on_register() {
        let transport = MemoryTransport::new();
        let (a, b) = (EndpointId::new(), EndpointId::new());

        // Reliable channel: held until the remote registers.
        transport.send_packet(send_options(a, b, 0, b"held")).unwrap();
        // Unreliable channel: dropped, no route yet.
        transport.send_packet(send_options(a, b, 1, b"lost")).unwrap();

        transport.register(b);
        assert_eq!(transport.queue_depth(&b).unwrap(), 1);
        let packet = transport.receive_packet(&b, 4).unwrap();
        assert_eq!(packet.payload, b"held");
        assert_eq!(packet.channel_id, 0);
    }

    #[test]
    fn test_unregistered_endpoint_has_no_route() {
        let transport = MemoryTransport::new();
        let (a, b) = (EndpointId::new(), EndpointId::new());
        transport.register(b);
        transport.unregister(&b);

        let options = SendPacketOptions {
            local: a,
            remote: b,
            socket_id: None,
            channel_id: 0,
            payload: b"x",
            reliability: Reliability::ReliableOrdered,
            allow_delayed: true,
        };
        assert_eq!(transport.send_packet(options), Err(TransportError::NoRoute));
    }

    #[test]
    fn test_reregister_restores_the_route() {
        let transport = MemoryTransport::new();
        let (a, b) = (EndpointId::new(), EndpointId::new());
        transport.register(b);
        transport.unregister(&b);
        transport.register(b);

        transport.send_packet(send_options(a, b, 0, b"back")).unwrap();
        assert_eq!(transport.queue_depth(&b).unwrap(), 1);
        assert_eq!(transport.receive_packet(&b, 4).unwrap().payload, b"back");
    }

    #[test]
    fn test_receive_truncates_to_max_size() {
        let transport = MemoryTransport::new();
        let (a, b) = (EndpointId::new(), EndpointId::new());
        transport.register(b);
        transport
            .send_packet(send_options(a, b, 1, &[9u8; 10]))
            .unwrap();

        let packet = transport.receive_packet(&b, 4).unwrap();
        assert_eq!(packet.payload, vec![9u8; 4]);
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let transport = MemoryTransport::new();
        let unknown = EndpointId::new();
        assert!(matches!(
            transport.queue_depth(&unknown),
            Err(TransportError::InvalidParameters(_))
        ));
        assert!(matches!(
            transport.next_packet_size(&unknown),
            Err(TransportError::InvalidParameters(_))
        ));
    }
}
