//! Application channels and their delivery policies
//!
//! The host framework addresses traffic by a single channel byte. Channel 0
//! is the reliable channel; every other value is best-effort. The delivery
//! policy handed to the transport capability is derived from that byte and
//! nothing else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Application-level channel classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// In-order, retransmitted-until-acknowledged delivery
    Reliable,
    /// Best-effort delivery; packets may be dropped or reordered
    Unreliable,
}

impl Channel {
    /// Classify an application channel byte
    ///
    /// Channel id 0 is reliable; all 255 other values are unreliable.
    pub fn from_id(channel_id: u8) -> Self {
        if channel_id == 0 {
            Channel::Reliable
        } else {
            Channel::Unreliable
        }
    }

    /// Delivery policy the transport capability should apply for this channel
    pub fn delivery_policy(&self) -> DeliveryPolicy {
        match self {
            Channel::Reliable => DeliveryPolicy {
                reliability: Reliability::ReliableOrdered,
                allow_delayed: true,
            },
            Channel::Unreliable => DeliveryPolicy {
                reliability: Reliability::UnreliableUnordered,
                allow_delayed: false,
            },
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Reliable => "reliable",
            Channel::Unreliable => "unreliable",
        };
        write!(f, "{name}")
    }
}

/// Delivery guarantees requested from the transport capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reliability {
    /// Retransmit until acknowledged, deliver in order
    ReliableOrdered,
    /// No retransmission or ordering guarantee
    UnreliableUnordered,
}

/// Per-send delivery parameters derived from the channel byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPolicy {
    /// Reliability class for this send
    pub reliability: Reliability,
    /// Whether the packet may be queued until a route to the remote exists
    /// (rather than dropped immediately when no route is established yet)
    pub allow_delayed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_channel_zero_is_reliable() {
        assert_eq!(Channel::from_id(0), Channel::Reliable);
        let policy = Channel::from_id(0).delivery_policy();
        assert_eq!(policy.reliability, Reliability::ReliableOrdered);
        assert!(policy.allow_delayed);
    }

    #[test]
    fn test_nonzero_channel_is_unreliable() {
        for id in [1u8, 2, 127, 255] {
            assert_eq!(Channel::from_id(id), Channel::Unreliable);
            let policy = Channel::from_id(id).delivery_policy();
            assert_eq!(policy.reliability, Reliability::UnreliableUnordered);
            assert!(!policy.allow_delayed);
        }
    }

    proptest! {
        #[test]
        fn prop_channel_mapping_covers_all_bytes(channel_id: u8) {
            let channel = Channel::from_id(channel_id);
            let policy = channel.delivery_policy();
            if channel_id == 0 {
                prop_assert_eq!(channel, Channel::Reliable);
                prop_assert_eq!(policy.reliability, Reliability::ReliableOrdered);
                prop_assert!(policy.allow_delayed);
            } else {
                prop_assert_eq!(channel, Channel::Unreliable);
                prop_assert_eq!(policy.reliability, Reliability::UnreliableUnordered);
                prop_assert!(!policy.allow_delayed);
            }
        }
    }
}
