//! Connection lifecycle states and peer roles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of one relay peer
///
/// Owned exclusively by the relay that tracks it; all I/O is gated on
/// `Started`. Mutation happens only through the relay's state setter so
/// observers see every distinct transition exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionState {
    /// Not running; no I/O possible
    Stopped,
    /// Startup in progress
    Starting,
    /// Fully operational; send and receive are permitted
    Started,
    /// Shutdown in progress
    Stopping,
}

impl ConnectionState {
    /// Whether send/receive operations may proceed
    pub fn is_started(&self) -> bool {
        matches!(self, ConnectionState::Started)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Stopped => "stopped",
            ConnectionState::Starting => "starting",
            ConnectionState::Started => "started",
            ConnectionState::Stopping => "stopping",
        };
        write!(f, "{name}")
    }
}

/// Which side of the connection a relay peer plays
///
/// Tags state-change notifications so one sink can serve both the
/// server-role and client-role peer of a host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeerRole {
    /// Listening side
    Server,
    /// Connecting side
    Client,
}

impl fmt::Display for PeerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PeerRole::Server => "server",
            PeerRole::Client => "client",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_started_permits_io() {
        assert!(ConnectionState::Started.is_started());
        for state in [
            ConnectionState::Stopped,
            ConnectionState::Starting,
            ConnectionState::Stopping,
        ] {
            assert!(!state.is_started());
        }
    }

    #[test]
    fn test_state_display_names() {
        assert_eq!(ConnectionState::Stopped.to_string(), "stopped");
        assert_eq!(ConnectionState::Started.to_string(), "started");
        assert_eq!(PeerRole::Server.to_string(), "server");
        assert_eq!(PeerRole::Client.to_string(), "client");
    }
}
