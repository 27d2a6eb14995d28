//! Error taxonomy for the relay boundary
//!
//! Two layers: `TransportError` is the result vocabulary of the underlying
//! P2P transport capability, and `RelayError` is what crosses the relay's
//! own boundary. `NotFound` is deliberately part of the transport vocabulary
//! rather than a separate option type: "no packet available" is a routine
//! polling outcome the relay must distinguish from genuine failures.

use crate::state::ConnectionState;

/// Result codes reported by the transport capability
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// No inbound packet is available; routine polling outcome, never logged
    #[error("no packet available")]
    NotFound,

    /// No route to the remote endpoint and delayed delivery was not allowed
    #[error("no route to remote endpoint")]
    NoRoute,

    /// A transport-side limit was exceeded (packet size, queue capacity)
    #[error("transport limit exceeded")]
    LimitExceeded,

    /// The transport rejected the request parameters
    #[error("invalid transport parameters: {0}")]
    InvalidParameters(String),

    /// Unclassified transport failure
    #[error("transport failure: {0}")]
    Internal(String),
}

/// Errors returned by relay operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// Operation attempted while the relay was not in the `Started` state;
    /// no I/O was performed
    #[error("relay not started (state: {0})")]
    InvalidState(ConnectionState),

    /// The transport capability's own result code, passed through verbatim
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result alias for relay operations
pub type RelayResult<T> = std::result::Result<T, RelayError>;
