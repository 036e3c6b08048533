use serde_json::Value;
use thiserror::Error;

/// Error half of a settled [`Reply`](crate::registry::Reply).
///
/// Only genuine application-level failures reach the caller: a host that
/// answers with an error payload rejects the reply with [`BridgeError::Rejected`],
/// carrying the full response so the caller can interpret it. Everything the
/// bridge recovers internally (unparseable inbound events, responses for
/// unknown ids) is logged and never surfaces here.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The host explicitly signaled failure. The rejection reason is the
    /// complete response payload, not a distilled error type.
    #[error("host rejected request: {0}")]
    Rejected(Value),

    /// The outbound body could not be encoded as JSON text. The reply settles
    /// with this error instead of anything reaching the wire.
    #[error("failed to serialize outbound message: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The bridge was dropped before a response arrived. Unreachable while
    /// the bridge lives for the page lifetime, but a dangling future is not
    /// an honest option in Rust.
    #[error("bridge closed before a reply arrived")]
    Closed,
}
