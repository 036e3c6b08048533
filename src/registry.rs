//! Pending-reply table: the correlation layer between outbound requests and
//! inbound responses.
//!
//! Every outbound request registers a settlement slot under a fresh message
//! id; every inbound response is matched against that table by id. The table
//! is constructor-injected state, created once per [`Bridge`](crate::Bridge)
//! and alive for the page lifetime. Entries for requests the host never
//! answers are never reclaimed — the transport gives no delivery guarantee,
//! and the id space only grows.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};

use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::BridgeError;

type Settlement = Result<Value, BridgeError>;

/// A response in flight: resolves with the full response payload, or errs
/// with [`BridgeError::Rejected`] carrying that payload when the host
/// signaled failure.
///
/// Dropping a `Reply` is fine (fire-and-forget); the registry entry stays
/// behind and a late response to it is delivered into the void.
pub struct Reply {
    rx: oneshot::Receiver<Settlement>,
}

impl Reply {
    /// A reply that is already settled, without a registry entry. Used when
    /// the request failed before reaching the wire.
    pub(crate) fn settled(outcome: Settlement) -> Self {
        let (tx, rx) = oneshot::channel();
        // The receiver is held right here, the send cannot fail.
        let _ = tx.send(outcome);
        Reply { rx }
    }
}

impl Future for Reply {
    type Output = Settlement;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(BridgeError::Closed)),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[derive(Default)]
struct RegistryInner {
    entries: HashMap<u64, oneshot::Sender<Settlement>>,
    next_id: u64,
}

/// Table mapping message ids to the requests awaiting their response.
///
/// Ids are sequential non-negative integers, monotonically increasing and
/// never reused within a page lifetime, so any burst of registrations in the
/// same synchronous turn is collision-free.
#[derive(Default)]
pub struct MessageRegistry {
    inner: Mutex<RegistryInner>,
}

impl MessageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next message id and store a pending entry for it.
    /// Registration happens-before any possible matching resolution: the id
    /// only becomes known to the host once attached to the outbound message.
    pub fn register(&self) -> (u64, Reply) {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.inner.lock().expect("registry lock poisoned");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.insert(id, tx);
        (id, Reply { rx })
    }

    /// Settle the pending request the response payload points at, then drop
    /// the entry unconditionally.
    ///
    /// A response rejects iff it carries `command == "error"` or an explicit
    /// `success: false`; anything else resolves. Responses without a usable
    /// `messageId`, or whose id matches nothing (already settled, or never
    /// registered), are logged and dropped — a registry miss is not an error.
    pub fn resolve_or_reject(&self, response: Value) {
        let Some(id) = response.get("messageId").and_then(Value::as_u64) else {
            warn!("inbound message has no usable messageId, dropping");
            return;
        };

        let entry = {
            let mut inner = self.inner.lock().expect("registry lock poisoned");
            inner.entries.remove(&id)
        };
        let Some(tx) = entry else {
            warn!(message_id = id, "no pending request for inbound response");
            return;
        };

        let outcome = if is_failure(&response) {
            Err(BridgeError::Rejected(response))
        } else {
            Ok(response)
        };
        if tx.send(outcome).is_err() {
            // Caller dropped its Reply; fire-and-forget requests land here.
            debug!(message_id = id, "reply dropped before settlement");
        }
    }

    /// Number of requests still awaiting a response.
    pub fn pending(&self) -> usize {
        self.inner.lock().expect("registry lock poisoned").entries.len()
    }
}

fn is_failure(response: &Value) -> bool {
    let errored = response.get("command").and_then(Value::as_str) == Some("error");
    let disavowed = response.get("success").and_then(Value::as_bool) == Some(false);
    errored || disavowed
}
