//! Outbound delivery: serialize a message and hand it to the host through
//! whichever mechanism the platform detection selected.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crate::platform::Platform;
use crate::registry::{MessageRegistry, Reply};

/// Raw delivery hooks the embedding container exposes.
///
/// Exactly one of these is ever used per page, per the detected [`Platform`];
/// the others may be wired to panic, log, or no-op as the embedder sees fit.
/// All three are fire-and-forget: the transport gives no delivery guarantee,
/// so the hooks report nothing back.
pub trait HostPort: Send + Sync {
    /// Invoke the container's synchronous native notification channel.
    fn notify(&self, message: &str);

    /// Post to the named message handler on the webkit bridge.
    fn webkit_post(&self, message: &str);

    /// Post to the parent window. `target_origin` is always the wildcard
    /// `"*"` — the host frame's origin is not known to the embedded page.
    fn parent_post(&self, message: &str, target_origin: &str);
}

/// Serializes outbound messages and routes them through the transport
/// variant selected at construction.
pub struct Dispatcher {
    registry: Arc<MessageRegistry>,
    platform: Platform,
    port: Arc<dyn HostPort>,
}

impl Dispatcher {
    pub fn new(registry: Arc<MessageRegistry>, platform: Platform, port: Arc<dyn HostPort>) -> Self {
        Self {
            registry,
            platform,
            port,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Send a message to the host, returning the pending [`Reply`]
    /// immediately.
    ///
    /// The body gains an injected `messageId` field before transmission; a
    /// body that is not a JSON object is replaced by `{messageId}` outright.
    /// There is no retry and no timeout: if the host never answers, the
    /// reply stays pending and its registry entry stays allocated.
    pub fn post(&self, body: Value) -> Reply {
        let (id, reply) = self.registry.register();

        let body = match body {
            Value::Object(mut map) => {
                map.insert("messageId".into(), json!(id));
                Value::Object(map)
            }
            _ => json!({ "messageId": id }),
        };

        let text = match serde_json::to_string(&body) {
            Ok(text) => text,
            Err(err) => return Reply::settled(Err(err.into())),
        };

        debug!(message_id = id, platform = ?self.platform, "dispatching message");
        match self.platform {
            Platform::NativeNotify => self.port.notify(&text),
            Platform::WebkitMessageHandler => self.port.webkit_post(&text),
            Platform::ParentPostMessage => self.port.parent_post(&text, "*"),
        }
        reply
    }
}
