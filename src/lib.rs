//! # frame_messaging
//!
//! A batteries-included Rust crate for **cross-frame messaging**:
//!
//! - Exchange request/response messages with a **parent window or native
//!   container** from inside an embedded frame
//! - Correlate replies over **fire-and-forget transports** with a
//!   pending-reply registry, exposed as ordinary futures
//! - Normalize **three delivery mechanisms** behind one contract
//!
//! The goal is to be the "it just works" crate for frame-embedded pages —
//! especially the part that usually wastes hours: matching an asynchronous
//! response back to the call that caused it over a connectionless,
//! unordered channel.
//!
//! ---
//!
//! ## What is cross-frame messaging?
//!
//! An embedded page cannot call its host directly. It posts a serialized
//! message into a one-way channel and, some turns of the event loop later,
//! the host may post a serialized message back. Nothing about the channel
//! ties the two together.
//!
//! This crate's contract is:
//!
//! 1. Every outbound message gains an injected **`messageId`** (a sequential
//!    integer, unique for the page lifetime).
//! 2. A pending entry is stored in the **message registry** under that id.
//! 3. When a response carrying the same `messageId` arrives, the matching
//!    entry settles: resolved with the full payload, or rejected with it if
//!    the host signaled failure.
//!
//! ### Most important gotchas (read this first)
//!
//! - **Delivery is not guaranteed:** the transport may silently drop
//!   messages. A request the host never answers leaves its [`Reply`] pending
//!   forever and its registry entry allocated forever. There is no retry and
//!   no timeout; wrap a reply in your own timeout if you need one.
//! - **One platform per page:** the environment is probed once, at bridge
//!   construction. There is no runtime re-detection.
//! - **Registry misses are normal:** a response for an id that was already
//!   settled (or never issued) is logged as a warning and dropped, never
//!   raised.
//! - **Malformed input never throws:** an inbound event that fails to parse
//!   degrades to an empty object, which then misses the registry harmlessly.
//!
//! ---
//!
//! ## Crate layout
//!
//! - [`platform`] — one-time host environment classification.
//! - [`registry`] — the pending-reply table and [`Reply`] future.
//! - [`transport`] — the [`HostPort`] delivery seam and outbound dispatcher.
//! - [`listener`] — inbound event normalization.
//! - [`dimensions`] — one-way content-size reporting.
//!
//! ---
//!
//! ## Cargo setup (recommended)
//!
//! Reply settlement rides on `tokio::sync`; any executor can await a
//! [`Reply`], but your `Cargo.toml` needs Tokio's `sync` feature available:
//!
//! ```toml
//! [dependencies]
//! tokio = { version = "1", features = ["sync"] }
//! ```
//!
//! ---
//!
//! ## Quick start: request and correlated response
//!
//! The embedder implements [`HostPort`] over whatever its container actually
//! exposes. In tests (and below) that can be a plain recording stub.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use frame_messaging::{Bridge, EventData, HostPort, HostProfile, InboundEvent};
//! use serde_json::json;
//!
//! #[derive(Default)]
//! struct ParentWindow {
//!     sent: Mutex<Vec<String>>,
//! }
//!
//! impl HostPort for ParentWindow {
//!     fn notify(&self, _message: &str) {}
//!     fn webkit_post(&self, _message: &str) {}
//!     fn parent_post(&self, message: &str, _target_origin: &str) {
//!         self.sent.lock().unwrap().push(message.to_string());
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let port = Arc::new(ParentWindow::default());
//! let bridge = Bridge::new(HostProfile::browser("MacIntel"), port.clone());
//!
//! // Returns immediately with a pending reply.
//! let reply = bridge.get_data_for_current_object("Account", "Name");
//!
//! // The host echoes the messageId it was sent.
//! let sent: serde_json::Value =
//!     serde_json::from_str(&port.sent.lock().unwrap()[0]).unwrap();
//! bridge.handle_event(InboundEvent::Message(EventData::Structured(json!({
//!     "messageId": sent["messageId"],
//!     "success": true,
//!     "Account": { "Name": "Acme" },
//! }))));
//!
//! let data = reply.await.unwrap();
//! assert_eq!(data["Account"]["Name"], "Acme");
//! # }
//! ```
//!
//! ### What happens on a host error?
//!
//! A response carrying `command: "error"` (or an explicit `success: false`)
//! rejects the reply with [`BridgeError::Rejected`], wrapping the complete
//! payload — interpretation is left to the caller.
//!
//! ---
//!
//! ## Reporting content size
//!
//! The host cannot see how tall the embedded content is. Wire your resize
//! observation to a [`DimensionReporter`] and it pushes one-way
//! `iframeDimensions` messages whenever the observed height is non-zero:
//!
//! ```no_run
//! use std::sync::Arc;
//! use frame_messaging::{Bridge, ContentExtent, HostProfile};
//! # use frame_messaging::HostPort;
//! # struct MyPort;
//! # impl HostPort for MyPort {
//! #     fn notify(&self, _m: &str) {}
//! #     fn webkit_post(&self, _m: &str) {}
//! #     fn parent_post(&self, _m: &str, _t: &str) {}
//! # }
//!
//! struct ScrollingElement;
//!
//! impl ContentExtent for ScrollingElement {
//!     fn content_height(&self) -> f64 {
//!         // read the real scroll extent here
//!         768.0
//!     }
//! }
//!
//! let bridge = Bridge::new(HostProfile::browser("MacIntel"), Arc::new(MyPort));
//! let reporter = bridge.dimension_reporter(Arc::new(ScrollingElement));
//! // call this from your resize observation:
//! reporter.on_resize();
//! ```
//!
//! ---
//!
//! ## One bridge per process
//!
//! Construct a [`Bridge`] and pass it around, or use [`init`] for the
//! classic page-global setup: the first call creates the bridge, every later
//! call is an idempotent no-op returning the same instance.
//!
//! ---
//!
//! ## Troubleshooting (read this if "it doesn't work")
//!
//! ### 1) My reply never settles
//! The host never answered that id. Check that the host echoes `messageId`
//! verbatim, and remember there is no timeout here.
//!
//! ### 2) "no pending request for inbound response" warnings
//! The host replied twice to one id, or replied to an id it invented.
//! Harmless, but worth fixing host-side.
//!
//! ### 3) Every message lands on the wrong channel
//! Platform detection runs once, at construction. Make sure the
//! [`HostProfile`] probe reflects the container *before* building the
//! bridge.
//!
//! ### 4) The host sees `{"messageId": n}` and nothing else
//! You posted a non-object body; the dispatcher replaces those with the bare
//! id envelope rather than failing.
//!
//! ---
//!
//! ## API re-exports
//!
//! The common entry points live at the crate root: [`Bridge`], [`init`],
//! [`global`], [`HostProfile`], [`Platform`], [`HostPort`], [`Reply`],
//! [`InboundEvent`], [`EventData`], [`ContentExtent`], [`DimensionReporter`],
//! [`BridgeError`]. The modules stay public for advanced use.

pub mod dimensions;
pub mod error;
pub mod listener;
pub mod platform;
pub mod registry;
pub mod transport;

use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde_json::{json, Value};

#[doc(inline)]
pub use dimensions::{ContentExtent, DimensionReporter};
#[doc(inline)]
pub use error::BridgeError;
#[doc(inline)]
pub use listener::{normalize_event, EventData, InboundEvent};
#[doc(inline)]
pub use platform::{HostProfile, Platform};
#[doc(inline)]
pub use registry::{MessageRegistry, Reply};
#[doc(inline)]
pub use transport::{Dispatcher, HostPort};

/// The frame-resident messaging bridge: registry, dispatcher, and listener
/// assembled around one detected platform and one delivery port.
pub struct Bridge {
    registry: Arc<MessageRegistry>,
    dispatcher: Arc<Dispatcher>,
}

impl Bridge {
    /// Build a bridge for the given environment. Platform detection happens
    /// here, exactly once.
    pub fn new(profile: HostProfile, port: Arc<dyn HostPort>) -> Self {
        let registry = Arc::new(MessageRegistry::new());
        let platform = Platform::detect(&profile);
        let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&registry), platform, port));
        Self {
            registry,
            dispatcher,
        }
    }

    /// The transport variant this bridge was built on.
    pub fn platform(&self) -> Platform {
        self.dispatcher.platform()
    }

    /// Send an arbitrary command payload to the host. See
    /// [`Dispatcher::post`].
    pub fn post(&self, body: Value) -> Reply {
        self.dispatcher.post(body)
    }

    /// Feed one inbound event from the host into the bridge. Call this from
    /// the single message listener of your embedding environment.
    pub fn handle_event(&self, event: InboundEvent) {
        self.registry.resolve_or_reject(normalize_event(event));
    }

    /// Requests still awaiting a response.
    pub fn pending(&self) -> usize {
        self.registry.pending()
    }

    /// Build a size reporter that pushes through this bridge's dispatcher.
    pub fn dimension_reporter(&self, extent: Arc<dyn ContentExtent>) -> DimensionReporter {
        DimensionReporter::new(Arc::clone(&self.dispatcher), extent)
    }

    /// Fetch fields of the record the host currently has in context.
    pub fn get_data_for_current_object(&self, object: &str, field: &str) -> Reply {
        self.post(json!({
            "command": "getDataForObjectV2",
            "object": object,
            "fields": [field],
        }))
    }

    /// Fetch display labels for the given objects.
    pub fn get_object_labels(&self, objects: &[&str]) -> Reply {
        self.post(json!({
            "command": "getObjectLabels",
            "object": objects,
        }))
    }
}

static GLOBAL: OnceCell<Bridge> = OnceCell::new();

/// Install the process-wide bridge, creating it on first call.
///
/// Idempotent: once a bridge exists, later calls return it unchanged and
/// their arguments are ignored, mirroring the existence-guarded one-time
/// setup of page-global libraries.
pub fn init(profile: HostProfile, port: Arc<dyn HostPort>) -> &'static Bridge {
    GLOBAL.get_or_init(|| Bridge::new(profile, port))
}

/// The bridge installed by [`init`], if any.
pub fn global() -> Option<&'static Bridge> {
    GLOBAL.get()
}
