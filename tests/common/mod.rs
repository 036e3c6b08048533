use std::sync::{Arc, Mutex};

use frame_messaging::{Bridge, ContentExtent, HostPort, HostProfile};
use serde_json::Value;

/// Which delivery hook a message went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)] // not every suite asserts on every channel
pub enum Channel {
    Notify,
    Webkit,
    Parent,
}

/// Host port double that records every delivery instead of sending it.
#[derive(Default)]
pub struct RecordingPort {
    sent: Mutex<Vec<(Channel, String)>>,
}

impl RecordingPort {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every recorded delivery, as (channel, parsed payload).
    #[allow(dead_code)]
    pub fn sent(&self) -> Vec<(Channel, Value)> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(channel, text)| {
                let payload = serde_json::from_str(text).expect("recorded payload is json");
                (*channel, payload)
            })
            .collect()
    }

    /// Payload of the only recorded delivery.
    #[allow(dead_code)]
    pub fn single(&self) -> Value {
        let sent = self.sent();
        assert_eq!(sent.len(), 1, "expected exactly one delivery");
        sent.into_iter().next().unwrap().1
    }

    /// The messageId injected into the delivery at `index`.
    #[allow(dead_code)]
    pub fn message_id(&self, index: usize) -> u64 {
        self.sent()[index]
            .1
            .get("messageId")
            .and_then(Value::as_u64)
            .expect("delivery carries a messageId")
    }
}

impl HostPort for RecordingPort {
    fn notify(&self, message: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((Channel::Notify, message.to_string()));
    }

    fn webkit_post(&self, message: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((Channel::Webkit, message.to_string()));
    }

    fn parent_post(&self, message: &str, target_origin: &str) {
        assert_eq!(target_origin, "*", "parent posts use the wildcard origin");
        self.sent
            .lock()
            .unwrap()
            .push((Channel::Parent, message.to_string()));
    }
}

/// Content extent double with a fixed height.
#[allow(dead_code)]
pub struct FixedExtent(pub f64);

impl ContentExtent for FixedExtent {
    fn content_height(&self) -> f64 {
        self.0
    }
}

/// A bridge over a plain online frame, plus its recording port.
#[allow(dead_code)]
pub fn online_bridge() -> (Bridge, Arc<RecordingPort>) {
    let port = RecordingPort::new();
    let bridge = Bridge::new(HostProfile::browser("MacIntel"), port.clone());
    (bridge, port)
}
