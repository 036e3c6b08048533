//! Inbound event normalization.
//!
//! The platforms hand responses back in different shapes: a message event
//! whose `data` is JSON text, a message event whose `data` is already
//! structured, or a bare string the container delivers directly. All of them
//! are normalized into one `Value` before correlation; anything unparseable
//! degrades to an empty object (logged, never thrown), which then misses the
//! registry harmlessly.

use serde_json::{Map, Value};
use tracing::warn;

/// Payload carried by a message event.
#[derive(Debug, Clone)]
pub enum EventData {
    /// JSON text still to be parsed.
    Text(String),
    /// Already-structured payload.
    Structured(Value),
}

/// An inbound event as the embedding container delivers it.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    /// A message event with a `data` payload (the cross-window shape).
    Message(EventData),
    /// A bare string whose parsed form wraps the payload in a `data` field
    /// (the native-container shape).
    Text(String),
}

fn empty() -> Value {
    Value::Object(Map::new())
}

/// Normalize an inbound event into a response object, best effort.
pub fn normalize_event(event: InboundEvent) -> Value {
    match event {
        InboundEvent::Message(EventData::Structured(value)) => value,
        InboundEvent::Message(EventData::Text(text)) => match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                warn!("failed to parse message data: {err}");
                empty()
            }
        },
        InboundEvent::Text(text) => match serde_json::from_str::<Value>(&text) {
            Ok(mut value) => match value.get_mut("data") {
                Some(data) => data.take(),
                None => {
                    warn!("inbound text has no data field");
                    empty()
                }
            },
            Err(err) => {
                warn!("failed to parse inbound text: {err}");
                empty()
            }
        },
    }
}
