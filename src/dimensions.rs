//! Content-size reporting.
//!
//! The host frame cannot see how tall the embedded content is, so the bridge
//! pushes sizing messages outward whenever the observed size changes. This is
//! a one-way use of the dispatcher: the host adjusts the frame and never
//! replies, so each report's [`Reply`](crate::registry::Reply) is dropped on
//! the floor.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::transport::Dispatcher;

/// Probe for the scrollable element's content height, the analog of
/// `document.scrollingElement.offsetHeight`.
pub trait ContentExtent: Send + Sync {
    fn content_height(&self) -> f64;
}

#[derive(Serialize)]
struct FrameDimensions {
    height: f64,
}

/// Pushes `iframeDimensions` messages to the host on observed size changes.
///
/// Wire the embedding environment's resize observation to
/// [`Self::on_resize`]; the reporter reads the extent and sends only when
/// the height is non-zero, so transient zero-height layouts during load
/// never reach the host.
pub struct DimensionReporter {
    dispatcher: Arc<Dispatcher>,
    extent: Arc<dyn ContentExtent>,
}

impl DimensionReporter {
    pub fn new(dispatcher: Arc<Dispatcher>, extent: Arc<dyn ContentExtent>) -> Self {
        Self { dispatcher, extent }
    }

    /// Handle one observed size change.
    pub fn on_resize(&self) {
        let dimensions = FrameDimensions {
            height: self.extent.content_height(),
        };
        if dimensions.height != 0.0 {
            // Fire-and-forget: the host never answers this command.
            drop(self.dispatcher.post(json!({
                "command": "iframeDimensions",
                "iframeDimensions": dimensions,
            })));
        }
    }
}
