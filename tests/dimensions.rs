mod common;

use std::sync::Arc;

use common::FixedExtent;
use serde_json::json;

#[test]
fn zero_height_never_dispatches() {
    let (bridge, port) = common::online_bridge();
    let reporter = bridge.dimension_reporter(Arc::new(FixedExtent(0.0)));

    reporter.on_resize();
    reporter.on_resize();

    assert!(port.sent().is_empty());
    assert_eq!(bridge.pending(), 0);
}

#[test]
fn non_zero_height_dispatches_exactly_once_per_observation() {
    let (bridge, port) = common::online_bridge();
    let reporter = bridge.dimension_reporter(Arc::new(FixedExtent(480.0)));

    reporter.on_resize();
    reporter.on_resize();

    let sent = port.sent();
    assert_eq!(sent.len(), 2, "one dispatch per observed change");
    for (_, payload) in &sent {
        assert_eq!(payload["command"], "iframeDimensions");
        assert_eq!(payload["iframeDimensions"], json!({ "height": 480.0 }));
        assert!(payload["messageId"].is_u64());
    }
}

#[test]
fn reports_are_fire_and_forget() {
    let (bridge, _port) = common::online_bridge();
    let reporter = bridge.dimension_reporter(Arc::new(FixedExtent(480.0)));

    // The dropped reply leaves its registry entry behind; the host never
    // answers this command, so the entry is a knowing write-off.
    reporter.on_resize();
    assert_eq!(bridge.pending(), 1);
}
