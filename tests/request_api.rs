mod common;

use serde_json::json;

#[test]
fn get_data_for_current_object_builds_the_v2_payload() {
    let (bridge, port) = common::online_bridge();

    drop(bridge.get_data_for_current_object("Account", "Name"));

    let sent = port.single();
    let id = sent["messageId"].as_u64().expect("assigned id");
    assert_eq!(
        sent,
        json!({
            "command": "getDataForObjectV2",
            "object": "Account",
            "fields": ["Name"],
            "messageId": id,
        })
    );
}

#[test]
fn get_object_labels_passes_the_object_list_through() {
    let (bridge, port) = common::online_bridge();

    drop(bridge.get_object_labels(&["Account", "Contact"]));

    let sent = port.single();
    assert_eq!(sent["command"], "getObjectLabels");
    assert_eq!(sent["object"], json!(["Account", "Contact"]));
    assert!(sent["messageId"].is_u64());
}

#[test]
fn non_object_bodies_are_replaced_by_the_bare_id_envelope() {
    let (bridge, port) = common::online_bridge();

    drop(bridge.post(json!("ping")));

    let sent = port.single();
    let id = sent["messageId"].as_u64().expect("assigned id");
    assert_eq!(sent, json!({ "messageId": id }));
}

#[test]
fn every_outbound_message_carries_a_message_id() {
    let (bridge, port) = common::online_bridge();

    drop(bridge.post(json!({ "command": "getObjectLabels" })));
    drop(bridge.post(json!(null)));

    for (_, payload) in port.sent() {
        assert!(payload["messageId"].is_u64(), "missing id in {payload}");
    }
}
