use rollup_anchor_client::parse_call_tracer_json;
use rollup_types::CallKind;
use serde_json::json;

#[test]
fn parses_nested_call_tracer_frame() {
    let raw = json!({
        "type": "CALL",
        "from": "0x0000000000000000000000000000000000000001",
        "to": "0x0000000000000000000000000000000000000002",
        "input": "0x1234",
        "value": "0x0",
        "gas": "0x5208",
        "calls": [
            {
                "type": "STATICCALL",
                "from": "0x0000000000000000000000000000000000000002",
                "to": "0x0000000000000000000000000000000000000003",
                "input": "0x",
                "gas": "0x100",
            }
        ]
    });

    let trace = parse_call_tracer_json(&raw).expect("valid frame");
    assert_eq!(trace.kind, CallKind::Call);
    assert_eq!(trace.children.len(), 1);
    assert_eq!(trace.children[0].kind, CallKind::StaticCall);
    assert_eq!(trace.children[0].gas, 0x100);
    assert!(trace.children[0].children.is_empty());
}

#[test]
fn rejects_unknown_frame_kind() {
    let raw = json!({
        "type": "SELFDESTRUCT2000",
        "from": "0x0000000000000000000000000000000000000001",
    });

    assert!(parse_call_tracer_json(&raw).is_err());
}

#[test]
fn reverted_detection_propagates_from_children() {
    let raw = json!({
        "type": "CALL",
        "from": "0x0000000000000000000000000000000000000001",
        "to": "0x0000000000000000000000000000000000000002",
        "input": "0x",
        "calls": [
            {
                "type": "CALL",
                "from": "0x0000000000000000000000000000000000000002",
                "to": "0x0000000000000000000000000000000000000003",
                "input": "0x",
                "error": "execution reverted",
            }
        ]
    });

    let trace = parse_call_tracer_json(&raw).expect("valid frame");
    assert!(!trace.reverted());
    assert!(trace.children[0].reverted());
}
