#![allow(non_snake_case)]

use super::*;
use serde_json::json;

#[test]
fn summarize___request___shows_typed_params() {
    let raw = r#"{"jsonrpc":"2.0","id":"42","method":"move_absolute","params":[{"speed":100,"x":1.0,"y":2.0,"z":3.0}]}"#;

    let summary = summarize(raw).unwrap();

    assert_eq!(summary.kind, "request");
    assert_eq!(summary.id, Some(json!("42")));
    assert_eq!(summary.method.as_deref(), Some("move_absolute"));
    assert_eq!(
        summary.params,
        Some(json!([{"speed": 100, "x": 1.0, "y": 2.0, "z": 3.0}]))
    );
}

#[test]
fn summarize___notification___has_no_id() {
    let summary = summarize(r#"{"jsonrpc":"2.0","method":"emergency_lock"}"#).unwrap();

    assert_eq!(summary.kind, "notification");
    assert!(summary.id.is_none());
    assert_eq!(summary.params, Some(json!([])));
}

#[test]
fn summarize___error_response___shows_error() {
    let raw = r#"{"jsonrpc":"2.0","id":7,"error":{"code":-32601,"message":"unknown method: fly"}}"#;

    let summary = summarize(raw).unwrap();

    assert_eq!(summary.kind, "response");
    assert_eq!(summary.id, Some(json!(7)));
    assert_eq!(summary.error.unwrap()["code"], json!(-32601));
}

#[test]
fn summarize___unknown_method___includes_nack() {
    let raw = r#"{"jsonrpc":"2.0","id":"1","method":"fly","params":[]}"#;

    let err = summarize(raw).unwrap_err();

    let text = err.to_string();
    assert!(text.contains("unknown method: fly"));
    assert!(text.contains(r#""id":"1""#));
}

#[test]
fn summarize___bad_notification___says_no_reply() {
    let err = summarize(r#"{"jsonrpc":"2.0","method":"fly"}"#).unwrap_err();

    assert!(err.to_string().contains("no reply"));
}

#[test]
fn read_input___literal___is_returned_verbatim() {
    assert_eq!(read_input("{}").unwrap(), "{}");
}
