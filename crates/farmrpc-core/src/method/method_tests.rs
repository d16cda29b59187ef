#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn Method___all___names_are_unique() {
    let mut names: Vec<&str> = Method::ALL.iter().map(|m| m.as_str()).collect();
    names.sort_unstable();
    names.dedup();

    assert_eq!(names.len(), Method::ALL.len());
}

#[test]
fn Method___from_str___roundtrips_every_name() {
    for method in Method::ALL {
        assert_eq!(method.as_str().parse::<Method>().unwrap(), method);
    }
}

#[test_case("water_plants")]
#[test_case("")]
#[test_case("HOME_ALL")]
#[test_case("home_w")]
#[test_case("emergency_lock ")]
fn Method___from_str___rejects_names_outside_the_set(name: &str) {
    let err = name.parse::<Method>().unwrap_err();

    assert_eq!(err, RpcError::UnknownMethod(name.to_string()));
}

#[test_case(Method::HomeX, "home_x")]
#[test_case(Method::McuConfigUpdate, "mcu_config_update")]
#[test_case(Method::CheckArduinoUpdates, "check_arduino_updates")]
#[test_case(Method::Sync, "sync")]
fn Method___as_str___returns_wire_name(method: Method, expected: &str) {
    assert_eq!(method.as_str(), expected);
    assert_eq!(method.to_string(), expected);
}

#[test]
fn Method___is_notification_only___only_for_status_update() {
    let only: Vec<Method> = Method::ALL
        .into_iter()
        .filter(|m| m.is_notification_only())
        .collect();

    assert_eq!(only, vec![Method::StatusUpdate]);
}

#[test]
fn Method___returns_payload___only_for_reads() {
    let payload: Vec<Method> = Method::ALL
        .into_iter()
        .filter(|m| m.returns_payload())
        .collect();

    assert_eq!(payload, vec![Method::ReadStatus, Method::Sync]);
}

#[test_case(Method::EmergencyLock, false)]
#[test_case(Method::PowerOff, false)]
#[test_case(Method::ReadStatus, false)]
#[test_case(Method::HomeAll, true)]
#[test_case(Method::Calibrate, true)]
#[test_case(Method::ExecSequence, true)]
#[test_case(Method::StatusUpdate, true)]
fn Method___takes_params___matches_schema(method: Method, expected: bool) {
    assert_eq!(method.takes_params(), expected);
}

#[test]
fn Method___serde___uses_wire_name() {
    let json = serde_json::to_string(&Method::MoveRelative).unwrap();
    let back: Method = serde_json::from_str(&json).unwrap();

    assert_eq!(json, r#""move_relative""#);
    assert_eq!(back, Method::MoveRelative);
}

#[test]
fn Method___deserialize___rejects_unknown_name() {
    let result = serde_json::from_str::<Method>(r#""fly""#);

    assert!(result.unwrap_err().to_string().contains("unknown method: fly"));
}
