#![allow(non_snake_case)]

use super::*;
use crate::params::{CalibrationTarget, Position, Speed, Target};
use serde_json::json;
use test_case::test_case;

fn sample(method: Method) -> Command {
    let speed = Speed { speed: 100 };
    let movement = MovementParams::new(speed, Position { x: 1.0, y: 2.0, z: 3.0 });
    match method {
        Method::EmergencyLock => Command::EmergencyLock,
        Method::EmergencyUnlock => Command::EmergencyUnlock,
        Method::ExecSequence => Command::ExecSequence(SequenceParams::new(vec![json!({"kind": "wait"})])),
        Method::HomeAll => Command::HomeAll(speed),
        Method::HomeX => Command::HomeX(speed),
        Method::HomeY => Command::HomeY(speed),
        Method::HomeZ => Command::HomeZ(speed),
        Method::MoveAbsolute => Command::MoveAbsolute(movement),
        Method::MoveRelative => Command::MoveRelative(movement),
        Method::WritePin => Command::WritePin(WritePinParams {
            pin_mode: 0,
            pin_value: 1,
            pin_number: 5,
        }),
        Method::ReadStatus => Command::ReadStatus,
        Method::Sync => Command::Sync,
        Method::McuConfigUpdate => {
            Command::McuConfigUpdate(McuConfig::new().with("encoder_enabled_x", 1).unwrap())
        }
        Method::BotConfigUpdate => {
            Command::BotConfigUpdate(BotConfig::new().with("os_auto_update", false).unwrap())
        }
        Method::StatusUpdate => Command::StatusUpdate(BotState::new().with("location", [0, 0, 0]).unwrap()),
        Method::CheckUpdates => Command::CheckUpdates,
        Method::CheckArduinoUpdates => Command::CheckArduinoUpdates,
        Method::PowerOff => Command::PowerOff,
        Method::Reboot => Command::Reboot,
        Method::TogglePin => Command::TogglePin(TogglePinParams { pin_number: 13 }),
        Method::StartRegimen => Command::StartRegimen(RegimenParams { regimen_id: 9 }),
        Method::StopRegimen => Command::StopRegimen(RegimenParams { regimen_id: 9 }),
        Method::Calibrate => Command::Calibrate(Target {
            target: CalibrationTarget::Y,
        }),
    }
}

fn as_vec(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => panic!("expected array, got {other}"),
    }
}

#[test]
fn Command___params_then_from_params___reproduces_every_method() {
    for method in Method::ALL {
        let command = sample(method);

        let params = as_vec(command.params().unwrap());
        let decoded = Command::from_params(method, params).unwrap();

        assert_eq!(decoded, command, "{method}");
        assert_eq!(decoded.method(), method);
    }
}

#[test]
fn Command___params___is_empty_for_parameterless_methods() {
    for method in Method::ALL.into_iter().filter(|m| !m.takes_params()) {
        assert_eq!(sample(method).params().unwrap(), json!([]), "{method}");
    }
}

#[test]
fn Command___params___wraps_object_in_one_element_array() {
    let command = sample(Method::WritePin);

    assert_eq!(
        command.params().unwrap(),
        json!([{"pin_mode": 0, "pin_value": 1, "pin_number": 5}])
    );
}

#[test]
fn Command___from_params___ignores_params_of_parameterless_method() {
    let command = Command::from_params(Method::Reboot, vec![json!({"anything": true})]).unwrap();

    assert_eq!(command, Command::Reboot);
}

#[test_case(vec![] ; "no parameter object")]
#[test_case(vec![json!({"speed": 1}), json!({"speed": 2})] ; "two parameter objects")]
#[test_case(vec![json!([100])] ; "positional array instead of object")]
#[test_case(vec![json!(100)] ; "bare number")]
#[test_case(vec![json!({"speed": "max"})] ; "wrong field type")]
#[test_case(vec![json!({})] ; "missing field")]
#[test_case(vec![json!({"speed": 1, "x": 0})] ; "extra field")]
fn Command___from_params___rejects_bad_home_params(params: Vec<Value>) {
    let err = Command::from_params(Method::HomeAll, params).unwrap_err();

    assert!(
        matches!(err, RpcError::ParamShapeMismatch { method: Method::HomeAll, .. }),
        "{err}"
    );
}

#[test_case("x")]
#[test_case("y")]
#[test_case("z")]
fn Command___from_params___accepts_calibration_axes(tag: &str) {
    let command = Command::from_params(Method::Calibrate, vec![json!({"target": tag})]);

    assert!(command.is_ok());
}

#[test_case("w")]
#[test_case("xy")]
#[test_case("Z")]
fn Command___from_params___rejects_calibration_target_outside_axes(tag: &str) {
    let err = Command::from_params(Method::Calibrate, vec![json!({"target": tag})]).unwrap_err();

    assert!(matches!(
        err,
        RpcError::ParamShapeMismatch {
            method: Method::Calibrate,
            ..
        }
    ));
}

#[test]
fn Command___from_params___rejects_config_update_that_is_not_an_object() {
    let err = Command::from_params(Method::McuConfigUpdate, vec![json!("reset")]).unwrap_err();

    assert!(err.to_string().contains("JSON object"));
}

#[test]
fn Command___from_params___follows_takes_params_for_every_method() {
    for method in Method::ALL {
        let result = Command::from_params(method, Vec::new());

        if method.takes_params() {
            assert!(
                matches!(result, Err(RpcError::ParamShapeMismatch { .. })),
                "{method}"
            );
        } else {
            assert_eq!(result.unwrap().method(), method);
        }
    }
}

#[test_case(f64::NAN, 0.0, 0.0 ; "nan x")]
#[test_case(0.0, f64::INFINITY, 0.0 ; "infinite y")]
#[test_case(0.0, 0.0, f64::NEG_INFINITY ; "negative infinite z")]
fn Command___params_non_finite_coordinate___is_rejected(x: f64, y: f64, z: f64) {
    let movement = MovementParams::new(Speed { speed: 10 }, Position { x, y, z });

    for command in [Command::MoveAbsolute(movement), Command::MoveRelative(movement)] {
        let err = command.params().unwrap_err();

        assert!(
            matches!(err, RpcError::ParamShapeMismatch { .. }),
            "{err}"
        );
        assert!(err.to_string().contains("finite"), "{err}");
    }
}
