//! Property-based tests for the JSON-RPC codec
//!
//! Every message the codec produces must decode back to an equal message,
//! and method names outside the closed set must always be rejected.

use farmrpc_core::params::{
    BotConfig, BotState, CalibrationTarget, McuConfig, MovementParams, PinNumber, RegimenId,
    SequenceParams, Speed, Target, WritePinParams,
};
use farmrpc_core::{
    Command, ErrorObject, Message, Method, Notification, Request, RequestId, Response, RpcError,
};
use farmrpc_transport::{Codec, JsonCodec};
use proptest::prelude::*;
use serde_json::{Map, Value};

// Strategy: finite coordinates (NaN/inf cannot be represented in JSON)
fn arb_coord() -> impl Strategy<Value = f64> {
    -10_000.0f64..10_000.0
}

fn arb_json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|i| Value::Number(i.into())),
        "[a-z]{0,12}".prop_map(Value::String),
    ]
}

fn arb_object() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-z_]{1,16}", arb_json_leaf(), 0..8)
        .prop_map(|m| m.into_iter().collect())
}

fn arb_request_id() -> impl Strategy<Value = RequestId> {
    prop_oneof![
        any::<i64>().prop_map(RequestId::Num),
        "[a-zA-Z0-9-]{1,36}".prop_map(RequestId::Str),
    ]
}

fn arb_target() -> impl Strategy<Value = CalibrationTarget> {
    prop_oneof![
        Just(CalibrationTarget::X),
        Just(CalibrationTarget::Y),
        Just(CalibrationTarget::Z),
    ]
}

fn arb_command_for(method: Method) -> BoxedStrategy<Command> {
    let movement = (any::<u32>(), arb_coord(), arb_coord(), arb_coord())
        .prop_map(|(speed, x, y, z)| MovementParams { speed, x, y, z });
    let speed = any::<u32>().prop_map(|speed| Speed { speed });
    match method {
        Method::EmergencyLock => Just(Command::EmergencyLock).boxed(),
        Method::EmergencyUnlock => Just(Command::EmergencyUnlock).boxed(),
        Method::ReadStatus => Just(Command::ReadStatus).boxed(),
        Method::Sync => Just(Command::Sync).boxed(),
        Method::CheckUpdates => Just(Command::CheckUpdates).boxed(),
        Method::CheckArduinoUpdates => Just(Command::CheckArduinoUpdates).boxed(),
        Method::PowerOff => Just(Command::PowerOff).boxed(),
        Method::Reboot => Just(Command::Reboot).boxed(),
        Method::HomeAll => speed.prop_map(Command::HomeAll).boxed(),
        Method::HomeX => speed.prop_map(Command::HomeX).boxed(),
        Method::HomeY => speed.prop_map(Command::HomeY).boxed(),
        Method::HomeZ => speed.prop_map(Command::HomeZ).boxed(),
        Method::MoveAbsolute => movement.prop_map(Command::MoveAbsolute).boxed(),
        Method::MoveRelative => movement.prop_map(Command::MoveRelative).boxed(),
        Method::WritePin => (any::<u8>(), any::<i32>(), any::<u32>())
            .prop_map(|(pin_mode, pin_value, pin_number)| {
                Command::WritePin(WritePinParams {
                    pin_mode,
                    pin_value,
                    pin_number,
                })
            })
            .boxed(),
        Method::TogglePin => any::<u32>()
            .prop_map(|pin_number| Command::TogglePin(PinNumber { pin_number }))
            .boxed(),
        Method::StartRegimen => any::<u64>()
            .prop_map(|regimen_id| Command::StartRegimen(RegimenId { regimen_id }))
            .boxed(),
        Method::StopRegimen => any::<u64>()
            .prop_map(|regimen_id| Command::StopRegimen(RegimenId { regimen_id }))
            .boxed(),
        Method::Calibrate => arb_target()
            .prop_map(|target| Command::Calibrate(Target { target }))
            .boxed(),
        Method::ExecSequence => prop::collection::vec(arb_json_leaf(), 0..10)
            .prop_map(|steps| Command::ExecSequence(SequenceParams::new(steps)))
            .boxed(),
        Method::McuConfigUpdate => arb_object()
            .prop_map(|m| Command::McuConfigUpdate(McuConfig::from(m)))
            .boxed(),
        Method::BotConfigUpdate => arb_object()
            .prop_map(|m| Command::BotConfigUpdate(BotConfig::from(m)))
            .boxed(),
        Method::StatusUpdate => arb_object()
            .prop_map(|m| Command::StatusUpdate(BotState::from(m)))
            .boxed(),
    }
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop::sample::select(Method::ALL.to_vec()).prop_flat_map(arb_command_for)
}

proptest! {
    /// Property: any request decodes back to an equal request
    #[test]
    fn proptest_request_roundtrip(id in arb_request_id(), command in arb_command()) {
        let codec = JsonCodec::new();
        let message: Message = Request { id, command }.into();

        let text = codec.encode(&message).expect("encoding should succeed");
        let decoded = codec.decode(&text).expect("decoding own output should succeed");

        prop_assert_eq!(decoded, message);
    }

    /// Property: any notification decodes back to an equal notification
    #[test]
    fn proptest_notification_roundtrip(command in arb_command()) {
        let codec = JsonCodec::new();
        let message: Message = Notification::new(command).into();

        let text = codec.encode(&message).expect("encoding should succeed");
        let decoded = codec.decode(&text).expect("decoding own output should succeed");

        prop_assert_eq!(decoded, message);
    }

    /// Property: responses keep their id and outcome
    #[test]
    fn proptest_response_roundtrip(
        id in prop::option::of(arb_request_id()),
        payload in arb_json_leaf(),
        code in any::<i32>(),
        failed in any::<bool>(),
    ) {
        let codec = JsonCodec::new();
        let response = if failed {
            Response::error(id, ErrorObject::new(i64::from(code), "failure"))
        } else {
            Response { id, outcome: farmrpc_core::Outcome::Result(payload) }
        };
        let message: Message = response.into();

        let text = codec.encode(&message).expect("encoding should succeed");
        let decoded = codec.decode(&text).expect("decoding own output should succeed");

        prop_assert_eq!(decoded, message);
    }

    /// Property: encoding is canonical (stable under decode/encode)
    #[test]
    fn proptest_encoding_is_stable(id in arb_request_id(), command in arb_command()) {
        let codec = JsonCodec::new();
        let message: Message = Request { id, command }.into();

        let first = codec.encode(&message).expect("encoding should succeed");
        let second = codec
            .encode(&codec.decode(&first).expect("decoding should succeed"))
            .expect("re-encoding should succeed");

        prop_assert_eq!(first, second);
    }

    /// Property: method names outside the closed set are rejected as unknown
    #[test]
    fn proptest_unknown_method_rejected(name in "[a-z_]{1,24}") {
        prop_assume!(name.parse::<Method>().is_err());
        let codec = JsonCodec::new();
        let text = format!(r#"{{"jsonrpc":"2.0","id":"1","method":"{name}","params":[]}}"#);

        let err = codec.decode(&text).expect_err("unknown method must not decode");

        prop_assert_eq!(err.error, RpcError::UnknownMethod(name));
    }

    /// Property: calibration targets outside x/y/z are shape mismatches
    #[test]
    fn proptest_bad_calibration_target_rejected(target in "[a-z]{0,4}") {
        prop_assume!(!matches!(target.as_str(), "x" | "y" | "z"));
        let codec = JsonCodec::new();
        let text = format!(
            r#"{{"jsonrpc":"2.0","id":"1","method":"calibrate","params":[{{"target":"{target}"}}]}}"#
        );

        let err = codec.decode(&text).expect_err("bad target must not decode");

        let is_shape_mismatch = matches!(
            err.error,
            RpcError::ParamShapeMismatch { method: Method::Calibrate, .. }
        );
        prop_assert!(is_shape_mismatch);
    }

    /// Property: arbitrary text never panics the decoder
    #[test]
    fn proptest_decode_never_panics(raw in ".{0,200}") {
        let _ = JsonCodec::new().decode(&raw);
    }
}
