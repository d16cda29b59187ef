//! Typed commands: one variant per method, carrying its parameter record

use crate::error::{RpcError, RpcResult};
use crate::method::Method;
use crate::params::{
    BotConfig, BotState, CalibrationParams, HomeParams, McuConfig, MovementParams, RegimenParams,
    SequenceParams, TogglePinParams, WritePinParams,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// A method invocation with its decoded parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    EmergencyLock,
    EmergencyUnlock,
    ExecSequence(SequenceParams),
    HomeAll(HomeParams),
    HomeX(HomeParams),
    HomeY(HomeParams),
    HomeZ(HomeParams),
    MoveAbsolute(MovementParams),
    MoveRelative(MovementParams),
    WritePin(WritePinParams),
    ReadStatus,
    Sync,
    McuConfigUpdate(McuConfig),
    BotConfigUpdate(BotConfig),
    StatusUpdate(BotState),
    CheckUpdates,
    CheckArduinoUpdates,
    PowerOff,
    Reboot,
    TogglePin(TogglePinParams),
    StartRegimen(RegimenParams),
    StopRegimen(RegimenParams),
    Calibrate(CalibrationParams),
}

impl Command {
    pub fn method(&self) -> Method {
        match self {
            Command::EmergencyLock => Method::EmergencyLock,
            Command::EmergencyUnlock => Method::EmergencyUnlock,
            Command::ExecSequence(_) => Method::ExecSequence,
            Command::HomeAll(_) => Method::HomeAll,
            Command::HomeX(_) => Method::HomeX,
            Command::HomeY(_) => Method::HomeY,
            Command::HomeZ(_) => Method::HomeZ,
            Command::MoveAbsolute(_) => Method::MoveAbsolute,
            Command::MoveRelative(_) => Method::MoveRelative,
            Command::WritePin(_) => Method::WritePin,
            Command::ReadStatus => Method::ReadStatus,
            Command::Sync => Method::Sync,
            Command::McuConfigUpdate(_) => Method::McuConfigUpdate,
            Command::BotConfigUpdate(_) => Method::BotConfigUpdate,
            Command::StatusUpdate(_) => Method::StatusUpdate,
            Command::CheckUpdates => Method::CheckUpdates,
            Command::CheckArduinoUpdates => Method::CheckArduinoUpdates,
            Command::PowerOff => Method::PowerOff,
            Command::Reboot => Method::Reboot,
            Command::TogglePin(_) => Method::TogglePin,
            Command::StartRegimen(_) => Method::StartRegimen,
            Command::StopRegimen(_) => Method::StopRegimen,
            Command::Calibrate(_) => Method::Calibrate,
        }
    }

    /// Encode the positional parameter list.
    ///
    /// Parameterless methods produce `[]`; all others a one-element array
    /// holding the parameter object.
    pub fn params(&self) -> RpcResult<Value> {
        let param = match self {
            Command::EmergencyLock
            | Command::EmergencyUnlock
            | Command::ReadStatus
            | Command::Sync
            | Command::CheckUpdates
            | Command::CheckArduinoUpdates
            | Command::PowerOff
            | Command::Reboot => return Ok(Value::Array(Vec::new())),
            Command::ExecSequence(p) => to_object(p)?,
            Command::HomeAll(p) | Command::HomeX(p) | Command::HomeY(p) | Command::HomeZ(p) => {
                to_object(p)?
            }
            Command::MoveAbsolute(p) | Command::MoveRelative(p) => {
                // JSON has no NaN or infinity; serde_json would write null
                if ![p.x, p.y, p.z].iter().all(|c| c.is_finite()) {
                    return Err(RpcError::param_mismatch(
                        self.method(),
                        "coordinates must be finite",
                    ));
                }
                to_object(p)?
            }
            Command::WritePin(p) => to_object(p)?,
            Command::McuConfigUpdate(p) => to_object(p)?,
            Command::BotConfigUpdate(p) => to_object(p)?,
            Command::StatusUpdate(p) => to_object(p)?,
            Command::TogglePin(p) => to_object(p)?,
            Command::StartRegimen(p) | Command::StopRegimen(p) => to_object(p)?,
            Command::Calibrate(p) => to_object(p)?,
        };
        Ok(Value::Array(vec![param]))
    }

    /// Build a command from a method and its positional parameter list.
    ///
    /// Parameterless methods ignore whatever list they are given.
    pub fn from_params(method: Method, params: Vec<Value>) -> RpcResult<Self> {
        if method.takes_params() {
            with_params(method, params)
        } else {
            without_params(method)
        }
    }
}

fn without_params(method: Method) -> RpcResult<Command> {
    let command = match method {
        Method::EmergencyLock => Command::EmergencyLock,
        Method::EmergencyUnlock => Command::EmergencyUnlock,
        Method::ReadStatus => Command::ReadStatus,
        Method::Sync => Command::Sync,
        Method::CheckUpdates => Command::CheckUpdates,
        Method::CheckArduinoUpdates => Command::CheckArduinoUpdates,
        Method::PowerOff => Command::PowerOff,
        Method::Reboot => Command::Reboot,
        other => {
            return Err(RpcError::Internal(format!(
                "{other} has no parameterless form"
            )));
        }
    };
    Ok(command)
}

fn with_params(method: Method, params: Vec<Value>) -> RpcResult<Command> {
    let command = match method {
        Method::ExecSequence => Command::ExecSequence(single(method, params)?),
        Method::HomeAll => Command::HomeAll(single(method, params)?),
        Method::HomeX => Command::HomeX(single(method, params)?),
        Method::HomeY => Command::HomeY(single(method, params)?),
        Method::HomeZ => Command::HomeZ(single(method, params)?),
        Method::MoveAbsolute => Command::MoveAbsolute(single(method, params)?),
        Method::MoveRelative => Command::MoveRelative(single(method, params)?),
        Method::WritePin => Command::WritePin(single(method, params)?),
        Method::McuConfigUpdate => Command::McuConfigUpdate(single(method, params)?),
        Method::BotConfigUpdate => Command::BotConfigUpdate(single(method, params)?),
        Method::StatusUpdate => Command::StatusUpdate(single(method, params)?),
        Method::TogglePin => Command::TogglePin(single(method, params)?),
        Method::StartRegimen => Command::StartRegimen(single(method, params)?),
        Method::StopRegimen => Command::StopRegimen(single(method, params)?),
        Method::Calibrate => Command::Calibrate(single(method, params)?),
        other => {
            return Err(RpcError::Internal(format!(
                "{other} takes no parameter object"
            )));
        }
    };
    Ok(command)
}

fn to_object<T: Serialize>(value: &T) -> RpcResult<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Deserialize the only element of `params` as `T`.
///
/// The element must be a JSON object; serde would otherwise accept a
/// positional array for a struct.
fn single<T: DeserializeOwned>(method: Method, params: Vec<Value>) -> RpcResult<T> {
    let arity = params.len();
    let mut params = params.into_iter();
    let value = match (params.next(), arity) {
        (Some(value), 1) => value,
        (_, 0) => {
            return Err(RpcError::param_mismatch(
                method,
                "expected one parameter object, got none",
            ));
        }
        _ => {
            return Err(RpcError::param_mismatch(
                method,
                format!("expected one parameter object, got {arity}"),
            ));
        }
    };

    if !value.is_object() {
        return Err(RpcError::param_mismatch(
            method,
            "parameter must be a JSON object",
        ));
    }

    serde_json::from_value(value).map_err(|e| RpcError::param_mismatch(method, e.to_string()))
}

#[cfg(test)]
#[path = "command/command_tests.rs"]
mod command_tests;
