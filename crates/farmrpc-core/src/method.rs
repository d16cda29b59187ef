//! The closed set of bot methods

use crate::error::RpcError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Every method the bot understands.
///
/// The set is closed: a name outside it is rejected with
/// [`RpcError::UnknownMethod`] before any handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    EmergencyLock,
    EmergencyUnlock,
    ExecSequence,
    HomeAll,
    HomeX,
    HomeY,
    HomeZ,
    MoveAbsolute,
    MoveRelative,
    WritePin,
    ReadStatus,
    Sync,
    McuConfigUpdate,
    BotConfigUpdate,
    StatusUpdate,
    CheckUpdates,
    CheckArduinoUpdates,
    PowerOff,
    Reboot,
    TogglePin,
    StartRegimen,
    StopRegimen,
    Calibrate,
}

impl Method {
    /// All methods, in declaration order
    pub const ALL: [Method; 23] = [
        Method::EmergencyLock,
        Method::EmergencyUnlock,
        Method::ExecSequence,
        Method::HomeAll,
        Method::HomeX,
        Method::HomeY,
        Method::HomeZ,
        Method::MoveAbsolute,
        Method::MoveRelative,
        Method::WritePin,
        Method::ReadStatus,
        Method::Sync,
        Method::McuConfigUpdate,
        Method::BotConfigUpdate,
        Method::StatusUpdate,
        Method::CheckUpdates,
        Method::CheckArduinoUpdates,
        Method::PowerOff,
        Method::Reboot,
        Method::TogglePin,
        Method::StartRegimen,
        Method::StopRegimen,
        Method::Calibrate,
    ];

    /// Wire name of the method
    pub fn as_str(self) -> &'static str {
        match self {
            Method::EmergencyLock => "emergency_lock",
            Method::EmergencyUnlock => "emergency_unlock",
            Method::ExecSequence => "exec_sequence",
            Method::HomeAll => "home_all",
            Method::HomeX => "home_x",
            Method::HomeY => "home_y",
            Method::HomeZ => "home_z",
            Method::MoveAbsolute => "move_absolute",
            Method::MoveRelative => "move_relative",
            Method::WritePin => "write_pin",
            Method::ReadStatus => "read_status",
            Method::Sync => "sync",
            Method::McuConfigUpdate => "mcu_config_update",
            Method::BotConfigUpdate => "bot_config_update",
            Method::StatusUpdate => "status_update",
            Method::CheckUpdates => "check_updates",
            Method::CheckArduinoUpdates => "check_arduino_updates",
            Method::PowerOff => "power_off",
            Method::Reboot => "reboot",
            Method::TogglePin => "toggle_pin",
            Method::StartRegimen => "start_regimen",
            Method::StopRegimen => "stop_regimen",
            Method::Calibrate => "calibrate",
        }
    }

    /// Whether the method carries a parameter object.
    ///
    /// Methods without one accept any (or no) parameter list and always
    /// encode an empty one.
    pub fn takes_params(self) -> bool {
        !matches!(
            self,
            Method::EmergencyLock
                | Method::EmergencyUnlock
                | Method::ReadStatus
                | Method::Sync
                | Method::CheckUpdates
                | Method::CheckArduinoUpdates
                | Method::PowerOff
                | Method::Reboot
        )
    }

    /// Whether the method may only travel as a notification
    pub fn is_notification_only(self) -> bool {
        matches!(self, Method::StatusUpdate)
    }

    /// Whether a successful call returns a payload rather than an acknowledgement
    pub fn returns_payload(self) -> bool {
        matches!(self, Method::ReadStatus | Method::Sync)
    }
}

impl FromStr for Method {
    type Err = RpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| RpcError::UnknownMethod(s.to_string()))
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "method/method_tests.rs"]
mod method_tests;
