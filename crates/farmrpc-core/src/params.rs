//! Parameter groups and per-method parameter records
//!
//! Small field groups ([`Speed`], [`Position`], [`PinNumber`], ...) are the
//! building blocks. Each method's parameter record is the flat union of its
//! groups, and rejects unknown fields so that a record has exactly the
//! fields its groups declare.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Movement speed, as a percentage of the configured maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Speed {
    pub speed: u32,
}

/// A 3-axis coordinate, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinNumber {
    pub pin_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinValue {
    pub pin_value: i32,
}

/// Pin mode (0 = digital, 1 = analog on the reference firmware)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinMode {
    pub pin_mode: u8,
}

/// Axis a calibration run targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalibrationTarget {
    X,
    Y,
    Z,
}

impl CalibrationTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            CalibrationTarget::X => "x",
            CalibrationTarget::Y => "y",
            CalibrationTarget::Z => "z",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Target {
    pub target: CalibrationTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegimenId {
    pub regimen_id: u64,
}

/// `home_all`, `home_x`, `home_y`, `home_z`
pub type HomeParams = Speed;

/// `toggle_pin`
pub type TogglePinParams = PinNumber;

/// `start_regimen`, `stop_regimen`
pub type RegimenParams = RegimenId;

/// `calibrate`
pub type CalibrationParams = Target;

/// `move_absolute`, `move_relative`: [`Speed`] + [`Position`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MovementParams {
    pub speed: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MovementParams {
    pub fn new(speed: Speed, position: Position) -> Self {
        Self {
            speed: speed.speed,
            x: position.x,
            y: position.y,
            z: position.z,
        }
    }

    pub fn speed(&self) -> Speed {
        Speed { speed: self.speed }
    }

    pub fn position(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

/// `write_pin`: [`PinMode`] + [`PinValue`] + [`PinNumber`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WritePinParams {
    pub pin_mode: u8,
    pub pin_value: i32,
    pub pin_number: u32,
}

impl WritePinParams {
    pub fn new(mode: PinMode, value: PinValue, number: PinNumber) -> Self {
        Self {
            pin_mode: mode.pin_mode,
            pin_value: value.pin_value,
            pin_number: number.pin_number,
        }
    }

    pub fn pin_number(&self) -> PinNumber {
        PinNumber {
            pin_number: self.pin_number,
        }
    }
}

/// `exec_sequence`: an ordered list of opaque execution steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceParams {
    pub steps: Vec<Value>,
}

impl SequenceParams {
    pub fn new(steps: Vec<Value>) -> Self {
        Self { steps }
    }
}

// Configuration blobs are owned by the hardware-configuration subsystem;
// the protocol passes them through as JSON objects with typed key access.
macro_rules! object_payload {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Map<String, Value>);

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Get a typed value for `key`, or `None` if missing or of another type
            pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
                self.0
                    .get(key)
                    .and_then(|v| serde_json::from_value(v.clone()).ok())
            }

            /// Set `key` to a serializable value
            pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<(), serde_json::Error> {
                self.0.insert(key.to_string(), serde_json::to_value(value)?);
                Ok(())
            }

            /// Builder form of [`Self::set`]
            pub fn with<T: Serialize>(mut self, key: &str, value: T) -> Result<Self, serde_json::Error> {
                self.set(key, value)?;
                Ok(self)
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn as_map(&self) -> &Map<String, Value> {
                &self.0
            }

            pub fn into_map(self) -> Map<String, Value> {
                self.0
            }
        }

        impl From<Map<String, Value>> for $name {
            fn from(map: Map<String, Value>) -> Self {
                Self(map)
            }
        }
    };
}

object_payload!(
    /// Microcontroller parameters for `mcu_config_update`
    McuConfig
);

object_payload!(
    /// Bot configuration for `bot_config_update`
    BotConfig
);

object_payload!(
    /// Bot state tree carried by the `status_update` notification
    BotState
);
