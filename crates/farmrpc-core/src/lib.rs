//! farmrpc-core - Method schema, message model and error taxonomy
//!
//! This crate provides the foundational types of the bot protocol:
//! - [`Method`], the closed set of method names
//! - Parameter groups and per-method records in [`params`]
//! - [`Command`], one variant per method with its parameters
//! - [`Message`], [`Request`], [`Response`] and [`Notification`]
//! - [`RpcError`] and the JSON-RPC [`ErrorObject`]
//! - [`DispatcherConfig`]

mod command;
mod config;
mod error;
mod message;
mod method;
pub mod params;

pub use command::Command;
pub use config::DispatcherConfig;
pub use error::{
    DUPLICATE_ID, ErrorObject, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, INVALID_USAGE,
    METHOD_NOT_FOUND, NO_HANDLER, RpcError, RpcResult, TIMEOUT,
};
pub use message::{Message, Notification, Outcome, Request, RequestId, Response};
pub use method::Method;

/// Log levels understood by configuration and the logging crate
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::params::*;
    pub use crate::{
        Command, DispatcherConfig, ErrorObject, LogLevel, Message, Method, Notification,
        Outcome, Request, RequestId, Response, RpcError, RpcResult,
    };
}

#[cfg(test)]
mod lib_tests;
