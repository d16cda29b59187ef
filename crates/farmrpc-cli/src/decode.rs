//! Decode command implementation

use anyhow::{Context, Result, anyhow};
use farmrpc::{Codec, JsonCodec, Message, Outcome};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;

/// Typed view of a decoded message
#[derive(Debug, Serialize, PartialEq)]
pub struct Summary {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// Read the raw message argument, `-` meaning stdin
pub fn read_input(input: &str) -> Result<String> {
    if input != "-" {
        return Ok(input.to_string());
    }
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read stdin")?;
    Ok(raw)
}

/// Decode and describe a message
///
/// Rejected input fails with the error response a receiver would send.
pub fn summarize(raw: &str) -> Result<Summary> {
    let codec = JsonCodec::new();
    let message = codec.decode(raw.trim()).map_err(|err| match err.to_response() {
        Some(nack) => match codec.encode(&nack.into()) {
            Ok(text) => anyhow!("{err}\nreply: {text}"),
            Err(_) => anyhow!("{err}"),
        },
        None => anyhow!("{err} (no reply would be sent)"),
    })?;

    let mut summary = Summary {
        kind: message.kind(),
        id: message.id().map(serde_json::to_value).transpose()?,
        method: message.method().map(|m| m.to_string()),
        params: None,
        result: None,
        error: None,
    };
    match message {
        Message::Request(request) => summary.params = Some(request.command.params()?),
        Message::Notification(notification) => {
            summary.params = Some(notification.command.params()?)
        }
        Message::Response(response) => match response.outcome {
            Outcome::Result(value) => summary.result = Some(value),
            Outcome::Error(error) => summary.error = Some(serde_json::to_value(error)?),
        },
    }
    Ok(summary)
}

#[cfg(test)]
#[path = "decode/decode_tests.rs"]
mod decode_tests;
