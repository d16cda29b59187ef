//! Encode command implementation

use anyhow::{Context, Result, bail};
use farmrpc::{
    Codec, Command, Correlator, DispatcherConfig, JsonCodec, Message, Method, Notification,
    Request, RequestId,
};
use serde_json::Value;

/// Build a message for `method` from command line arguments
///
/// `params` may be a single JSON object or the full positional array.
pub fn build(
    config: &DispatcherConfig,
    method: &str,
    params: Option<&str>,
    id: Option<String>,
    notify: bool,
) -> Result<Message> {
    let method: Method = method.parse()?;

    let params = match params {
        None => Vec::new(),
        Some(text) => {
            let value: Value =
                serde_json::from_str(text).context("--params is not valid JSON")?;
            match value {
                Value::Array(items) => items,
                object @ Value::Object(_) => vec![object],
                other => bail!("--params must be a JSON object or array, got {other}"),
            }
        }
    };
    let command = Command::from_params(method, params)?;

    if notify {
        return Ok(Notification::new(command).into());
    }
    if method.is_notification_only() {
        bail!("{method} is notification-only; pass --notify");
    }

    let id = match id {
        Some(id) => RequestId::from(id),
        None => Correlator::from_config(config).next_id(),
    };
    Ok(Request::new(id, command).into())
}

/// Encode canonically
pub fn render(message: &Message, pretty: bool) -> Result<String> {
    let codec = if pretty {
        JsonCodec::pretty()
    } else {
        JsonCodec::new()
    };
    Ok(codec.encode(message)?)
}
