//! JSON-RPC envelopes: canonical output and classification of input

use crate::codec::DecodeError;
use farmrpc_core::{
    Command, ErrorObject, Message, Method, Notification, Outcome, Request, RequestId, Response,
    RpcError, RpcResult,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Protocol identifier carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// Outgoing envelope.
///
/// Field order here is the canonical wire order. Parameter objects are
/// emitted with sorted keys.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Envelope<'a> {
    Call {
        jsonrpc: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<&'a RequestId>,
        method: Method,
        params: Value,
    },
    Reply {
        jsonrpc: &'static str,
        id: Option<&'a RequestId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<&'a Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<&'a ErrorObject>,
    },
}

impl<'a> Envelope<'a> {
    /// Build the envelope for a message
    pub fn from_message(message: &'a Message) -> RpcResult<Self> {
        let envelope = match message {
            Message::Request(req) => Envelope::Call {
                jsonrpc: JSONRPC_VERSION,
                id: Some(&req.id),
                method: req.method(),
                params: req.command.params()?,
            },
            Message::Notification(note) => Envelope::Call {
                jsonrpc: JSONRPC_VERSION,
                id: None,
                method: note.method(),
                params: note.command.params()?,
            },
            Message::Response(resp) => {
                let (result, error) = match &resp.outcome {
                    Outcome::Result(value) => (Some(value), None),
                    Outcome::Error(err) => (None, Some(err)),
                };
                Envelope::Reply {
                    jsonrpc: JSONRPC_VERSION,
                    id: resp.id.as_ref(),
                    result,
                    error,
                }
            }
        };
        Ok(envelope)
    }
}

/// Classify a parsed JSON value into a [`Message`].
///
/// - `method` with a non-null `id`: request
/// - `method` without `id` (or `"id": null`): notification
/// - exactly one of `result`/`error` and no `method`: response
pub fn classify(value: Value) -> Result<Message, DecodeError> {
    let Value::Object(mut obj) = value else {
        return Err(DecodeError::new(malformed("message must be a JSON object"), None));
    };

    // Recover the id first so later failures can still be correlated.
    let id = match obj.remove("id") {
        None | Some(Value::Null) => None,
        Some(raw) => Some(serde_json::from_value::<RequestId>(raw).map_err(|_| {
            DecodeError::new(malformed("id must be a string or an integer"), None)
        })?),
    };

    match obj.get("jsonrpc") {
        Some(Value::String(v)) if v == JSONRPC_VERSION => {}
        Some(_) => {
            return Err(DecodeError::new(
                malformed("unsupported protocol version, expected \"2.0\""),
                id,
            ));
        }
        None => return Err(DecodeError::new(malformed("missing \"jsonrpc\""), id)),
    }

    let has_method = obj.contains_key("method");
    let has_result = obj.contains_key("result");
    let has_error = obj.contains_key("error");

    if has_method {
        if has_result || has_error {
            return Err(call_error(
                malformed("a call must not carry \"result\" or \"error\""),
                id,
            ));
        }
        let command = decode_call(&mut obj).map_err(|e| call_error(e, id.clone()))?;
        return Ok(match id {
            Some(id) => Message::Request(Request { id, command }),
            None => Message::Notification(Notification { command }),
        });
    }

    match (obj.remove("result"), obj.remove("error")) {
        (Some(result), None) => Ok(Message::Response(Response {
            id,
            outcome: Outcome::Result(result),
        })),
        (None, Some(error)) => {
            let error: ErrorObject = serde_json::from_value(error).map_err(|e| {
                DecodeError::silent(malformed(format!("invalid error object: {e}")), id.clone())
            })?;
            Ok(Message::Response(Response {
                id,
                outcome: Outcome::Error(error),
            }))
        }
        (Some(_), Some(_)) => Err(DecodeError::silent(
            malformed("a response must carry exactly one of \"result\" or \"error\""),
            id,
        )),
        (None, None) => Err(DecodeError::new(
            malformed("envelope has neither \"method\" nor \"result\"/\"error\""),
            id,
        )),
    }
}

fn decode_call(obj: &mut Map<String, Value>) -> RpcResult<Command> {
    let method: Method = match obj.remove("method") {
        Some(Value::String(name)) => name.parse()?,
        _ => return Err(malformed("method must be a string")),
    };

    let params = match obj.remove("params") {
        None => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(malformed("params must be an array")),
    };

    Command::from_params(method, params)
}

/// Errors for calls are answered only when the call had an id.
fn call_error(error: RpcError, id: Option<RequestId>) -> DecodeError {
    match id {
        Some(id) => DecodeError::new(error, Some(id)),
        None => DecodeError::silent(error, None),
    }
}

fn malformed(reason: impl Into<String>) -> RpcError {
    RpcError::MalformedEnvelope(reason.into())
}
