//! Request, response and notification types

use crate::command::Command;
use crate::error::{ErrorObject, RpcError};
use crate::method::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Correlation identifier shared by a request and its response
///
/// Numeric ids must fit an `i64`; fractional ids are not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Num(i64),
    Str(String),
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        RequestId::Str(id.to_string())
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::Str(id)
    }
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Num(id)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Num(n) => write!(f, "{}", n),
            RequestId::Str(s) => f.write_str(s),
        }
    }
}

/// A command that expects exactly one response
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id: RequestId,
    pub command: Command,
}

impl Request {
    pub fn new(id: impl Into<RequestId>, command: Command) -> Self {
        Self {
            id: id.into(),
            command,
        }
    }

    pub fn method(&self) -> Method {
        self.command.method()
    }
}

/// A fire-and-forget command; never answered
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub command: Command,
}

impl Notification {
    pub fn new(command: Command) -> Self {
        Self { command }
    }

    pub fn method(&self) -> Method {
        self.command.method()
    }
}

/// Either the result or the error of a response; never both
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Result(Value),
    Error(ErrorObject),
}

/// Reply to a [`Request`]
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// `None` only when the failed message's id could not be recovered
    pub id: Option<RequestId>,
    pub outcome: Outcome,
}

impl Response {
    /// Result value of an acknowledgement
    pub const ACK: &'static str = "OK";

    /// Build a success response carrying a payload
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            id: Some(id),
            outcome: Outcome::Result(result),
        }
    }

    /// Build the canonical acknowledgement
    pub fn ack(id: RequestId) -> Self {
        Self::success(id, Value::String(Self::ACK.to_string()))
    }

    /// Build an error response
    pub fn error(id: Option<RequestId>, error: ErrorObject) -> Self {
        Self {
            id,
            outcome: Outcome::Error(error),
        }
    }

    /// Build an error response from an [`RpcError`]
    pub fn from_error(id: Option<RequestId>, err: &RpcError) -> Self {
        Self::error(id, err.to_error_object())
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Result(_))
    }

    pub fn is_ack(&self) -> bool {
        matches!(&self.outcome, Outcome::Result(Value::String(s)) if s == Self::ACK)
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    pub fn error_object(&self) -> Option<&ErrorObject> {
        match &self.outcome {
            Outcome::Result(_) => None,
            Outcome::Error(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<Value, ErrorObject> {
        match self.outcome {
            Outcome::Result(value) => Ok(value),
            Outcome::Error(err) => Err(err),
        }
    }
}

/// Any message that can travel over the channel
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Request(Request),
    Response(Response),
    Notification(Notification),
}

impl Message {
    /// Correlation id, if the message carries one
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            Message::Request(req) => Some(&req.id),
            Message::Response(resp) => resp.id.as_ref(),
            Message::Notification(_) => None,
        }
    }

    /// Method, for requests and notifications
    pub fn method(&self) -> Option<Method> {
        match self {
            Message::Request(req) => Some(req.method()),
            Message::Notification(note) => Some(note.method()),
            Message::Response(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Message::Request(_) => "request",
            Message::Response(_) => "response",
            Message::Notification(_) => "notification",
        }
    }
}

impl From<Request> for Message {
    fn from(req: Request) -> Self {
        Message::Request(req)
    }
}

impl From<Response> for Message {
    fn from(resp: Response) -> Self {
        Message::Response(resp)
    }
}

impl From<Notification> for Message {
    fn from(note: Notification) -> Self {
        Message::Notification(note)
    }
}
