//! Error types for the bot protocol

use crate::message::RequestId;
use crate::method::Method;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for protocol operations
pub type RpcResult<T> = Result<T, RpcError>;

// ---------------------------------------------------------------------------
// JSON-RPC error codes
// ---------------------------------------------------------------------------

pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

// Implementation-defined codes (server range: -32000 to -32099)
pub const INVALID_USAGE: i64 = -32000;
pub const NO_HANDLER: i64 = -32001;
pub const TIMEOUT: i64 = -32002;
pub const DUPLICATE_ID: i64 = -32003;

/// Error type for decoding, dispatching and correlating bot messages
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RpcError {
    /// Text is not JSON, or a required envelope field is missing or invalid
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Method name is outside the closed method set
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    /// Parameter list does not match the method's declared shape
    #[error("invalid params for {method}: {reason}")]
    ParamShapeMismatch { method: Method, reason: String },

    /// Structurally valid but forbidden, e.g. a notification-only method sent as a request
    #[error("invalid usage: {0}")]
    InvalidUsage(String),

    /// No handler registered for a valid method
    #[error("no handler registered for {0}")]
    NoHandler(Method),

    /// The registered handler reported a failure
    #[error("handler error ({code}): {message}")]
    HandlerFailure { code: i64, message: String },

    /// No response arrived before the sender gave up
    #[error("request {0} timed out")]
    Timeout(RequestId),

    /// Correlation id is already in flight
    #[error("request id {0} is already in flight")]
    DuplicateId(RequestId),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl RpcError {
    /// Returns the JSON-RPC error code for this error
    pub fn code(&self) -> i64 {
        match self {
            RpcError::MalformedEnvelope(_) => INVALID_REQUEST,
            RpcError::UnknownMethod(_) => METHOD_NOT_FOUND,
            RpcError::ParamShapeMismatch { .. } => INVALID_PARAMS,
            RpcError::InvalidUsage(_) => INVALID_USAGE,
            RpcError::NoHandler(_) => NO_HANDLER,
            RpcError::HandlerFailure { code, .. } => *code,
            RpcError::Timeout(_) => TIMEOUT,
            RpcError::DuplicateId(_) => DUPLICATE_ID,
            RpcError::Internal(_) => INTERNAL_ERROR,
        }
    }

    /// Convert to the error object carried by an error response
    pub fn to_error_object(&self) -> ErrorObject {
        match self {
            RpcError::HandlerFailure { code, message } => ErrorObject::new(*code, message.clone()),
            RpcError::ParamShapeMismatch { method, .. } => {
                ErrorObject::new(self.code(), self.to_string())
                    .with_data(serde_json::json!({ "method": method.as_str() }))
            }
            other => ErrorObject::new(other.code(), other.to_string()),
        }
    }

    /// Shorthand for a parameter shape error
    pub fn param_mismatch(method: Method, reason: impl Into<String>) -> Self {
        RpcError::ParamShapeMismatch {
            method,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        RpcError::Internal(err.to_string())
    }
}

/// Error member of a JSON-RPC error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Numeric error code
    pub code: i64,
    /// Short description
    pub message: String,
    /// Optional structured data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorObject {
    /// Create an error object without data
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Attach structured data
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl std::fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}
