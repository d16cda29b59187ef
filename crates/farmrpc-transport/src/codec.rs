//! Codec trait and JSON implementation

use crate::envelope::{self, Envelope};
use farmrpc_core::{Message, RequestId, Response, RpcError};
use thiserror::Error;

/// Errors that can occur while encoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid message: {0}")]
    InvalidMessage(#[from] RpcError),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Serialization(err.to_string())
    }
}

impl From<CodecError> for RpcError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::InvalidMessage(inner) => inner,
            CodecError::Serialization(msg) => RpcError::Internal(msg),
        }
    }
}

/// A message that could not be decoded.
///
/// Carries the correlation id when it could be recovered, and whether the
/// sender expects an answer: failed notifications and responses are never
/// answered.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct DecodeError {
    pub error: RpcError,
    pub id: Option<RequestId>,
    pub replyable: bool,
}

impl DecodeError {
    /// A failure the sender should hear about
    pub fn new(error: RpcError, id: Option<RequestId>) -> Self {
        Self {
            error,
            id,
            replyable: true,
        }
    }

    /// A failure that is logged and dropped
    pub fn silent(error: RpcError, id: Option<RequestId>) -> Self {
        Self {
            error,
            id,
            replyable: false,
        }
    }

    /// The error response (NACK) to send back, if any
    pub fn to_response(&self) -> Option<Response> {
        self.replyable
            .then(|| Response::from_error(self.id.clone(), &self.error))
    }
}

/// Trait for message encoding and decoding
pub trait Codec: Send + Sync {
    /// Encode a message to text
    fn encode(&self, message: &Message) -> Result<String, CodecError>;

    /// Decode text to a message
    fn decode(&self, raw: &str) -> Result<Message, DecodeError>;

    /// Get the content type for this codec
    fn content_type(&self) -> &'static str;

    /// Encode a message to bytes
    fn encode_bytes(&self, message: &Message) -> Result<Vec<u8>, CodecError> {
        self.encode(message).map(String::into_bytes)
    }

    /// Decode bytes to a message; invalid UTF-8 is a malformed envelope
    fn decode_bytes(&self, data: &[u8]) -> Result<Message, DecodeError> {
        let raw = std::str::from_utf8(data).map_err(|e| {
            DecodeError::new(
                RpcError::MalformedEnvelope(format!("invalid UTF-8: {e}")),
                None,
            )
        })?;
        self.decode(raw)
    }
}

/// JSON-RPC codec implementation using serde_json
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    /// Pretty-print output
    pretty: bool,
}

impl JsonCodec {
    /// Create a new JSON codec
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Create a JSON codec that pretty-prints output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Decode an already-parsed JSON value
    pub fn decode_value(&self, value: serde_json::Value) -> Result<Message, DecodeError> {
        envelope::classify(value)
    }
}

impl Codec for JsonCodec {
    fn encode(&self, message: &Message) -> Result<String, CodecError> {
        let envelope = Envelope::from_message(message)?;
        if self.pretty {
            serde_json::to_string_pretty(&envelope).map_err(Into::into)
        } else {
            serde_json::to_string(&envelope).map_err(Into::into)
        }
    }

    fn decode(&self, raw: &str) -> Result<Message, DecodeError> {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
            DecodeError::new(RpcError::MalformedEnvelope(format!("invalid JSON: {e}")), None)
        })?;
        self.decode_value(value)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
