//! Handler trait and closure adapter

use async_trait::async_trait;
use farmrpc_core::{Command, RpcError};
use serde_json::Value;
use std::future::Future;

/// Successful outcome of a handler
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Command accepted, nothing to return (encoded as `"OK"`)
    Ack,
    /// Command produced a result payload
    Payload(Value),
}

impl Reply {
    /// Convert into the JSON-RPC `result` value
    pub fn into_value(self) -> Value {
        match self {
            Reply::Ack => Value::String(farmrpc_core::Response::ACK.to_string()),
            Reply::Payload(value) => value,
        }
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Reply::Payload(value)
    }
}

/// Failure reported by a handler, surfaced to the sender as an error response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("handler error {code}: {message}")]
pub struct HandlerError {
    pub code: i64,
    pub message: String,
}

impl HandlerError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<HandlerError> for RpcError {
    fn from(err: HandlerError) -> Self {
        RpcError::HandlerFailure {
            code: err.code,
            message: err.message,
        }
    }
}

/// Result type returned by handlers
pub type HandlerResult = Result<Reply, HandlerError>;

/// Executes one method's commands
///
/// A handler is registered for a single [`farmrpc_core::Method`] and receives
/// the already validated [`Command`] for it. Handlers run concurrently with
/// each other; any shared hardware access must be serialized by the handler.
///
/// # Example
///
/// ```ignore
/// use farmrpc_runtime::{Handler, HandlerResult, Reply};
///
/// struct Motors;
///
/// #[async_trait::async_trait]
/// impl Handler for Motors {
///     async fn handle(&self, command: Command) -> HandlerResult {
///         // drive the motors
///         Ok(Reply::Ack)
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send + Sync {
    /// Execute the command
    async fn handle(&self, command: Command) -> HandlerResult;
}

/// [`Handler`] backed by an async closure
pub struct FnHandler<F> {
    func: F,
}

/// Wrap an async closure as a [`Handler`]
pub fn handler_fn<F, Fut>(func: F) -> FnHandler<F>
where
    F: Fn(Command) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    FnHandler { func }
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Command) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn handle(&self, command: Command) -> HandlerResult {
        (self.func)(command).await
    }
}
