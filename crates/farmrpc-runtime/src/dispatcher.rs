//! Method registry and request dispatch

use crate::handler::{Handler, Reply};
use farmrpc_core::{
    DispatcherConfig, Message, Method, Notification, Request, Response, RpcError, RpcResult,
};
use farmrpc_transport::{Codec, JsonCodec};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::Instrument;

/// Error raised while assembling a [`Dispatcher`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("handler already registered for method: {0}")]
    DuplicateHandler(Method),

    #[error("max_concurrent_requests must be at least 1")]
    ZeroConcurrency,
}

/// Collects handlers before the dispatcher is frozen
#[derive(Default)]
pub struct DispatcherBuilder {
    handlers: HashMap<Method, Arc<dyn Handler>>,
    duplicate: Option<Method>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for a method
    ///
    /// Registering a second handler for the same method is reported by
    /// [`DispatcherBuilder::build`].
    pub fn register(mut self, method: Method, handler: impl Handler + 'static) -> Self {
        self.insert(method, Arc::new(handler));
        self
    }

    /// Register an already shared handler, e.g. one serving several methods
    pub fn register_shared(mut self, method: Method, handler: Arc<dyn Handler>) -> Self {
        self.insert(method, handler);
        self
    }

    fn insert(&mut self, method: Method, handler: Arc<dyn Handler>) {
        if self.handlers.contains_key(&method) {
            self.duplicate.get_or_insert(method);
            return;
        }
        self.handlers.insert(method, handler);
    }

    /// Freeze the registry
    pub fn build(self, config: &DispatcherConfig) -> Result<Dispatcher, RegistryError> {
        if let Some(method) = self.duplicate {
            return Err(RegistryError::DuplicateHandler(method));
        }
        if config.max_concurrent_requests == 0 {
            return Err(RegistryError::ZeroConcurrency);
        }

        tracing::debug!(
            handlers = self.handlers.len(),
            max_concurrent = config.max_concurrent_requests,
            "Dispatcher built"
        );

        Ok(Dispatcher {
            handlers: self.handlers,
            permits: Arc::new(Semaphore::new(config.max_concurrent_requests)),
            codec: JsonCodec::new(),
        })
    }
}

/// Routes decoded messages to their registered handlers
///
/// Immutable once built; share it behind an `Arc` to serve requests
/// concurrently.
pub struct Dispatcher {
    handlers: HashMap<Method, Arc<dyn Handler>>,
    permits: Arc<Semaphore>,
    codec: JsonCodec,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Registered methods, in protocol table order
    pub fn methods(&self) -> Vec<Method> {
        Method::ALL
            .iter()
            .copied()
            .filter(|method| self.handlers.contains_key(method))
            .collect()
    }

    /// Execute a request and produce exactly one response
    pub async fn dispatch(&self, request: Request) -> Response {
        let Request { id, command } = request;
        let method = command.method();
        let span = tracing::debug_span!("dispatch", method = %method, id = %id);

        async move {
            if method.is_notification_only() {
                tracing::warn!("Rejected notification-only method sent as request");
                let err = RpcError::InvalidUsage(format!("{method} is notification-only"));
                return Response::from_error(Some(id), &err);
            }

            match self.invoke(command).await.and_then(|reply| shape_reply(method, reply)) {
                Ok(result) => {
                    tracing::debug!("Request completed");
                    Response::success(id, result)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Request failed");
                    Response::from_error(Some(id), &err)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Deliver a notification; failures are logged, never answered
    pub async fn notify(&self, notification: Notification) {
        let method = notification.method();
        let span = tracing::debug_span!("notify", method = %method);

        async move {
            match self.invoke(notification.command).await {
                Ok(_) => tracing::debug!("Notification delivered"),
                Err(err) => tracing::warn!(error = %err, "Notification failed"),
            }
        }
        .instrument(span)
        .await
    }

    /// Route any decoded message
    ///
    /// Returns the response to send back, if any. Inbound responses belong to
    /// the sender side and are ignored here.
    pub async fn handle(&self, message: Message) -> Option<Response> {
        match message {
            Message::Request(request) => Some(self.dispatch(request).await),
            Message::Notification(notification) => {
                self.notify(notification).await;
                None
            }
            Message::Response(response) => {
                tracing::debug!(id = ?response.id, "Ignoring inbound response");
                None
            }
        }
    }

    /// Decode raw text, handle it and encode the reply
    pub async fn handle_text(&self, raw: &str) -> Option<String> {
        let response = match self.codec.decode(raw) {
            Ok(message) => self.handle(message).await?,
            Err(err) => {
                tracing::warn!(error = %err.error, id = ?err.id, "Rejected inbound message");
                err.to_response()?
            }
        };

        match self.codec.encode(&Message::Response(response)) {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::error!(error = %err, "Failed to encode response");
                None
            }
        }
    }

    async fn invoke(&self, command: farmrpc_core::Command) -> RpcResult<Reply> {
        let method = command.method();
        let handler = self
            .handlers
            .get(&method)
            .cloned()
            .ok_or(RpcError::NoHandler(method))?;

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| RpcError::Internal("dispatcher is closed".to_string()))?;

        // A panicking handler surfaces as a JoinError instead of unwinding
        // through the dispatcher.
        let task = tokio::spawn(async move { handler.handle(command).await }.in_current_span());
        match task.await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(err)) => Err(err.into()),
            Err(join_err) => Err(RpcError::Internal(format!(
                "handler for {method} aborted: {join_err}"
            ))),
        }
    }
}

/// Fit a handler's reply to the result shape its method promises
///
/// Acknowledge-only methods always answer `"OK"`; payload methods must
/// return a payload.
fn shape_reply(method: Method, reply: Reply) -> RpcResult<serde_json::Value> {
    match (method.returns_payload(), reply) {
        (true, Reply::Payload(value)) => Ok(value),
        (true, Reply::Ack) => Err(RpcError::Internal(format!(
            "handler for {method} returned no payload"
        ))),
        (false, Reply::Payload(_)) => {
            tracing::debug!("Discarding payload from acknowledge-only method");
            Ok(Reply::Ack.into_value())
        }
        (false, Reply::Ack) => Ok(Reply::Ack.into_value()),
    }
}
