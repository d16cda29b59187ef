//! Sender-side request/response correlation

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use farmrpc_core::{Command, DispatcherConfig, Request, RequestId, Response, RpcError, RpcResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;
use uuid::Uuid;

struct Slot {
    ticket: u64,
    sender: oneshot::Sender<Response>,
}

struct Shared {
    pending: DashMap<RequestId, Slot>,
    tickets: AtomicU64,
}

impl Shared {
    fn release(&self, id: &RequestId, ticket: u64) {
        self.pending.remove_if(id, |_, slot| slot.ticket == ticket);
    }
}

/// Tracks requests in flight and hands each response to its waiter
///
/// Ids are unique among requests in flight. An id becomes reusable once its
/// response arrives, its wait times out, or its [`PendingResponse`] is dropped.
#[derive(Clone)]
pub struct Correlator {
    shared: Arc<Shared>,
    timeout: Duration,
}

impl Correlator {
    /// Create a correlator whose default wait is `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                pending: DashMap::new(),
                tickets: AtomicU64::new(0),
            }),
            timeout,
        }
    }

    pub fn from_config(config: &DispatcherConfig) -> Self {
        Self::new(config.request_timeout())
    }

    /// Default timeout used by [`PendingResponse::wait_default`]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fresh random correlation id
    pub fn next_id(&self) -> RequestId {
        RequestId::Str(Uuid::new_v4().to_string())
    }

    /// Build a request with a fresh id and register it as in flight
    pub fn request(&self, command: Command) -> RpcResult<(Request, PendingResponse)> {
        self.register(Request::new(self.next_id(), command))
    }

    /// Register a caller-built request as in flight
    ///
    /// Notification-only methods are never answered, so they cannot be
    /// registered.
    pub fn register(&self, request: Request) -> RpcResult<(Request, PendingResponse)> {
        let method = request.method();
        if method.is_notification_only() {
            return Err(RpcError::InvalidUsage(format!(
                "{method} is notification-only"
            )));
        }

        let (sender, receiver) = oneshot::channel();
        let ticket = self.shared.tickets.fetch_add(1, Ordering::Relaxed);

        match self.shared.pending.entry(request.id.clone()) {
            Entry::Occupied(_) => return Err(RpcError::DuplicateId(request.id)),
            Entry::Vacant(slot) => {
                slot.insert(Slot { ticket, sender });
            }
        }

        tracing::trace!(id = %request.id, method = %method, "Request in flight");

        let pending = PendingResponse {
            id: request.id.clone(),
            ticket,
            receiver,
            shared: self.shared.clone(),
            timeout: self.timeout,
        };
        Ok((request, pending))
    }

    /// Complete the waiter for the response's id
    ///
    /// Returns `false` when no request with that id is in flight.
    pub fn resolve(&self, response: Response) -> bool {
        let Some(id) = response.id.clone() else {
            tracing::warn!("Dropping response without id");
            return false;
        };

        match self.shared.pending.remove(&id) {
            Some((_, slot)) => {
                if slot.sender.send(response).is_err() {
                    tracing::debug!(id = %id, "Waiter gone before response arrived");
                    return false;
                }
                true
            }
            None => {
                tracing::warn!(id = %id, "Response for unknown request id");
                false
            }
        }
    }

    /// Number of requests awaiting a response
    pub fn in_flight(&self) -> usize {
        self.shared.pending.len()
    }
}

/// Handle for awaiting one request's response
pub struct PendingResponse {
    id: RequestId,
    ticket: u64,
    receiver: oneshot::Receiver<Response>,
    shared: Arc<Shared>,
    timeout: Duration,
}

impl PendingResponse {
    pub fn id(&self) -> &RequestId {
        &self.id
    }

    /// Wait for the response, giving up after `timeout`
    ///
    /// On timeout the id is released and a late response is reported as
    /// unknown by [`Correlator::resolve`].
    pub async fn wait(mut self, timeout: Duration) -> RpcResult<Response> {
        match tokio::time::timeout(timeout, &mut self.receiver).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(RpcError::Internal(format!(
                "request {} was abandoned",
                self.id
            ))),
            Err(_) => {
                tracing::warn!(id = %self.id, ?timeout, "Request timed out");
                Err(RpcError::Timeout(self.id.clone()))
            }
        }
    }

    /// Wait using the correlator's configured timeout
    pub async fn wait_default(self) -> RpcResult<Response> {
        let timeout = self.timeout;
        self.wait(timeout).await
    }
}

impl Drop for PendingResponse {
    fn drop(&mut self) {
        self.shared.release(&self.id, self.ticket);
    }
}
