//! # farmrpc
//!
//! Typed JSON-RPC 2.0 codec and dispatcher for the farm bot command protocol.
//!
//! farmrpc turns raw envelopes into typed commands and back, providing:
//! - A closed method set with per-method parameter validation
//! - Canonical encoding (`decode(encode(m)) == m`)
//! - An async dispatcher invoking exactly one handler per request
//! - Sender-side correlation with timeouts
//!
//! ## Handling Commands
//!
//! ```ignore
//! use farmrpc::prelude::*;
//!
//! struct Motors;
//!
//! #[async_trait]
//! impl Handler for Motors {
//!     async fn handle(&self, command: Command) -> HandlerResult {
//!         match command {
//!             Command::MoveAbsolute(params) => {
//!                 tracing::info!(x = params.x, y = params.y, z = params.z, "Moving");
//!                 Ok(Reply::Ack)
//!             }
//!             other => Err(HandlerError::new(1, format!("unsupported: {}", other.method()))),
//!         }
//!     }
//! }
//!
//! let dispatcher = Dispatcher::builder()
//!     .register(Method::MoveAbsolute, Motors)
//!     .build(&DispatcherConfig::default())?;
//!
//! let raw = r#"{"jsonrpc":"2.0","id":"42","method":"move_absolute","params":[{"speed":100,"x":1.0,"y":2.0,"z":3.0}]}"#;
//! let reply = dispatcher.handle_text(raw).await;
//! assert_eq!(reply.as_deref(), Some(r#"{"jsonrpc":"2.0","id":"42","result":"OK"}"#));
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`farmrpc_core`] - Methods, parameters, messages, errors and configuration
//! - [`farmrpc_transport`] - JSON codec and envelope classification
//! - [`farmrpc_runtime`] - Handlers, dispatcher and correlator
//! - [`farmrpc_logging`] - Subscriber setup and level reloading

// Re-export core types
pub use farmrpc_core::{
    Command, DispatcherConfig, ErrorObject, LogLevel, Message, Method, Notification, Outcome,
    Request, RequestId, Response, RpcError, RpcResult, params,
};

// Re-export codec
pub use farmrpc_transport::{Codec, CodecError, DecodeError, JsonCodec};

// Re-export runtime
pub use farmrpc_runtime::{
    Correlator, Dispatcher, DispatcherBuilder, FnHandler, Handler, HandlerError, HandlerResult,
    PendingResponse, RegistryError, Reply, handler_fn,
};

// Re-export logging
pub use farmrpc_logging::{LoggingError, ReloadHandle, init_logging};

// Re-export common dependencies that handler authors need
pub use async_trait::async_trait;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use farmrpc::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        Codec, Command, Dispatcher, DispatcherConfig, Handler, HandlerError, HandlerResult,
        JsonCodec, Message, Method, Reply, RequestId, Response, RpcError, async_trait, handler_fn,
    };

    pub use serde::{Deserialize, Serialize};
}
