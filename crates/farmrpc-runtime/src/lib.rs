//! farmrpc-runtime - Handler registry, dispatch and correlation
//!
//! This crate provides:
//! - [`Handler`] and [`handler_fn`] for implementing method handlers
//! - [`Dispatcher`] for routing decoded messages to exactly one handler
//! - [`Correlator`] for matching responses to requests on the sending side

mod correlator;
mod dispatcher;
mod handler;

pub use correlator::{Correlator, PendingResponse};
pub use dispatcher::{Dispatcher, DispatcherBuilder, RegistryError};
pub use handler::{FnHandler, Handler, HandlerError, HandlerResult, Reply, handler_fn};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Correlator, Dispatcher, DispatcherBuilder, Handler, HandlerError, HandlerResult, Reply,
        handler_fn,
    };
}
