//! Subscriber installation

use crate::filter::env_filter;
use crate::reload::ReloadHandle;
use farmrpc_core::{DispatcherConfig, LogLevel};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload};

/// Error type for logging setup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoggingError {
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,

    #[error("logging has not been initialized")]
    NotInitialized,

    #[error("failed to reload log filter: {0}")]
    Reload(String),
}

/// Install the global subscriber
///
/// Events are written to stderr so stdout stays free for protocol traffic.
/// `RUST_LOG` directives override `level` for the targets they name. The
/// filter can be changed later through [`ReloadHandle::global`].
pub fn init_logging(level: LogLevel) -> Result<(), LoggingError> {
    let (filter, handle) = reload::Layer::new(env_filter(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    ReloadHandle::global().set_handle(handle, level);
    tracing::debug!(level = %level, "Logging initialized");
    Ok(())
}

/// Install the global subscriber at the configured level
pub fn init_from_config(config: &DispatcherConfig) -> Result<(), LoggingError> {
    init_logging(config.level())
}
