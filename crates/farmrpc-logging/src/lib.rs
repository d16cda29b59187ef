//! farmrpc-logging - Tracing subscriber setup
//!
//! This crate provides:
//! - [`init_logging`] installing a `fmt` subscriber filtered by level or `RUST_LOG`
//! - [`ReloadHandle`] for changing the level while running
//! - Conversions between [`LogLevel`] and `tracing` levels

mod filter;
mod init;
mod reload;

pub use farmrpc_core::LogLevel;
pub use filter::{env_filter, level_filter, log_level};
pub use init::{LoggingError, init_from_config, init_logging};
pub use reload::ReloadHandle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, LoggingError, ReloadHandle, init_logging};
}
