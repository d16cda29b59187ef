//! farmrpc-transport - JSON-RPC codec for the bot protocol
//!
//! This crate provides:
//! - [`Codec`] trait for encoding/decoding messages
//! - [`JsonCodec`] implementation producing canonical JSON-RPC 2.0 text
//! - [`DecodeError`], which knows whether and how to answer a bad message

mod codec;
mod envelope;

pub use codec::{Codec, CodecError, DecodeError, JsonCodec};
pub use envelope::{Envelope, JSONRPC_VERSION};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Codec, CodecError, DecodeError, JsonCodec};
}
