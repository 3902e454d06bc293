//! Host-facing transport plugin interface
//!
//! The host runtime owns the plugin lifecycle: it constructs the plugin,
//! calls `init` once, then invokes `relay` per payload and `close` on
//! shutdown. The trait is object-safe so hosts can hold
//! `Box<dyn TransportPlugin>`.

use crate::error::RelayError;
use crate::payload::RelayPayload;
use async_trait::async_trait;

/// A transport plugin that forwards payloads to a messaging destination
#[async_trait]
pub trait TransportPlugin: Send + Sync {
    /// Establish the underlying transport connection
    async fn init(&mut self) -> Result<(), RelayError>;

    /// Relay one payload to the configured destination
    async fn relay(&self, payload: RelayPayload) -> Result<(), RelayError>;

    /// Graceful shutdown
    async fn close(&self);
}
