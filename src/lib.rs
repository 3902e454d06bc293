//! NATS relay transport plugin
//!
//! A host-loaded transport plugin that forwards payloads to a NATS subject:
//! - Connects to the broker over TLS or plaintext based on environment
//!   configuration
//! - Normalizes byte, string, and JSON payloads to wire bytes
//! - Reports success/failure through structured tracing
//!
//! The host drives the [`TransportPlugin`] lifecycle: `init` once, `relay`
//! per payload, `close` on shutdown.
//!
//! ```no_run
//! use nats_relay_plugin::{NatsRelayPlugin, RelayPayload};
//!
//! # async fn run() -> Result<(), nats_relay_plugin::RelayError> {
//! let mut plugin = NatsRelayPlugin::from_env()?;
//! plugin.init().await?;
//! plugin.relay(RelayPayload::from("payload")).await?;
//! plugin.close().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod nats;
mod payload;
mod transport;

pub use config::{Environment, RelayConfig};
pub use error::RelayError;
pub use nats::NatsRelayPlugin;
pub use payload::RelayPayload;
pub use transport::TransportPlugin;
