//! Domain error types for the relay plugin
//!
//! Structured thiserror types for navigable diagnostics and compile-time
//! exhaustive handling. Library code returns Result<T, RelayError>; only the
//! demo binary sits at an anyhow process boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Relay plugin domain errors
///
/// Every variant carries structured context fields for diagnostics, so a
/// host can pattern-match on the variant instead of parsing message strings.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration error (environment variable missing or invalid)
    #[error("configuration error: {0}")]
    Config(String),

    /// TLS CA certificate file could not be read
    #[error("TLS CA certificate unreadable at '{}'", path.display())]
    CaUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// NATS connection failed
    #[error("NATS connection failed for '{url}'")]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Relay invoked before init established a connection
    #[error("relay invoked before a NATS connection was established")]
    NotConnected,

    /// NATS publish failed for a specific subject
    #[error("NATS publish failed for subject '{subject}'")]
    PublishFailed {
        subject: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Payload serialization failed
    #[error("payload serialization failed")]
    SerializationFailed(#[source] serde_json::Error),
}

impl RelayError {
    /// Returns a static label string used as the `error_type` field on
    /// structured error logs.
    pub fn error_type_label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::CaUnreadable { .. } => "ca_unreadable",
            Self::ConnectionFailed { .. } => "nats_connection",
            Self::NotConnected => "not_connected",
            Self::PublishFailed { .. } => "nats_publish",
            Self::SerializationFailed(_) => "serialization",
        }
    }
}
