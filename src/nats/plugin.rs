//! NATS relay plugin
//!
//! Publishes host payloads to the configured NATS subject, connecting over
//! TLS or plaintext depending on environment and CA configuration.

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::payload::RelayPayload;
use crate::transport::TransportPlugin;
use async_nats::{Client, ConnectOptions};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Transport plugin relaying payloads to a NATS subject
pub struct NatsRelayPlugin {
    config: RelayConfig,
    client: Option<Client>,
    connected: AtomicBool,
    messages_published: AtomicU64,
    publish_failures: AtomicU64,
}

impl NatsRelayPlugin {
    /// Create an unconnected plugin from explicit configuration
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            client: None,
            connected: AtomicBool::new(false),
            messages_published: AtomicU64::new(0),
            publish_failures: AtomicU64::new(0),
        }
    }

    /// Create an unconnected plugin from environment configuration
    pub fn from_env() -> Result<Self, RelayError> {
        Ok(Self::new(RelayConfig::from_env()?))
    }

    /// Active configuration
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Get total messages published
    pub fn messages_published(&self) -> u64 {
        self.messages_published.load(Ordering::Relaxed)
    }

    /// Get total publish failures
    pub fn publish_failures(&self) -> u64 {
        self.publish_failures.load(Ordering::Relaxed)
    }

    /// Connect to the NATS server
    ///
    /// TLS is used when the environment is not dev and a CA certificate is
    /// configured; otherwise the connection is plaintext. The CA file is
    /// checked for readability before any dialing happens.
    pub async fn init(&mut self) -> Result<(), RelayError> {
        info!(
            url = %self.config.server_url,
            tls = self.config.use_tls(),
            "Initializing NATS connection"
        );

        let result = if self.config.use_tls() {
            // use_tls() implies a CA path is present
            let ca = self.config.tls_ca.clone().unwrap_or_default();
            if let Err(source) = std::fs::read(&ca) {
                let err = RelayError::CaUnreadable { path: ca, source };
                error!(
                    error_type = err.error_type_label(),
                    error = %err,
                    "Failed to read TLS CA certificate"
                );
                return Err(err);
            }

            ConnectOptions::new()
                .require_tls(true)
                .add_root_certificates(ca)
                .connect(self.config.server_url.as_str())
                .await
        } else {
            async_nats::connect(self.config.server_url.as_str()).await
        };

        match result {
            Ok(client) => {
                self.client = Some(client);
                self.connected.store(true, Ordering::SeqCst);
                info!("NATS connection established");
                Ok(())
            }
            Err(e) => {
                let err = RelayError::ConnectionFailed {
                    url: self.config.server_url.clone(),
                    source: Box::new(e),
                };
                error!(
                    error_type = err.error_type_label(),
                    error = %err,
                    "Failed to connect to NATS"
                );
                Err(err)
            }
        }
    }

    /// Relay one payload to the configured subject
    ///
    /// Publishes and flushes so broker-side failures surface on the call
    /// that caused them.
    pub async fn relay(&self, payload: RelayPayload) -> Result<(), RelayError> {
        let span = info_span!("relay", subject = %self.config.subject);
        async {
            // A drained client can still accept publishes; gate on the
            // connected flag as well so relays after close() are refused.
            let client = match self.client.as_ref() {
                Some(client) if self.connected.load(Ordering::SeqCst) => client,
                _ => {
                    let err = RelayError::NotConnected;
                    error!(
                        error_type = err.error_type_label(),
                        error = %err,
                        "Relay refused"
                    );
                    return Err(err);
                }
            };

            let bytes = payload.into_bytes().map_err(|err| {
                self.publish_failures.fetch_add(1, Ordering::Relaxed);
                error!(
                    error_type = err.error_type_label(),
                    error = %err,
                    "Failed to encode relay payload"
                );
                err
            })?;

            debug!(payload_bytes = bytes.len(), "Relaying data to NATS");

            let published = client
                .publish(self.config.subject.clone(), bytes)
                .await
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>);
            let flushed = match published {
                Ok(()) => client
                    .flush()
                    .await
                    .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
                Err(e) => Err(e),
            };

            match flushed {
                Ok(()) => {
                    self.messages_published.fetch_add(1, Ordering::Relaxed);
                    debug!("Payload published");
                    Ok(())
                }
                Err(source) => {
                    self.publish_failures.fetch_add(1, Ordering::Relaxed);
                    let err = RelayError::PublishFailed {
                        subject: self.config.subject.clone(),
                        source,
                    };
                    error!(
                        error_type = err.error_type_label(),
                        error = %err,
                        "Failed to publish payload"
                    );
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Graceful shutdown
    pub async fn close(&self) {
        info!("Closing NATS connection");
        self.connected.store(false, Ordering::SeqCst);

        if let Some(client) = self.client.as_ref() {
            if let Err(error) = client.flush().await {
                warn!(%error, "Flush during shutdown failed");
            }
            if let Err(error) = client.drain().await {
                warn!(%error, "Drain during shutdown failed");
            }
        }
    }
}

#[async_trait]
impl TransportPlugin for NatsRelayPlugin {
    async fn init(&mut self) -> Result<(), RelayError> {
        NatsRelayPlugin::init(self).await
    }

    async fn relay(&self, payload: RelayPayload) -> Result<(), RelayError> {
        NatsRelayPlugin::relay(self, payload).await
    }

    async fn close(&self) {
        NatsRelayPlugin::close(self).await
    }
}
