//! Relay plugin demo driver
//!
//! Stands in for the host runtime: loads configuration from the
//! environment, initializes the plugin, relays one payload of each shape,
//! and shuts down.
//!
//! ```bash
//! DESTINATION_TRANSPORT_URL=nats://localhost:4222 \
//! PRODUCER_STREAM=demo.subject \
//! cargo run --example relay_demo
//! ```

use anyhow::Result;
use nats_relay_plugin::{NatsRelayPlugin, RelayPayload};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let mut plugin = NatsRelayPlugin::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(
                    format!("nats_relay_plugin={}", plugin.config().log_level).parse()?,
                )
                .add_directive("async_nats=warn".parse()?),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        url = %plugin.config().server_url,
        subject = %plugin.config().subject,
        "Starting relay demo"
    );

    plugin.init().await?;

    plugin
        .relay(RelayPayload::from(vec![0x01, 0x02, 0x03]))
        .await?;
    plugin.relay(RelayPayload::from("a string payload")).await?;
    plugin
        .relay(RelayPayload::from(serde_json::json!({
            "message": "an object payload",
            "sequence": 3,
        })))
        .await?;

    info!(
        published = plugin.messages_published(),
        failures = plugin.publish_failures(),
        "Relay demo complete"
    );

    plugin.close().await;
    Ok(())
}
