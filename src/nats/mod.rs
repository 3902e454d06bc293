//! NATS transport integration
//!
//! Connects to the broker and publishes relay payloads on the configured
//! subject.

mod plugin;

pub use plugin::NatsRelayPlugin;
