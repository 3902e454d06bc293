//! Relay plugin configuration
//!
//! Handles loading connection and subject configuration from environment
//! variables. The host framework owns deeper validation; this module only
//! rejects values the plugin cannot work with at all.

use crate::error::RelayError;
use std::env;
use std::path::PathBuf;

/// Deployment environment flag
///
/// Anything other than `dev` counts as production. TLS is only considered
/// outside dev.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("dev") {
            Self::Dev
        } else {
            Self::Production
        }
    }
}

/// Relay plugin configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// NATS server URL(s) - comma-separated for multiple servers
    pub server_url: String,

    /// Subject payloads are published on
    pub subject: String,

    /// Path to a CA certificate file for TLS connections
    pub tls_ca: Option<PathBuf>,

    /// Deployment environment
    pub environment: Environment,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl RelayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();

        let server_url = env::var("DESTINATION_TRANSPORT_URL")
            .unwrap_or_else(|_| "tls://localhost:4223".to_string());
        if server_url.trim().is_empty() {
            return Err(RelayError::Config(
                "DESTINATION_TRANSPORT_URL must not be empty".to_string(),
            ));
        }

        let subject =
            env::var("PRODUCER_STREAM").unwrap_or_else(|_| "example.subject".to_string());
        if subject.trim().is_empty() {
            return Err(RelayError::Config(
                "PRODUCER_STREAM must not be empty".to_string(),
            ));
        }

        let tls_ca = env::var("NATS_TLS_CA")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let environment = env::var("ENVIRONMENT")
            .map(|value| Environment::parse(&value))
            .unwrap_or(Environment::Dev);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            server_url,
            subject,
            tls_ca,
            environment,
            log_level,
        })
    }

    /// Whether the connection should be established over TLS
    ///
    /// TLS requires both a non-dev environment and a configured CA path;
    /// dev always connects plaintext even if a CA is set.
    pub fn use_tls(&self) -> bool {
        self.environment != Environment::Dev && self.tls_ca.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // from_env tests mutate process-wide environment variables; serialize
    // them so parallel test threads cannot interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env_vars<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = f();
        for (key, _) in vars {
            env::remove_var(key);
        }
        result
    }

    fn test_config() -> RelayConfig {
        RelayConfig {
            server_url: "nats://localhost:4222".to_string(),
            subject: "test.subject".to_string(),
            tls_ca: None,
            environment: Environment::Dev,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn environment_parse_is_case_insensitive() {
        assert_eq!(Environment::parse("dev"), Environment::Dev);
        assert_eq!(Environment::parse("DEV"), Environment::Dev);
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("staging"), Environment::Production);
    }

    #[test]
    fn tls_requires_non_dev_and_ca() {
        let mut config = test_config();
        assert!(!config.use_tls());

        // CA set but still dev: plaintext
        config.tls_ca = Some(PathBuf::from("/etc/nats/ca.pem"));
        assert!(!config.use_tls());

        // Non-dev with CA: TLS
        config.environment = Environment::Production;
        assert!(config.use_tls());

        // Non-dev without CA: plaintext
        config.tls_ca = None;
        assert!(!config.use_tls());
    }

    #[test]
    fn from_env_rejects_empty_server_url() {
        let result = with_env_vars(
            &[
                ("DESTINATION_TRANSPORT_URL", "  "),
                ("PRODUCER_STREAM", "test.subject"),
            ],
            RelayConfig::from_env,
        );

        let err = result.unwrap_err();
        assert!(err.to_string().contains("DESTINATION_TRANSPORT_URL"));
        assert!(matches!(err, RelayError::Config(_)));
    }

    #[test]
    fn from_env_rejects_empty_subject() {
        let result = with_env_vars(
            &[
                ("DESTINATION_TRANSPORT_URL", "nats://localhost:4222"),
                ("PRODUCER_STREAM", ""),
            ],
            RelayConfig::from_env,
        );

        let err = result.unwrap_err();
        assert!(err.to_string().contains("PRODUCER_STREAM"));
        assert!(matches!(err, RelayError::Config(_)));
    }

    #[test]
    fn from_env_applies_defaults() {
        let config = with_env_vars(
            &[
                ("DESTINATION_TRANSPORT_URL", "nats://localhost:4222"),
                ("PRODUCER_STREAM", "test.subject"),
            ],
            || {
                env::remove_var("ENVIRONMENT");
                env::remove_var("NATS_TLS_CA");
                env::remove_var("LOG_LEVEL");
                RelayConfig::from_env()
            },
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Dev);
        assert_eq!(config.tls_ca, None);
        assert_eq!(config.log_level, "info");
    }
}
