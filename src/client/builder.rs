use super::{ConnectionConfig, ConnectionManager, RealtimeClient};
use crate::infrastructure::{build_endpoint_url, validate_endpoint};
use crate::messaging::{EventDispatcher, MessageRouter};
use crate::types::constants::{HEARTBEAT_INTERVAL, MAX_RECONNECT_ATTEMPTS, RECONNECT_INTERVAL};
use crate::types::{RealtimeError, Result};
use crate::websocket::{Connector, WebSocketFactory};
use std::sync::Arc;
use std::time::Duration;

/// Configuration options for [`RealtimeClient`].
///
/// Unset fields fall back to the defaults: 30 s heartbeat, 3 s fixed
/// reconnect delay, 5 reconnect attempts.
#[derive(Debug, Clone, Default)]
pub struct RealtimeClientOptions {
    /// Opaque token passed to the server as the `token` query parameter
    pub access_token: Option<String>,
    /// Heartbeat period in milliseconds
    pub heartbeat_interval: Option<u64>,
    /// Delay between reconnect attempts in milliseconds
    pub reconnect_interval: Option<u64>,
    /// Reconnect attempts before giving up
    pub max_reconnect_attempts: Option<u32>,
}

impl RealtimeClientOptions {
    fn connection_config(&self) -> Result<ConnectionConfig> {
        let heartbeat_interval = self.heartbeat_interval.unwrap_or(HEARTBEAT_INTERVAL);
        let reconnect_interval = self.reconnect_interval.unwrap_or(RECONNECT_INTERVAL);

        if heartbeat_interval == 0 {
            return Err(RealtimeError::Config(
                "heartbeat_interval must be greater than zero".to_string(),
            ));
        }
        if reconnect_interval == 0 {
            return Err(RealtimeError::Config(
                "reconnect_interval must be greater than zero".to_string(),
            ));
        }

        Ok(ConnectionConfig {
            heartbeat_interval: Duration::from_millis(heartbeat_interval),
            reconnect_interval: Duration::from_millis(reconnect_interval),
            max_reconnect_attempts: self
                .max_reconnect_attempts
                .unwrap_or(MAX_RECONNECT_ATTEMPTS),
        })
    }
}

/// Builder for RealtimeClient that handles initialization
pub struct RealtimeClientBuilder {
    endpoint: String,
    url: String,
    config: ConnectionConfig,
    connector: Arc<dyn Connector>,
}

impl RealtimeClientBuilder {
    /// Create a new builder
    pub fn new(endpoint: impl Into<String>, options: RealtimeClientOptions) -> Result<Self> {
        let endpoint = endpoint.into();
        validate_endpoint(&endpoint)?;

        let url = build_endpoint_url(&endpoint, options.access_token.as_deref())?;
        let config = options.connection_config()?;

        Ok(Self {
            endpoint,
            url,
            config,
            connector: Arc::new(WebSocketFactory),
        })
    }

    /// Use a custom transport instead of tokio-tungstenite
    pub fn connector(mut self, connector: impl Connector) -> Self {
        self.connector = Arc::new(connector);
        self
    }

    /// Build the client. No connection is made until `connect()`.
    pub fn build(self) -> RealtimeClient {
        let dispatcher = EventDispatcher::new();
        let router = MessageRouter::new(dispatcher.clone());

        RealtimeClient {
            endpoint: self.endpoint,
            connection: Arc::new(ConnectionManager::new(
                self.url,
                self.config,
                self.connector,
                router,
            )),
            dispatcher,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_resolve_to_defaults() {
        let config = RealtimeClientOptions::default().connection_config().unwrap();
        assert_eq!(config, ConnectionConfig::default());
        assert_eq!(config.heartbeat_interval, Duration::from_secs(30));
        assert_eq!(config.reconnect_interval, Duration::from_secs(3));
        assert_eq!(config.max_reconnect_attempts, 5);
    }

    #[test]
    fn test_custom_options() {
        let config = RealtimeClientOptions {
            heartbeat_interval: Some(10_000),
            reconnect_interval: Some(500),
            max_reconnect_attempts: Some(0),
            ..Default::default()
        }
        .connection_config()
        .unwrap();

        assert_eq!(config.heartbeat_interval, Duration::from_secs(10));
        assert_eq!(config.reconnect_interval, Duration::from_millis(500));
        assert_eq!(config.max_reconnect_attempts, 0);
    }

    #[test]
    fn test_zero_intervals_are_rejected() {
        let options = RealtimeClientOptions {
            heartbeat_interval: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            RealtimeClientBuilder::new("ws://localhost:8080/ws/quiz", options),
            Err(RealtimeError::Config(_))
        ));

        let options = RealtimeClientOptions {
            reconnect_interval: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            RealtimeClientBuilder::new("ws://localhost:8080/ws/quiz", options),
            Err(RealtimeError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_endpoints_are_rejected() {
        assert!(matches!(
            RealtimeClientBuilder::new("localhost:8080", RealtimeClientOptions::default()),
            Err(RealtimeError::Config(_)) | Err(RealtimeError::UrlParse(_))
        ));
        assert!(matches!(
            RealtimeClientBuilder::new("http://localhost:8080", RealtimeClientOptions::default()),
            Err(RealtimeError::Config(_))
        ));
    }

    #[test]
    fn test_access_token_goes_into_url() {
        let builder = RealtimeClientBuilder::new(
            "ws://localhost:8080/ws/quiz",
            RealtimeClientOptions {
                access_token: Some("secret".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(builder.endpoint, "ws://localhost:8080/ws/quiz");
        assert_eq!(builder.url, "ws://localhost:8080/ws/quiz?token=secret");
    }
}
