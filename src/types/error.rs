use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Errors that can occur when using the quiz realtime client.
#[derive(Error, Debug)]
pub enum RealtimeError {
    /// WebSocket protocol error (handshake failed, invalid frame, etc.)
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// General connection error with descriptive message
    #[error("Connection error: {0}")]
    Connection(String),

    /// `connect()` was called while another attempt is still in flight
    #[error("Connection in progress")]
    ConnectionInProgress,

    /// The transport reported an error before the connection opened
    #[error("Transport failed to open: {0}")]
    TransportOpen(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing error (malformed endpoint or origin)
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Attempted operation while not connected to the server
    #[error("Not connected")]
    NotConnected,
}

/// Convenience type alias for `Result<T, RealtimeError>`.
pub type Result<T> = std::result::Result<T, RealtimeError>;
