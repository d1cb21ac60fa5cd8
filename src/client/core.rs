use super::{ConnectionManager, ConnectionState, RealtimeClientBuilder, RealtimeClientOptions};
use crate::infrastructure::endpoint_from_origin;
use crate::messaging::{EventDispatcher, Listener, QuizEvent, Subscription};
use crate::types::Result;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;

/// The main entry point for talking to the quiz server in real time.
///
/// `RealtimeClient` keeps one WebSocket connection open, reconnects after
/// transient failures with a fixed delay and a bounded number of attempts,
/// sends a heartbeat while connected, and delivers inbound events to the
/// listeners registered with [`subscribe()`](Self::subscribe) or
/// [`on()`](Self::on).
///
/// Clones share the same connection and listeners. Separate calls to
/// [`new()`](Self::new) give fully independent clients. Dropping the last
/// clone closes the connection and stops the heartbeat and reconnect timers.
///
/// # Example
///
/// ```no_run
/// use quiz_realtime_rs::{QuizEvent, RealtimeClient, RealtimeClientOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RealtimeClient::new(
///     "ws://localhost:8080/ws/quiz",
///     RealtimeClientOptions::default(),
/// )?;
///
/// let _question = client.on(QuizEvent::QuestionPush, |question| {
///     println!("New question: {}", question);
/// });
///
/// client.connect().await?;
/// client.join_session(42, None, None);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RealtimeClient {
    pub(crate) endpoint: String,

    // Connection manager
    pub(crate) connection: Arc<ConnectionManager>,

    // Subscriber registry, independent of connection state
    pub(crate) dispatcher: EventDispatcher,
}

impl RealtimeClient {
    /// Creates a new RealtimeClient instance.
    ///
    /// This initializes the client but does not establish a connection. You must call
    /// [`connect()`](Self::connect) to establish the WebSocket connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid `ws://`/`wss://` URL or an
    /// interval option is zero.
    pub fn new(endpoint: impl Into<String>, options: RealtimeClientOptions) -> Result<Self> {
        RealtimeClientBuilder::new(endpoint, options).map(|builder| builder.build())
    }

    /// Creates a client for the quiz endpoint served from `origin`
    /// (e.g. `https://quiz.example.com` becomes `wss://quiz.example.com/ws/quiz`).
    pub fn from_origin(origin: &str, options: RealtimeClientOptions) -> Result<Self> {
        Self::new(endpoint_from_origin(origin)?, options)
    }

    /// Starts building a client with a custom transport.
    pub fn builder(
        endpoint: impl Into<String>,
        options: RealtimeClientOptions,
    ) -> Result<RealtimeClientBuilder> {
        RealtimeClientBuilder::new(endpoint, options)
    }

    /// Establishes the connection.
    ///
    /// Resolves once the transport reports open. If already connected this
    /// returns immediately without opening a second transport.
    ///
    /// # Errors
    ///
    /// - [`ConnectionInProgress`](crate::RealtimeError::ConnectionInProgress) if
    ///   another attempt is in flight; that attempt is not affected.
    /// - [`TransportOpen`](crate::RealtimeError::TransportOpen) if the transport
    ///   fails before opening. Automatic reconnection still follows.
    /// - [`Connection`](crate::RealtimeError::Connection) if the attempt is closed
    ///   or cancelled by [`disconnect()`](Self::disconnect) before opening.
    pub async fn connect(&self) -> Result<()> {
        self.connection.connect().await
    }

    /// Closes the connection and cancels the heartbeat and any pending
    /// reconnect. No automatic reconnection happens until the next
    /// [`connect()`](Self::connect). Listeners stay registered.
    pub fn disconnect(&self) {
        self.connection.disconnect();
    }

    /// Sends `event` with `data` (an empty object when `None`).
    ///
    /// Best effort: returns `false` without writing anything when the
    /// connection is not open. Queueing or retrying is up to the caller.
    pub fn send(&self, event: impl Into<QuizEvent>, data: impl Into<Option<Value>>) -> bool {
        let event = event.into();
        let data = data
            .into()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        self.connection.send(event.as_str(), data)
    }

    /// Serializes `payload` and sends it as the data of `event`.
    pub fn send_payload<T: Serialize>(&self, event: impl Into<QuizEvent>, payload: &T) -> bool {
        let event = event.into();
        match serde_json::to_value(payload) {
            Ok(data) => self.connection.send(event.as_str(), data),
            Err(e) => {
                tracing::error!("Failed to serialize payload for '{}': {}", event, e);
                false
            }
        }
    }

    /// Registers `listener` for `event`; use [`QuizEvent::Wildcard`] to receive
    /// every event as `{ "event": name, "data": payload }`.
    ///
    /// Works whether or not the client is connected. Delivery order among
    /// listeners of one event is unspecified.
    pub fn subscribe(&self, event: impl Into<QuizEvent>, listener: Listener) -> Subscription {
        self.dispatcher.subscribe(event, listener)
    }

    /// Registers a closure for `event`.
    pub fn on<F>(&self, event: impl Into<QuizEvent>, callback: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.dispatcher.subscribe(event, Listener::new(callback))
    }

    /// Removes `listener` from `event`, or every listener of `event` when `None`.
    pub fn unsubscribe(&self, event: impl Into<QuizEvent>, listener: Option<&Listener>) {
        self.dispatcher.unsubscribe(event, listener);
    }

    /// Checks whether the connection is currently open.
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Watches connection state transitions.
    ///
    /// `ConnectionState::Closed(ClosedReason::RetriesExhausted)` signals that
    /// automatic reconnection gave up.
    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.connection.state_changes()
    }

    /// The endpoint this client connects to (without the access token)
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
