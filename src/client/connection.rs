use super::state::{ClientState, ClosedReason, ConnectionState};
use crate::infrastructure::{HeartbeatManager, TaskSlot, Timer};
use crate::messaging::{MessageRouter, QuizEvent};
use crate::types::constants::{
    HEARTBEAT_INTERVAL, MAX_RECONNECT_ATTEMPTS, RECONNECT_INTERVAL, WS_CLOSE_NORMAL,
};
use crate::types::{Envelope, RealtimeError, Result};
use crate::websocket::{CloseInfo, Connector, TransportEvent, TransportEvents};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{oneshot, watch};

/// Timing and retry settings, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub heartbeat_interval: Duration,
    pub reconnect_interval: Duration,
    pub max_reconnect_attempts: u32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_millis(HEARTBEAT_INTERVAL),
            reconnect_interval: Duration::from_millis(RECONNECT_INTERVAL),
            max_reconnect_attempts: MAX_RECONNECT_ATTEMPTS,
        }
    }
}

/// Owns the transport and drives the connection state machine.
///
/// Every transition happens under the `state` lock, which is never held
/// across an `.await` or while listeners run. Transport events, heartbeat
/// ticks and reconnect timers carry the generation they were started for and
/// are ignored once it is stale.
pub struct ConnectionManager {
    url: String,
    config: ConnectionConfig,
    connector: Arc<dyn Connector>,
    router: MessageRouter,
    state: Mutex<ClientState>,
}

impl ConnectionManager {
    pub fn new(
        url: String,
        config: ConnectionConfig,
        connector: Arc<dyn Connector>,
        router: MessageRouter,
    ) -> Self {
        let timer = Timer::new(config.reconnect_interval, config.max_reconnect_attempts);
        Self {
            url,
            config,
            connector,
            router,
            state: Mutex::new(ClientState::new(timer)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Gets the current connection state
    pub fn state(&self) -> ConnectionState {
        self.state.lock().state
    }

    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state.lock().watch_state()
    }

    /// Checks if the transport is currently open
    pub fn is_connected(&self) -> bool {
        let state = self.state.lock();
        state.state == ConnectionState::Connected && state.transport.is_some()
    }

    /// Reconnect attempts made since the last successful open or reset
    pub fn reconnect_attempts(&self) -> u32 {
        self.state.lock().timer.attempts()
    }

    /// Background tasks still running (driver, heartbeat, reconnect)
    pub fn active_tasks(&self) -> usize {
        self.state.lock().task_manager.active_count()
    }

    /// Opens a transport and waits for its open or error notification.
    pub async fn connect(self: &Arc<Self>) -> Result<()> {
        let pending = {
            let mut state = self.state.lock();
            match state.state {
                ConnectionState::Connected => return Ok(()),
                ConnectionState::Connecting => return Err(RealtimeError::ConnectionInProgress),
                // A fresh explicit connect gets a fresh retry budget
                ConnectionState::Idle | ConnectionState::Closed(_) => state.timer.reset(),
                ConnectionState::Reconnecting { .. } => {}
            }
            self.open_transport(&mut state)
        };

        pending.await.unwrap_or_else(|_| {
            Err(RealtimeError::Connection(
                "connection attempt was abandoned".to_string(),
            ))
        })
    }

    /// Closes the connection and cancels every timer. Always succeeds.
    pub fn disconnect(&self) {
        let mut state = self.state.lock();
        state.next_generation();
        state.task_manager.abort_all();
        state.resolve_pending(Err(RealtimeError::Connection(
            "disconnected before the connection opened".to_string(),
        )));

        if let Some(transport) = state.transport.take() {
            transport.close();
        }

        state.timer.reset();
        state.set_state(ConnectionState::Closed(ClosedReason::Manual));
        tracing::info!("Disconnected from {}", self.log_url());
    }

    /// Writes one envelope. Returns `false` without writing when not connected.
    pub fn send(&self, event: &str, data: Value) -> bool {
        let state = self.state.lock();
        if state.state != ConnectionState::Connected {
            tracing::warn!("Connection not ready, dropping '{}'", event);
            return false;
        }
        let Some(transport) = state.transport.as_ref() else {
            tracing::warn!("No transport, dropping '{}'", event);
            return false;
        };

        let json = match Envelope::new(event, data).to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize '{}': {}", event, e);
                return false;
            }
        };

        match transport.send(json) {
            Ok(()) => {
                tracing::debug!("Sent '{}'", event);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to send '{}': {}", event, e);
                false
            }
        }
    }

    /// Sends one ping for `generation`. Returns `false` once the heartbeat
    /// should stop.
    pub(crate) fn send_heartbeat(&self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        if self.send(QuizEvent::Ping.as_str(), serde_json::json!({})) {
            tracing::debug!("Sent heartbeat");
        }
        true
    }

    /// Endpoint without the query string, which may carry the access token
    fn log_url(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }

    fn is_current(&self, generation: u64) -> bool {
        let state = self.state.lock();
        state.generation == generation && state.state == ConnectionState::Connected
    }

    fn open_transport(
        self: &Arc<Self>,
        state: &mut ClientState,
    ) -> oneshot::Receiver<Result<()>> {
        state.task_manager.cancel(TaskSlot::Reconnect);
        state.task_manager.cancel(TaskSlot::Heartbeat);
        if let Some(previous) = state.transport.take() {
            previous.close();
        }

        let generation = state.next_generation();
        state.set_state(ConnectionState::Connecting);
        tracing::info!("Connecting to {}", self.log_url());

        let (transport, events) = self.connector.open(&self.url);
        state.transport = Some(transport);

        let (tx, rx) = oneshot::channel();
        state.pending_connect = Some(tx);

        state.task_manager.spawn(
            TaskSlot::Driver,
            Self::drive(Arc::downgrade(self), generation, events),
        );

        rx
    }

    /// Consumes the event stream of one transport. Holds the manager weakly so
    /// dropping the last client handle tears the connection down.
    async fn drive(connection: Weak<Self>, generation: u64, mut events: TransportEvents) {
        while let Some(event) = events.recv().await {
            let Some(this) = connection.upgrade() else {
                // Client dropped, exit driver task
                return;
            };

            match event {
                TransportEvent::Open => this.handle_open(generation),
                TransportEvent::Message(frame) => {
                    if !this.is_current(generation) {
                        tracing::debug!("Dropping frame for stale connection");
                        continue;
                    }
                    this.router.route_frame(&frame);
                }
                TransportEvent::Error(reason) => this.handle_error(generation, reason),
                TransportEvent::Close(info) => {
                    this.handle_close(generation, info);
                    return;
                }
            }
        }

        if let Some(this) = connection.upgrade() {
            this.handle_close(generation, CloseInfo::abnormal("transport event stream ended"));
        }
    }

    fn handle_open(self: &Arc<Self>, generation: u64) {
        let mut state = self.state.lock();
        if state.generation != generation || state.state != ConnectionState::Connecting {
            return;
        }

        state.timer.reset();
        state.set_state(ConnectionState::Connected);

        let heartbeat = HeartbeatManager::new(Arc::downgrade(self), generation)
            .with_interval(self.config.heartbeat_interval);
        state.task_manager.spawn(TaskSlot::Heartbeat, heartbeat.run());

        state.resolve_pending(Ok(()));
        tracing::info!("Connected to {}", self.log_url());
    }

    fn handle_error(&self, generation: u64, reason: String) {
        let mut state = self.state.lock();
        if state.generation != generation {
            return;
        }

        tracing::error!("Transport error: {}", reason);
        // Reconnection is driven by the close that follows
        if state.state == ConnectionState::Connecting {
            state.resolve_pending(Err(RealtimeError::TransportOpen(reason)));
        }
    }

    fn handle_close(self: &Arc<Self>, generation: u64, info: CloseInfo) {
        let mut state = self.state.lock();
        if state.generation != generation {
            return;
        }

        if info.code == WS_CLOSE_NORMAL {
            tracing::info!("Connection closed: code={}, reason='{}'", info.code, info.reason);
        } else {
            tracing::warn!("Connection closed: code={}, reason='{}'", info.code, info.reason);
        }

        state.task_manager.cancel(TaskSlot::Heartbeat);
        state.transport = None;
        state.resolve_pending(Err(RealtimeError::Connection(format!(
            "connection closed before opening (code {})",
            info.code
        ))));

        self.schedule_reconnect(&mut state);
    }

    fn schedule_reconnect(self: &Arc<Self>, state: &mut ClientState) {
        let Some(delay) = state.timer.next_delay() else {
            tracing::warn!(
                "Reached maximum reconnect attempts ({}), giving up",
                self.config.max_reconnect_attempts
            );
            state.set_state(ConnectionState::Closed(ClosedReason::RetriesExhausted));
            return;
        };

        let attempt = state.timer.attempts();
        state.set_state(ConnectionState::Reconnecting { attempt });
        tracing::info!(
            "Reconnecting in {:?} (attempt {}/{})",
            delay,
            attempt,
            self.config.max_reconnect_attempts
        );

        let generation = state.generation;
        let connection = Arc::downgrade(self);
        state.task_manager.spawn(TaskSlot::Reconnect, async move {
            tokio::time::sleep(delay).await;
            if let Some(connection) = connection.upgrade() {
                connection.reconnect_now(generation);
            }
        });
    }

    fn reconnect_now(self: &Arc<Self>, generation: u64) {
        let mut state = self.state.lock();
        if state.generation != generation
            || !matches!(state.state, ConnectionState::Reconnecting { .. })
        {
            tracing::debug!("Ignoring stale reconnect timer");
            return;
        }

        // Nobody awaits an automatic attempt; a failure surfaces as the next close
        drop(self.open_transport(&mut state));
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        state.task_manager.abort_all();
        if let Some(transport) = state.transport.take() {
            transport.close();
            tracing::debug!("Closed transport for {} on drop", self.log_url());
        }
    }
}
