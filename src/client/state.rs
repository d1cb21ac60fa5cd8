use crate::infrastructure::{TaskManager, Timer};
use crate::types::Result;
use crate::websocket::Transport;
use tokio::sync::{oneshot, watch};

/// Lifecycle of the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Never connected
    Idle,
    /// A transport has been opened and its outcome is pending
    Connecting,
    Connected,
    /// Waiting out the backoff before reconnect attempt `attempt`
    Reconnecting { attempt: u32 },
    /// No automatic activity; only an explicit `connect()` resumes
    Closed(ClosedReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedReason {
    /// `disconnect()` was called
    Manual,
    /// The retry budget ran out
    RetriesExhausted,
}

/// Consolidated mutable state of one connection.
/// Only the connection manager mutates it, always under a single lock.
pub struct ClientState {
    pub state: ConnectionState,

    /// Bumped on every connect attempt and every disconnect. Tasks started
    /// for an older generation become no-ops.
    pub generation: u64,

    /// Live transport handle, if any
    pub transport: Option<Box<dyn Transport>>,

    /// Reconnect attempt counter and backoff
    pub timer: Timer,

    /// Completes the in-flight `connect()` call
    pub pending_connect: Option<oneshot::Sender<Result<()>>>,

    /// Driver, heartbeat and reconnect tasks
    pub task_manager: TaskManager,

    state_change_tx: watch::Sender<ConnectionState>,
}

impl ClientState {
    pub fn new(timer: Timer) -> Self {
        let (state_change_tx, _) = watch::channel(ConnectionState::Idle);
        Self {
            state: ConnectionState::Idle,
            generation: 0,
            transport: None,
            timer,
            pending_connect: None,
            task_manager: TaskManager::new(),
            state_change_tx,
        }
    }

    /// Set connection state and notify watchers
    pub fn set_state(&mut self, new_state: ConnectionState) {
        if self.state != new_state {
            tracing::debug!("Connection state {:?} -> {:?}", self.state, new_state);
        }
        self.state = new_state;
        self.state_change_tx.send_replace(new_state);
    }

    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_change_tx.subscribe()
    }

    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Completes the pending `connect()` call, if there is one
    pub fn resolve_pending(&mut self, result: Result<()>) {
        if let Some(tx) = self.pending_connect.take()
            && tx.send(result).is_err()
        {
            tracing::debug!("Connect caller went away before the attempt finished");
        }
    }
}
