use crate::client::ConnectionManager;
use crate::types::constants::HEARTBEAT_INTERVAL;
use std::sync::Weak;
use std::time::Duration;
use tokio::time;

/// Sends a `ping` envelope on a fixed period while one connection stays open.
///
/// The ping only keeps intermediaries from timing out an idle socket; loss of
/// the connection is detected by the transport's own close/error events.
pub struct HeartbeatManager {
    interval: Duration,
    connection: Weak<ConnectionManager>,
    generation: u64,
}

impl HeartbeatManager {
    pub fn new(connection: Weak<ConnectionManager>, generation: u64) -> Self {
        Self {
            interval: Duration::from_millis(HEARTBEAT_INTERVAL),
            connection,
            generation,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Runs until the connection it was started for goes away
    pub async fn run(self) {
        // First ping one full period after open, not immediately
        let start = time::Instant::now() + self.interval;
        let mut interval_timer = time::interval_at(start, self.interval);
        interval_timer.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

        loop {
            interval_timer.tick().await;

            let Some(connection) = self.connection.upgrade() else {
                // Client dropped, exit heartbeat task
                break;
            };

            if !connection.send_heartbeat(self.generation) {
                tracing::debug!("Heartbeat stopped for generation {}", self.generation);
                break;
            }
        }
    }
}
