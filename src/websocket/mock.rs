//! In-memory transport for driving the client in tests.

use super::{CloseInfo, Connector, Frame, Transport, TransportEvent, TransportEvents};
use crate::types::{RealtimeError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

/// How a freshly opened mock transport behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MockBehavior {
    /// Emits `Open` immediately
    Accept,
    /// Emits `Error` followed by `Close`, like a refused connection
    Refuse,
    /// Emits nothing; the test drives events through the handle
    Manual,
}

/// Test-side view of one opened transport
#[derive(Clone)]
pub(crate) struct MockHandle {
    pub url: String,
    events: mpsc::UnboundedSender<TransportEvent>,
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl MockHandle {
    pub fn open(&self) {
        let _ = self.events.send(TransportEvent::Open);
    }

    pub fn message(&self, text: &str) {
        let _ = self
            .events
            .send(TransportEvent::Message(Frame::Text(text.to_string())));
    }

    pub fn error(&self, reason: &str) {
        let _ = self.events.send(TransportEvent::Error(reason.to_string()));
    }

    pub fn server_close(&self, code: u16, reason: &str) {
        self.closed.store(true, Ordering::SeqCst);
        let _ = self
            .events
            .send(TransportEvent::Close(CloseInfo::new(code, reason)));
    }

    /// Frames written by the client, decoded as JSON
    pub fn sent(&self) -> Vec<serde_json::Value> {
        self.sent
            .lock()
            .iter()
            .filter_map(|text| serde_json::from_str(text).ok())
            .collect()
    }

    pub fn sent_events(&self) -> Vec<String> {
        self.sent()
            .iter()
            .filter_map(|frame| frame["event"].as_str().map(str::to_string))
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

struct MockTransport {
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl Transport for MockTransport {
    fn send(&self, text: String) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(RealtimeError::NotConnected);
        }
        self.sent.lock().push(text);
        Ok(())
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub(crate) struct MockConnector {
    behavior: Arc<Mutex<MockBehavior>>,
    opened: Arc<Mutex<Vec<MockHandle>>>,
}

impl MockConnector {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock() = behavior;
    }

    pub fn open_count(&self) -> usize {
        self.opened.lock().len()
    }

    pub fn handle(&self, index: usize) -> MockHandle {
        self.opened.lock()[index].clone()
    }

    pub fn last(&self) -> MockHandle {
        self.opened
            .lock()
            .last()
            .cloned()
            .expect("no transport opened yet")
    }
}

impl Connector for MockConnector {
    fn open(&self, url: &str) -> (Box<dyn Transport>, TransportEvents) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let sent = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));

        let handle = MockHandle {
            url: url.to_string(),
            events: events_tx,
            sent: Arc::clone(&sent),
            closed: Arc::clone(&closed),
        };

        match *self.behavior.lock() {
            MockBehavior::Accept => handle.open(),
            MockBehavior::Refuse => {
                handle.error("connection refused");
                handle.server_close(1006, "connection refused");
            }
            MockBehavior::Manual => {}
        }

        self.opened.lock().push(handle);
        (Box::new(MockTransport { sent, closed }), events_rx)
    }
}
