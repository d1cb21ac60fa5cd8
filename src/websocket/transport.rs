use crate::types::Result;
use crate::types::constants::WS_CLOSE_ABNORMAL;
use tokio::sync::mpsc;

/// A single inbound message frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

/// Close code and reason reported by the transport. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseInfo {
    pub code: u16,
    pub reason: String,
}

impl CloseInfo {
    pub fn new(code: u16, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }

    /// Connection dropped without a close handshake
    pub fn abnormal(reason: impl Into<String>) -> Self {
        Self::new(WS_CLOSE_ABNORMAL, reason)
    }
}

/// Lifecycle notifications emitted by a transport, in order.
///
/// A transport emits `Open` at most once and `Close` exactly once, as its last
/// event. `Error` may precede `Close`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Open,
    Message(Frame),
    Close(CloseInfo),
    Error(String),
}

pub type TransportEvents = mpsc::UnboundedReceiver<TransportEvent>;

/// Write side of one connection attempt
pub trait Transport: Send + Sync {
    /// Queues a text frame for writing
    fn send(&self, text: String) -> Result<()>;

    /// Starts the close handshake. Safe to call more than once.
    fn close(&self);
}

/// Opens transports. Must not block: the outcome of the attempt is reported
/// through the returned event stream.
pub trait Connector: Send + Sync + 'static {
    fn open(&self, url: &str) -> (Box<dyn Transport>, TransportEvents);
}
