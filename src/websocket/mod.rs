// WebSocket module - Transport abstraction and the tokio-tungstenite implementation
pub mod factory;
#[cfg(test)]
pub(crate) mod mock;
pub mod transport;

pub use factory::WebSocketFactory;
pub use transport::{CloseInfo, Connector, Frame, Transport, TransportEvent, TransportEvents};
