use super::{CloseInfo, Connector, Frame, Transport, TransportEvent, TransportEvents};
use crate::types::constants::WS_CLOSE_NORMAL;
use crate::types::{RealtimeError, Result};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

enum Outbound {
    Text(String),
    Close,
}

/// Creates WebSocket connections with tokio-tungstenite
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketFactory;

impl Connector for WebSocketFactory {
    fn open(&self, url: &str) -> (Box<dyn Transport>, TransportEvents) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        tokio::spawn(run_socket(url.to_string(), outbound_rx, event_tx));

        (
            Box::new(WebSocketTransport {
                outbound: outbound_tx,
            }),
            event_rx,
        )
    }
}

struct WebSocketTransport {
    outbound: mpsc::UnboundedSender<Outbound>,
}

impl Transport for WebSocketTransport {
    fn send(&self, text: String) -> Result<()> {
        self.outbound
            .send(Outbound::Text(text))
            .map_err(|_| RealtimeError::NotConnected)
    }

    fn close(&self) {
        let _ = self.outbound.send(Outbound::Close);
    }
}

async fn run_socket(
    url: String,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    events: mpsc::UnboundedSender<TransportEvent>,
) {
    tracing::debug!("Creating WebSocket connection to: {}", url);

    let ws_stream = match tokio_tungstenite::connect_async(url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            let _ = events.send(TransportEvent::Error(e.to_string()));
            let _ = events.send(TransportEvent::Close(CloseInfo::abnormal(
                "connection failed",
            )));
            return;
        }
    };

    let _ = events.send(TransportEvent::Open);
    let (mut write_half, mut read_half) = ws_stream.split();

    let close_info = loop {
        tokio::select! {
            command = outbound.recv() => match command {
                Some(Outbound::Text(text)) => {
                    if let Err(e) = write_half.send(Message::Text(text.into())).await {
                        tracing::error!("WebSocket write error: {}", e);
                        let _ = events.send(TransportEvent::Error(e.to_string()));
                        break CloseInfo::abnormal("write failed");
                    }
                }
                // Close requested, or the transport handle was dropped
                Some(Outbound::Close) | None => {
                    if let Err(e) = write_half.close().await {
                        tracing::debug!("Close handshake failed: {}", e);
                    }
                    break CloseInfo::new(WS_CLOSE_NORMAL, "client closed");
                }
            },
            message = read_half.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    let _ = events.send(TransportEvent::Message(Frame::Text(text.as_str().to_string())));
                }
                Some(Ok(Message::Binary(data))) => {
                    let _ = events.send(TransportEvent::Message(Frame::Binary(data.to_vec())));
                }
                Some(Ok(Message::Close(frame))) => {
                    break match frame {
                        Some(close_frame) => CloseInfo::new(
                            u16::from(close_frame.code),
                            close_frame.reason.as_str().to_string(),
                        ),
                        None => CloseInfo::abnormal("closed without close frame"),
                    };
                }
                Some(Ok(Message::Ping(data))) => {
                    tracing::debug!("Received ping ({} bytes)", data.len());
                }
                Some(Ok(Message::Pong(data))) => {
                    tracing::debug!("Received pong ({} bytes)", data.len());
                }
                Some(Ok(Message::Frame(_))) => {
                    tracing::debug!("Received raw frame (internal)");
                }
                Some(Err(e)) => {
                    tracing::error!("WebSocket read error: {}", e);
                    let _ = events.send(TransportEvent::Error(e.to_string()));
                    break CloseInfo::abnormal("read failed");
                }
                None => break CloseInfo::abnormal("stream ended"),
            },
        }
    };

    let _ = events.send(TransportEvent::Close(close_info));
    tracing::debug!("WebSocket task finished for {}", url);
}
