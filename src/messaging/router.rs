use super::{EventDispatcher, QuizEvent};
use crate::types::message::Envelope;
use crate::websocket::Frame;

/// What happened to an inbound frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Delivered to this many listeners (possibly zero)
    Dispatched(usize),
    /// Heartbeat traffic consumed by the client
    Heartbeat,
    /// Not a valid envelope; dropped
    Malformed,
}

/// Routes incoming frames to the event dispatcher
pub struct MessageRouter {
    dispatcher: EventDispatcher,
}

impl MessageRouter {
    pub fn new(dispatcher: EventDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Decodes one frame and routes the resulting envelope.
    /// Malformed frames are logged and dropped.
    pub fn route_frame(&self, frame: &Frame) -> RouteOutcome {
        let parsed = match frame {
            Frame::Text(text) => {
                tracing::debug!("Received text frame: {}", text);
                Envelope::parse(text)
            }
            Frame::Binary(bytes) => {
                tracing::debug!("Received binary frame ({} bytes)", bytes.len());
                Envelope::parse_bytes(bytes)
            }
        };

        match parsed {
            Ok(envelope) => self.route(envelope),
            Err(e) => {
                tracing::warn!("Dropping malformed frame: {} - Raw: {:?}", e, frame);
                RouteOutcome::Malformed
            }
        }
    }

    /// Routes a decoded envelope to the appropriate listener(s)
    pub fn route(&self, envelope: Envelope) -> RouteOutcome {
        let event = QuizEvent::parse(&envelope.event);

        if event.is_heartbeat() {
            tracing::debug!("Received heartbeat {} at {}", event, envelope.timestamp);
            return RouteOutcome::Heartbeat;
        }

        tracing::debug!(
            "Routing message: event={}, data={}",
            envelope.event,
            envelope.data
        );

        RouteOutcome::Dispatched(self.dispatcher.dispatch(&envelope.event, &envelope.data))
    }
}
