//! # Quiz Realtime Rust
//!
//! A resilient WebSocket client for the live quiz server: JSON event
//! envelopes, a periodic heartbeat, fixed-delay reconnection with a bounded
//! retry budget, and per-event or wildcard subscriptions.
//!
//! ## Example
//!
//! ```no_run
//! use quiz_realtime_rs::{QuizEvent, RealtimeClient, RealtimeClientOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RealtimeClient::new(
//!         "wss://quiz.example.com/ws/quiz",
//!         RealtimeClientOptions {
//!             access_token: Some("your-token".to_string()),
//!             ..Default::default()
//!         },
//!     )?;
//!
//!     let _scores = client.on(QuizEvent::ScoreUpdate, |scores| {
//!         println!("Scores: {}", scores);
//!     });
//!
//!     client.connect().await?;
//!     client.join_session(42, Some(7), None);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod infrastructure;
pub mod messaging;
pub mod types;
pub mod websocket;

pub use client::{
    ClosedReason, ConnectionState, RealtimeClient, RealtimeClientBuilder, RealtimeClientOptions,
};
pub use infrastructure::endpoint_from_origin;
pub use messaging::{
    BuzzPayload, EventDispatcher, JoinSessionPayload, LeaveSessionPayload, Listener, QuizEvent,
    SubmitAnswerPayload, Subscription,
};
pub use types::{Envelope, RealtimeError, Result};
pub use websocket::{CloseInfo, Connector, Frame, Transport, TransportEvent, WebSocketFactory};
