// Module declarations
mod builder;
mod connection;
mod core;
mod quiz;
mod state;

// Public API exports
pub use builder::{RealtimeClientBuilder, RealtimeClientOptions};
pub use connection::{ConnectionConfig, ConnectionManager};
pub use self::core::RealtimeClient;
pub use state::{ClientState, ClosedReason, ConnectionState};
