// Infrastructure module - Core background services and utilities
pub mod endpoint;
pub mod heartbeat;
pub mod task_manager;
pub mod timer;

pub use endpoint::{build_endpoint_url, endpoint_from_origin, validate_endpoint};
pub use heartbeat::HeartbeatManager;
pub use task_manager::{TaskManager, TaskSlot};
pub use timer::Timer;
