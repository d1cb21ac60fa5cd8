// Messaging module - Event vocabulary, subscriber registry and inbound routing
pub mod dispatcher;
pub mod event;
pub mod payload;
pub mod router;

pub use dispatcher::{EventDispatcher, Listener, Subscription};
pub use event::QuizEvent;
pub use payload::{BuzzPayload, JoinSessionPayload, LeaveSessionPayload, SubmitAnswerPayload};
pub use router::{MessageRouter, RouteOutcome};
