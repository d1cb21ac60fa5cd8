/// Reserved and quiz protocol event strings (magic strings layer)
pub mod quiz_events {
    pub const PING: &str = "ping";
    pub const PONG: &str = "pong";
    pub const WILDCARD: &str = "*";

    pub const JOIN_SESSION: &str = "join_session";
    pub const LEAVE_SESSION: &str = "leave_session";
    pub const CLIENT_BUZZ: &str = "client_buzz";
    pub const SUBMIT_ANSWER: &str = "submit_answer";

    pub const CONNECTED: &str = "connected";
    pub const JOIN_SUCCESS: &str = "join_success";
    pub const LEAVE_SUCCESS: &str = "leave_success";
    pub const BUZZ_RESPONSE: &str = "buzz_response";
    pub const BUZZ_RESULT: &str = "buzz_result";
    pub const ANSWER_RECEIVED: &str = "answer_received";
    pub const QUESTION_PUSH: &str = "question_push";
    pub const SCORE_UPDATE: &str = "score_update";
    pub const SESSION_STATE: &str = "session_state";
    pub const COUNTDOWN: &str = "countdown";
    pub const LEADERBOARD_UPDATE: &str = "leaderboard_update";
    pub const ANSWER_PROGRESS_UPDATE: &str = "answer_progress_update";
    pub const LEADERBOARD_CONFIG_UPDATE: &str = "leaderboard_config_update";
    pub const ERROR: &str = "error";
}

/// Path of the quiz WebSocket endpoint on the server
pub const QUIZ_WS_PATH: &str = "/ws/quiz";

/// Query parameter carrying the opaque access token
pub const TOKEN_QUERY_PARAM: &str = "token";

/// Default heartbeat interval (milliseconds)
pub const HEARTBEAT_INTERVAL: u64 = 30_000;

/// Default fixed delay between reconnect attempts (milliseconds)
pub const RECONNECT_INTERVAL: u64 = 3_000;

/// Default retry budget
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// WebSocket close codes
pub const WS_CLOSE_NORMAL: u16 = 1000;
pub const WS_CLOSE_ABNORMAL: u16 = 1006;
