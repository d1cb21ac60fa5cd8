use crate::types::constants::quiz_events;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Type-safe quiz event names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuizEvent {
    /// Matches every inbound event (subscription key only)
    Wildcard,

    /// Heartbeat ping sent by the client
    Ping,
    /// Heartbeat acknowledgement sent by the server
    Pong,

    JoinSession,
    LeaveSession,
    ClientBuzz,
    SubmitAnswer,

    Connected,
    JoinSuccess,
    LeaveSuccess,
    BuzzResponse,
    BuzzResult,
    AnswerReceived,
    QuestionPush,
    ScoreUpdate,
    SessionState,
    Countdown,
    LeaderboardUpdate,
    AnswerProgressUpdate,
    LeaderboardConfigUpdate,
    Error,

    /// Any event name this crate does not know about
    Custom(String),
}

impl QuizEvent {
    /// Parse a string into a QuizEvent
    pub fn parse(s: &str) -> Self {
        match s {
            quiz_events::WILDCARD => Self::Wildcard,
            quiz_events::PING => Self::Ping,
            quiz_events::PONG => Self::Pong,
            quiz_events::JOIN_SESSION => Self::JoinSession,
            quiz_events::LEAVE_SESSION => Self::LeaveSession,
            quiz_events::CLIENT_BUZZ => Self::ClientBuzz,
            quiz_events::SUBMIT_ANSWER => Self::SubmitAnswer,
            quiz_events::CONNECTED => Self::Connected,
            quiz_events::JOIN_SUCCESS => Self::JoinSuccess,
            quiz_events::LEAVE_SUCCESS => Self::LeaveSuccess,
            quiz_events::BUZZ_RESPONSE => Self::BuzzResponse,
            quiz_events::BUZZ_RESULT => Self::BuzzResult,
            quiz_events::ANSWER_RECEIVED => Self::AnswerReceived,
            quiz_events::QUESTION_PUSH => Self::QuestionPush,
            quiz_events::SCORE_UPDATE => Self::ScoreUpdate,
            quiz_events::SESSION_STATE => Self::SessionState,
            quiz_events::COUNTDOWN => Self::Countdown,
            quiz_events::LEADERBOARD_UPDATE => Self::LeaderboardUpdate,
            quiz_events::ANSWER_PROGRESS_UPDATE => Self::AnswerProgressUpdate,
            quiz_events::LEADERBOARD_CONFIG_UPDATE => Self::LeaderboardConfigUpdate,
            quiz_events::ERROR => Self::Error,
            _ => Self::Custom(s.to_string()),
        }
    }

    /// Convert event to string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Wildcard => quiz_events::WILDCARD,
            Self::Ping => quiz_events::PING,
            Self::Pong => quiz_events::PONG,
            Self::JoinSession => quiz_events::JOIN_SESSION,
            Self::LeaveSession => quiz_events::LEAVE_SESSION,
            Self::ClientBuzz => quiz_events::CLIENT_BUZZ,
            Self::SubmitAnswer => quiz_events::SUBMIT_ANSWER,
            Self::Connected => quiz_events::CONNECTED,
            Self::JoinSuccess => quiz_events::JOIN_SUCCESS,
            Self::LeaveSuccess => quiz_events::LEAVE_SUCCESS,
            Self::BuzzResponse => quiz_events::BUZZ_RESPONSE,
            Self::BuzzResult => quiz_events::BUZZ_RESULT,
            Self::AnswerReceived => quiz_events::ANSWER_RECEIVED,
            Self::QuestionPush => quiz_events::QUESTION_PUSH,
            Self::ScoreUpdate => quiz_events::SCORE_UPDATE,
            Self::SessionState => quiz_events::SESSION_STATE,
            Self::Countdown => quiz_events::COUNTDOWN,
            Self::LeaderboardUpdate => quiz_events::LEADERBOARD_UPDATE,
            Self::AnswerProgressUpdate => quiz_events::ANSWER_PROGRESS_UPDATE,
            Self::LeaderboardConfigUpdate => quiz_events::LEADERBOARD_CONFIG_UPDATE,
            Self::Error => quiz_events::ERROR,
            Self::Custom(s) => s,
        }
    }

    /// Heartbeat events are handled by the client and never reach subscribers
    pub fn is_heartbeat(&self) -> bool {
        matches!(self, Self::Ping | Self::Pong)
    }
}

impl From<&str> for QuizEvent {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for QuizEvent {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&String> for QuizEvent {
    fn from(s: &String) -> Self {
        Self::parse(s)
    }
}

impl std::fmt::Display for QuizEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for QuizEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for QuizEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_event_parse() {
        assert_eq!(QuizEvent::parse("*"), QuizEvent::Wildcard);
        assert_eq!(QuizEvent::parse("pong"), QuizEvent::Pong);
        assert_eq!(QuizEvent::parse("buzz_result"), QuizEvent::BuzzResult);
        assert_eq!(
            QuizEvent::parse("leaderboard_config_update"),
            QuizEvent::LeaderboardConfigUpdate
        );
        assert_eq!(
            QuizEvent::parse("my_custom_event"),
            QuizEvent::Custom("my_custom_event".to_string())
        );
    }

    #[test]
    fn test_quiz_event_string_round_trip() {
        let events = vec![
            QuizEvent::Wildcard,
            QuizEvent::Ping,
            QuizEvent::Pong,
            QuizEvent::JoinSession,
            QuizEvent::LeaveSession,
            QuizEvent::ClientBuzz,
            QuizEvent::SubmitAnswer,
            QuizEvent::Connected,
            QuizEvent::JoinSuccess,
            QuizEvent::LeaveSuccess,
            QuizEvent::BuzzResponse,
            QuizEvent::BuzzResult,
            QuizEvent::AnswerReceived,
            QuizEvent::QuestionPush,
            QuizEvent::ScoreUpdate,
            QuizEvent::SessionState,
            QuizEvent::Countdown,
            QuizEvent::LeaderboardUpdate,
            QuizEvent::AnswerProgressUpdate,
            QuizEvent::LeaderboardConfigUpdate,
            QuizEvent::Error,
        ];

        for event in events {
            assert_eq!(QuizEvent::parse(event.as_str()), event);
        }
    }

    #[test]
    fn test_heartbeat_events() {
        assert!(QuizEvent::Ping.is_heartbeat());
        assert!(QuizEvent::Pong.is_heartbeat());
        assert!(!QuizEvent::Wildcard.is_heartbeat());
        assert!(!QuizEvent::Custom("pong2".to_string()).is_heartbeat());
    }

    #[test]
    fn test_quiz_event_serializes_as_plain_string() {
        let json = serde_json::to_string(&QuizEvent::QuestionPush).unwrap();
        assert_eq!(json, r#""question_push""#);

        let event: QuizEvent = serde_json::from_str(r#""something_new""#).unwrap();
        assert_eq!(event, QuizEvent::Custom("something_new".to_string()));
    }
}
