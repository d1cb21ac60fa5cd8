use super::RealtimeClient;
use crate::messaging::{
    BuzzPayload, JoinSessionPayload, LeaveSessionPayload, QuizEvent, SubmitAnswerPayload,
};
use serde_json::Value;

/// Quiz session commands. Each is a plain [`send`](RealtimeClient::send) with a
/// fixed event name, so each returns `false` when the connection is not open.
impl RealtimeClient {
    /// Joins a quiz session, optionally as part of a team.
    pub fn join_session(&self, session_id: i64, team_id: Option<i64>, token: Option<&str>) -> bool {
        let payload = JoinSessionPayload {
            session_id,
            team_id,
            token: token.map(str::to_string),
        };
        self.send_payload(QuizEvent::JoinSession, &payload)
    }

    pub fn leave_session(&self, session_id: i64) -> bool {
        self.send_payload(QuizEvent::LeaveSession, &LeaveSessionPayload { session_id })
    }

    /// Buzzes in on a question. The server answers with `buzz_response`.
    pub fn buzz(
        &self,
        session_id: i64,
        question_id: i64,
        user_id: Option<i64>,
        team_id: Option<i64>,
    ) -> bool {
        let payload = BuzzPayload {
            session_id,
            question_id,
            user_id,
            team_id,
        };
        self.send_payload(QuizEvent::ClientBuzz, &payload)
    }

    /// Submits an answer; its shape depends on the question type.
    pub fn submit_answer(&self, session_id: i64, question_id: i64, answer: Value) -> bool {
        let payload = SubmitAnswerPayload {
            session_id,
            question_id,
            answer,
        };
        self.send_payload(QuizEvent::SubmitAnswer, &payload)
    }
}
