use serde::{Deserialize, Serialize};

/// Payload of `join_session`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinSessionPayload {
    pub session_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Payload of `leave_session`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaveSessionPayload {
    pub session_id: i64,
}

/// Payload of `client_buzz`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuzzPayload {
    pub session_id: i64,
    pub question_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
}

/// Payload of `submit_answer`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerPayload {
    pub session_id: i64,
    pub question_id: i64,
    pub answer: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_session_omits_absent_fields() {
        let payload = JoinSessionPayload {
            session_id: 12,
            team_id: None,
            token: None,
        };
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"sessionId": 12}));

        let payload = JoinSessionPayload {
            session_id: 12,
            team_id: Some(4),
            token: Some("opaque".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"sessionId": 12, "teamId": 4, "token": "opaque"})
        );
    }

    #[test]
    fn test_buzz_payload_camel_case() {
        let payload = BuzzPayload {
            session_id: 1,
            question_id: 99,
            user_id: Some(5),
            team_id: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"sessionId": 1, "questionId": 99, "userId": 5})
        );
    }

    #[test]
    fn test_submit_answer_keeps_arbitrary_answer() {
        let payload = SubmitAnswerPayload {
            session_id: 1,
            question_id: 2,
            answer: json!(["A", "C"]),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"sessionId": 1, "questionId": 2, "answer": ["A", "C"]})
        );
    }
}
