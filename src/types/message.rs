use serde::{Deserialize, Deserializer, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// The unit of wire exchange: `{ "event", "data", "timestamp" }`.
///
/// The timestamp is assigned by the sender and is advisory only; it is never
/// used for ordering or deduplication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
    /// Missing, `null` or non-numeric values read as 0; fractions are truncated
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: i64,
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let timestamp = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|millis| millis as i64))
            .unwrap_or(0),
        _ => 0,
    };
    Ok(timestamp)
}

impl Envelope {
    /// Creates an envelope stamped with the current time.
    pub fn new(event: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            data,
            timestamp: now_millis(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Parses a text frame. Anything that is not a JSON object with a string
    /// `event` field is rejected.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Parses a binary frame carrying UTF-8 JSON.
    pub fn parse_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_new_stamps_current_time() {
        let before = now_millis();
        let envelope = Envelope::new("join_session", json!({"sessionId": 7}));
        let after = now_millis();

        assert_eq!(envelope.event, "join_session");
        assert_eq!(envelope.data, json!({"sessionId": 7}));
        assert!(envelope.timestamp >= before && envelope.timestamp <= after);
    }

    #[test]
    fn test_envelope_wire_format() {
        let envelope = Envelope::new("client_buzz", json!({"questionId": 3})).with_timestamp(42);
        let value: serde_json::Value = serde_json::from_str(&envelope.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({"event": "client_buzz", "data": {"questionId": 3}, "timestamp": 42})
        );
    }

    #[test]
    fn test_parse_server_frame_without_data() {
        // The server's pong and leave_success replies carry no data field
        let envelope = Envelope::parse(r#"{"event":"pong","timestamp":1700000000000}"#).unwrap();
        assert_eq!(envelope.event, "pong");
        assert_eq!(envelope.data, serde_json::Value::Null);
        assert_eq!(envelope.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn test_parse_tolerates_odd_timestamps() {
        let envelope = Envelope::parse(r#"{"event":"score_update","data":[],"timestamp":null}"#)
            .unwrap();
        assert_eq!(envelope.event, "score_update");
        assert_eq!(envelope.timestamp, 0);

        let envelope =
            Envelope::parse(r#"{"event":"countdown","data":{},"timestamp":1700000000000.75}"#)
                .unwrap();
        assert_eq!(envelope.timestamp, 1_700_000_000_000);

        let envelope = Envelope::parse(r#"{"event":"countdown","timestamp":"yesterday"}"#).unwrap();
        assert_eq!(envelope.timestamp, 0);
    }

    #[test]
    fn test_parse_rejects_malformed_frames() {
        assert!(Envelope::parse("not json").is_err());
        assert!(Envelope::parse("[1, 2, 3]").is_err());
        assert!(Envelope::parse(r#"{"data": {}}"#).is_err());
        assert!(Envelope::parse(r#"{"event": 12}"#).is_err());
    }

    #[test]
    fn test_parse_bytes() {
        let envelope = Envelope::parse_bytes(br#"{"event":"countdown","data":{"seconds":5}}"#)
            .unwrap();
        assert_eq!(envelope.event, "countdown");
        assert_eq!(envelope.data["seconds"], 5);

        assert!(Envelope::parse_bytes(&[0xff, 0xfe, 0x00]).is_err());
    }
}
