use crate::types::constants::{QUIZ_WS_PATH, TOKEN_QUERY_PARAM};
use crate::types::{RealtimeError, Result};
use url::Url;

/// Derives the quiz WebSocket endpoint from a page origin:
/// `https://host:port` becomes `wss://host:port/ws/quiz`, anything else `ws://`.
pub fn endpoint_from_origin(origin: &str) -> Result<String> {
    let origin = Url::parse(origin)?;
    let host = origin
        .host_str()
        .ok_or_else(|| RealtimeError::Config(format!("origin '{}' has no host", origin)))?;

    let scheme = match origin.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };

    let authority = match origin.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    Ok(format!("{}://{}{}", scheme, authority, QUIZ_WS_PATH))
}

/// Validates a WebSocket endpoint and appends the access token, if any
pub fn build_endpoint_url(endpoint: &str, access_token: Option<&str>) -> Result<String> {
    let mut url = validate_endpoint(endpoint)?;

    if let Some(token) = access_token {
        url.query_pairs_mut().append_pair(TOKEN_QUERY_PARAM, token);
    }

    Ok(url.to_string())
}

/// Parses `endpoint` and checks that it is a `ws://` or `wss://` URL
pub fn validate_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => Err(RealtimeError::Config(format!(
            "endpoint scheme must be ws or wss, got '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_origin() {
        assert_eq!(
            endpoint_from_origin("http://localhost:8080").unwrap(),
            "ws://localhost:8080/ws/quiz"
        );
        assert_eq!(
            endpoint_from_origin("https://quiz.example.com").unwrap(),
            "wss://quiz.example.com/ws/quiz"
        );
        assert_eq!(
            endpoint_from_origin("https://quiz.example.com/admin/sessions?id=3").unwrap(),
            "wss://quiz.example.com/ws/quiz"
        );
    }

    #[test]
    fn test_endpoint_from_origin_rejects_garbage() {
        assert!(matches!(
            endpoint_from_origin("not a url"),
            Err(RealtimeError::UrlParse(_))
        ));
        assert!(matches!(
            endpoint_from_origin("file:///tmp/index.html"),
            Err(RealtimeError::Config(_))
        ));
    }

    #[test]
    fn test_build_endpoint_url_appends_token() {
        assert_eq!(
            build_endpoint_url("ws://localhost:8080/ws/quiz", None).unwrap(),
            "ws://localhost:8080/ws/quiz"
        );
        assert_eq!(
            build_endpoint_url("ws://localhost:8080/ws/quiz", Some("abc 123")).unwrap(),
            "ws://localhost:8080/ws/quiz?token=abc+123"
        );
    }

    #[test]
    fn test_validate_endpoint_scheme() {
        assert!(validate_endpoint("wss://quiz.example.com/ws/quiz").is_ok());
        assert!(matches!(
            validate_endpoint("https://quiz.example.com/ws/quiz"),
            Err(RealtimeError::Config(_))
        ));
    }
}
