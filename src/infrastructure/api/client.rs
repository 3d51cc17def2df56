//! Thin JSON client for the leads backend.
//!
//! Every call prefixes the configured base URL, sends JSON headers, parses the
//! JSON response and turns any non-success status into a [`RequestError`].
//! There is no retry, timeout or caching at this level.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue, SET_COOKIE};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::domain::session::{BackendSession, SessionStatus, SessionTracker};

/// Message used when a failed response carries no usable `message` field.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// The single failure kind of the API client.
///
/// HTTP errors, transport errors and undecodable bodies all collapse into a
/// message; the HTTP status is kept when there was one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
    pub status: Option<StatusCode>,
}

impl RequestError {
    pub fn new(message: impl Into<String>, status: Option<StatusCode>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Builds the error for a non-success response from its raw body.
    ///
    /// Uses the body's `message` field when the body is JSON and the field is
    /// a non-empty string, otherwise [`FALLBACK_ERROR_MESSAGE`].
    pub fn from_response_body(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|json| {
                json.get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

        Self::new(message, Some(status))
    }

    /// What this failure says about the backend session.
    pub fn session_status(&self) -> SessionStatus {
        SessionStatus::classify_failure(self.status.map(|s| s.as_u16()))
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string(), err.status())
    }
}

/// Per-call overrides: method, JSON body and extra headers.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::default()
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header; it replaces a default header of the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
        }
    }
}

/// A successful response: parsed body plus whatever session it carried.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
    pub session: BackendSession,
}

/// HTTP client bound to the backend base URL.
///
/// Cloning is cheap; the underlying connection pool is shared. Use
/// [`ApiClient::with_session`] to derive a client that forwards a user's
/// backend session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<BackendSession>,
    tracker: Option<SessionTracker>,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `https://backend.example.com/api`).
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the HTTP client cannot be initialised.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| RequestError::new(format!("Failed to build HTTP client: {e}"), None))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: None,
            tracker: None,
        })
    }

    /// Returns a client that forwards `session` on every request.
    pub fn with_session(&self, session: Option<BackendSession>) -> Self {
        Self {
            session,
            ..self.clone()
        }
    }

    /// Attaches a session tracker updated from login results and auth failures.
    pub fn with_tracker(mut self, tracker: SessionTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&BackendSession> {
        self.session.as_ref()
    }

    pub fn tracker(&self) -> Option<&SessionTracker> {
        self.tracker.as_ref()
    }

    /// Issues a request and resolves with the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] for non-success statuses, transport failures
    /// and non-JSON success bodies.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, RequestError> {
        self.send(path, options).await.map(|response| response.body)
    }

    /// Like [`ApiClient::request`] but also captures the session the
    /// response carried (`Set-Cookie` pairs and body `token`).
    pub async fn send(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, RequestError> {
        let url = format!("{}{}", self.base_url, path);
        let method = options.method.clone();

        let mut request = self
            .http
            .request(options.method, &url)
            .headers(self.headers(options.headers));

        if let Some(body) = options.body {
            let bytes = serde_json::to_vec(&body)
                .map_err(|e| RequestError::new(format!("Failed to encode request: {e}"), None))?;
            request = request.body(bytes);
        }

        tracing::debug!(%method, %url, "Backend request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, %url, error = %e, "Backend unreachable");
                return Err(e.into());
            }
        };

        let status = response.status();
        let set_cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let err = RequestError::from_response_body(status, &bytes);
            tracing::warn!(
                %method,
                %url,
                status = status.as_u16(),
                session = ?err.session_status(),
                message = %err.message,
                "Backend request failed"
            );
            if let Some(tracker) = &self.tracker
                && err.session_status() == SessionStatus::Expired
            {
                tracker.mark(SessionStatus::Expired);
            }
            return Err(err);
        }

        let body = parse_body(status, &bytes)?;
        let session = BackendSession::from_response(set_cookies.iter().map(String::as_str), &body);

        Ok(ApiResponse {
            status,
            body,
            session,
        })
    }

    /// Default JSON headers, then the forwarded session, then caller headers.
    fn headers(&self, overrides: HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(session) = &self.session {
            if let Some(cookie) = session
                .cookie_header()
                .and_then(|c| HeaderValue::from_str(&c).ok())
            {
                headers.insert(COOKIE, cookie);
            }
            if let Some(token) = session
                .token
                .as_ref()
                .and_then(|t| HeaderValue::from_str(&format!("Bearer {t}")).ok())
            {
                headers.insert(AUTHORIZATION, token);
            }
        }

        for (name, value) in overrides.iter() {
            headers.insert(name.clone(), value.clone());
        }

        headers
    }
}

/// Parses a success body. An empty body is `null`.
fn parse_body(status: StatusCode, bytes: &[u8]) -> Result<Value, RequestError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(bytes)
        .map_err(|e| RequestError::new(format!("Invalid JSON response: {e}"), Some(status)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json_body() {
        let err = RequestError::from_response_body(
            StatusCode::UNAUTHORIZED,
            br#"{"message":"Invalid credentials"}"#,
        );
        assert_eq!(err.message, "Invalid credentials");
        assert_eq!(err.status, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_error_message_fallbacks() {
        let cases: [&[u8]; 5] = [
            b"<html>502 Bad Gateway</html>",
            b"",
            br#"{"error":"nope"}"#,
            br#"{"message":""}"#,
            br#"{"message":42}"#,
        ];

        for body in cases {
            let err = RequestError::from_response_body(StatusCode::BAD_GATEWAY, body);
            assert_eq!(err.message, FALLBACK_ERROR_MESSAGE);
        }
    }

    #[test]
    fn test_session_status_classification() {
        let expired = RequestError::new("x", Some(StatusCode::FORBIDDEN));
        let server = RequestError::new("x", Some(StatusCode::INTERNAL_SERVER_ERROR));
        let transport = RequestError::new("x", None);

        assert_eq!(expired.session_status(), SessionStatus::Expired);
        assert_eq!(server.session_status(), SessionStatus::Unknown);
        assert_eq!(transport.session_status(), SessionStatus::Unknown);
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(StatusCode::OK, b"").unwrap(), Value::Null);
        assert_eq!(parse_body(StatusCode::NO_CONTENT, b"  \n").unwrap(), Value::Null);
        assert_eq!(
            parse_body(StatusCode::OK, b"[1,2]").unwrap(),
            serde_json::json!([1, 2])
        );
        assert!(parse_body(StatusCode::OK, b"OK").is_err());
    }

    #[test]
    fn test_headers_merge_order() {
        let client = ApiClient::new("http://backend.test/api/")
            .unwrap()
            .with_session(Some(BackendSession {
                cookies: vec!["sid=1".to_string()],
                token: Some("tok".to_string()),
            }));

        assert_eq!(client.base_url(), "http://backend.test/api");

        let mut overrides = HeaderMap::new();
        overrides.insert(CONTENT_TYPE, HeaderValue::from_static("application/vnd.api+json"));
        overrides.insert("x-request-id", HeaderValue::from_static("abc"));

        let headers = client.headers(overrides);
        assert_eq!(headers[CONTENT_TYPE], "application/vnd.api+json");
        assert_eq!(headers[COOKIE], "sid=1");
        assert_eq!(headers[AUTHORIZATION], "Bearer tok");
        assert_eq!(headers["x-request-id"], "abc");
    }

    #[test]
    fn test_default_headers_without_session() {
        let client = ApiClient::new("http://backend.test").unwrap();
        let headers = client.headers(HeaderMap::new());

        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(headers.get(COOKIE).is_none());
        assert!(headers.get(AUTHORIZATION).is_none());
    }
}
