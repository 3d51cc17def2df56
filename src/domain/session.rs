//! Backend session credentials and session status.
//!
//! The leads backend owns the session. The front-end only carries whatever
//! the backend handed out on login (cookies and/or a bearer token) and infers
//! "logged out" from failed requests.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;

/// Opaque credentials issued by the backend on login or registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSession {
    /// `name=value` pairs taken from the backend's `Set-Cookie` headers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cookies: Vec<String>,
    /// Bearer token, when the backend returns one in the response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl BackendSession {
    /// Captures the session from a backend response.
    ///
    /// Only the leading `name=value` pair of each `Set-Cookie` header is
    /// kept; attributes such as `Path` or `HttpOnly` are dropped. A string
    /// `token` field in the JSON body becomes the bearer token.
    pub fn from_response<'a>(set_cookies: impl IntoIterator<Item = &'a str>, body: &Value) -> Self {
        let cookies = set_cookies
            .into_iter()
            .filter_map(|header| header.split(';').next())
            .map(str::trim)
            .filter(|pair| pair.contains('=') && !pair.starts_with('='))
            .map(str::to_string)
            .collect();

        let token = body
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self { cookies, token }
    }

    /// Returns true when the backend handed out nothing to carry.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty() && self.token.is_none()
    }

    /// Value for an outgoing `Cookie` header, if any cookie was captured.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            None
        } else {
            Some(self.cookies.join("; "))
        }
    }

    /// Encodes the session into a single cookie-safe string.
    pub fn encode(&self) -> String {
        // Serializing a struct of strings cannot fail.
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decodes a value produced by [`BackendSession::encode`].
    ///
    /// Returns `None` for anything that does not decode cleanly.
    pub fn decode(encoded: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(encoded.trim()).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// What the front-end currently believes about the backend session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No evidence either way (startup, or a failure that is not an auth error).
    #[default]
    Unknown,
    /// The last login or registration succeeded.
    Authenticated,
    /// The backend rejected the session (401 or 403).
    Expired,
}

impl SessionStatus {
    /// Classifies a failed request by its HTTP status.
    ///
    /// Only 401 and 403 are evidence of an expired session; transport errors
    /// (`None`) and every other status stay `Unknown`.
    pub fn classify_failure(status: Option<u16>) -> Self {
        match status {
            Some(401) | Some(403) => SessionStatus::Expired,
            _ => SessionStatus::Unknown,
        }
    }
}

/// Process-wide session status flag.
///
/// The API client updates it from login results and failure classification;
/// views subscribe to it instead of redirecting ad hoc.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    tx: Arc<watch::Sender<SessionStatus>>,
}

impl SessionTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionStatus::Unknown);
        Self { tx: Arc::new(tx) }
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        *self.tx.borrow()
    }

    /// Records a new status; subscribers are only woken on an actual change.
    pub fn mark(&self, status: SessionStatus) {
        self.tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }

    /// Subscribes to status changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.tx.subscribe()
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}
