//! Cookie-carried backend session for the web front-end.
//!
//! The browser holds the visitor's [`BackendSession`] in the `lm_session`
//! cookie. This middleware never rejects a request: a missing or undecodable
//! cookie just leaves the visitor anonymous, and the backend decides whether
//! a protected call succeeds.

use axum::{
    extract::Request,
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::Response,
};

use crate::domain::session::BackendSession;

/// Name of the browser cookie holding the encoded backend session.
pub const SESSION_COOKIE: &str = "lm_session";

/// Backend session of the current visitor, if any.
///
/// Inserted into request extensions by [`layer`].
#[derive(Debug, Clone, Default)]
pub struct VisitorSession(pub Option<BackendSession>);

/// Decodes the `lm_session` cookie into a [`VisitorSession`] extension.
///
/// # Cookie Format
///
/// ```text
/// Cookie: lm_session=<base64url(json)>
/// ```
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(dashboard_handler))
///     .layer(middleware::from_fn(web_auth::layer));
/// ```
pub async fn layer(mut req: Request, next: Next) -> Response {
    let session = read_session_cookie(req.headers()).and_then(|raw| BackendSession::decode(&raw));

    if session.is_none() {
        tracing::trace!("Anonymous visitor");
    }

    req.extensions_mut().insert(VisitorSession(session));
    next.run(req).await
}

/// Extracts the raw `lm_session` value from the `Cookie` headers.
pub fn read_session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|cookie_header| cookie_header.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(SESSION_COOKIE), Some(value)) if !value.is_empty() => Some(value.to_string()),
                _ => None,
            }
        })
}

/// `Set-Cookie` value storing `session` in the browser.
pub fn session_cookie(session: &BackendSession, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        session.encode()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}
