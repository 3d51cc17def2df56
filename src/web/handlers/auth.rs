//! Submission flow shared by the login and register pages.

use std::future::Future;

use axum::{
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::services::AuthError;
use crate::domain::session::BackendSession;
use crate::state::AppState;
use crate::view::{AuthForm, AuthOutcome};
use crate::web::middleware::web_auth::session_cookie;

/// Runs one authentication attempt through the form state machine.
///
/// On success the issued session is stored in the browser and the visitor
/// is sent to the dashboard with `303 See Other`. On failure the message to
/// show on the form is returned.
pub(super) async fn submit<F>(state: &AppState, attempt: F) -> Result<Response, String>
where
    F: Future<Output = Result<BackendSession, AuthError>>,
{
    let mut form = AuthForm::new();
    form.begin_submit()
        .map_err(|_| "A submission is already in progress".to_string())?;

    let result = attempt.await;

    match (form.finish(&result), result) {
        (AuthOutcome::Redirect(to), Ok(session)) => {
            let cookie = session_cookie(&session, state.cookie_secure);
            Ok(([(SET_COOKIE, cookie)], Redirect::to(to)).into_response())
        }
        (AuthOutcome::ShowError(message), _) => {
            tracing::info!(error = %message, "Authentication rejected");
            Err(message)
        }
        (AuthOutcome::Redirect(_), Err(e)) => Err(e.to_string()),
    }
}
