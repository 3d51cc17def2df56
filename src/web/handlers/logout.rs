use axum::{
    Extension,
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect},
};

use crate::application::services::AuthService;
use crate::state::AppState;
use crate::web::middleware::web_auth::{VisitorSession, clear_session_cookie};

/// Ends the session and returns to the login page.
///
/// # Endpoint
///
/// `POST /logout`
///
/// The backend logout is always attempted, with whatever session the
/// visitor holds, and is best effort; the cookie is cleared either way.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(VisitorSession(session)): Extension<VisitorSession>,
) -> impl IntoResponse {
    AuthService::new(state.leads_api(session)).logout().await;

    ([(SET_COOKIE, clear_session_cookie())], Redirect::to("/login"))
}
