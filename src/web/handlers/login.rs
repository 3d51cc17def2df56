//! Login page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use validator::Validate;

use super::auth::submit;
use crate::application::services::AuthService;
use crate::state::AppState;
use crate::web::dto::{LoginForm, first_message};

/// Template for the login page.
///
/// Renders `templates/login.html` with:
/// - Email/password form, pre-filled with the last email
/// - Guest login button
/// - Error message of the last attempt
#[derive(Template, WebTemplate, Default)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    email: String,
    error: Option<String>,
}

impl LoginTemplate {
    fn with_error(email: impl Into<String>, error: String) -> Self {
        Self {
            email: email.into(),
            error: Some(error),
        }
    }
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate::default()
}

/// Submits the login form.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Responses
///
/// - **303 See Other** to `/` with the session cookie on success
/// - **200 OK** with the form and the server's message on failure
pub async fn login_handler(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    if let Err(errors) = form.validate() {
        let message = first_message(&errors, &["email", "password"]);
        return LoginTemplate::with_error(form.email, message).into_response();
    }

    let service = AuthService::new(state.leads_api(None));
    let credentials = form.credentials();

    match submit(&state, service.login(&credentials)).await {
        Ok(response) => response,
        Err(message) => LoginTemplate::with_error(form.email, message).into_response(),
    }
}

/// Logs in with the demo account from the login page.
///
/// # Endpoint
///
/// `POST /login/guest`
pub async fn login_guest_handler(State(state): State<AppState>) -> Response {
    let service = AuthService::new(state.leads_api(None));

    match submit(&state, service.guest_login()).await {
        Ok(response) => response,
        Err(message) => LoginTemplate::with_error("", message).into_response(),
    }
}
