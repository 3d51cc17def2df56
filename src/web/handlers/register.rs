//! Registration page handlers.

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
use crate::web::dto::{RegisterForm, first_message};

/// Template for the registration page.
#[derive(Template, WebTemplate, Default)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    email: String,
    error: Option<String>,
}

impl RegisterTemplate {
    fn with_error(email: impl Into<String>, error: String) -> Self {
        Self {
            email: email.into(),
            error: Some(error),
        }
    }
}

/// Renders the registration page.
///
/// # Endpoint
///
/// `GET /register`
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate::default()
}

/// Submits the registration form.
///
/// # Endpoint
///
/// `POST /register`
///
/// A confirmation that differs from the password is reported as
/// "Passwords do not match" and no backend request is made.
pub async fn register_handler(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        let message = first_message(&errors, &["email", "password"]);
        return RegisterTemplate::with_error(form.email, message).into_response();
    }

    let service = AuthService::new(state.leads_api(None));
    let credentials = form.credentials();

    match submit(&state, service.register(&credentials, &form.confirm_password)).await {
        Ok(response) => response,
        Err(message) => RegisterTemplate::with_error(form.email, message).into_response(),
    }
}

/// Logs in with the demo account from the registration page.
///
/// # Endpoint
///
/// `POST /register/guest`
pub async fn register_guest_handler(State(state): State<AppState>) -> Response {
    let service = AuthService::new(state.leads_api(None));

    match submit(&state, service.guest_login()).await {
        Ok(response) => response,
        Err(message) => RegisterTemplate::with_error("", message).into_response(),
    }
}
