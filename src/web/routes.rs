//! Web front-end route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    dashboard_handler, lead_handler, login_guest_handler, login_handler, login_page,
    logout_handler, register_guest_handler, register_handler, register_page,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Pages that talk to the backend with the visitor's session.
///
/// # Endpoints
///
/// - `GET /` - Dashboard with analytics, filters and the leads table
/// - `GET /leads/{id}` - Lead detail
/// - `POST /logout` - End the session
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/leads/{id}", get(lead_handler))
        .route("/logout", post(logout_handler))
}

/// Login and registration pages.
///
/// # Endpoints
///
/// - `GET|POST /login`, `POST /login/guest`
/// - `GET|POST /register`, `POST /register/guest`
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login_handler))
        .route("/login/guest", post(login_guest_handler))
        .route("/register", get(register_page).post(register_handler))
        .route("/register/guest", post(register_guest_handler))
}
