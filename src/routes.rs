//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                         - Dashboard
//! - `GET  /leads/{id}`               - Lead detail
//! - `GET|POST /login`, `/register`   - Authentication pages (+ `/guest`)
//! - `POST /logout`                   - End the session
//! - `GET  /health`                   - Liveness probe
//! - `/static/*`                      - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Session** - `lm_session` cookie decoded into a request extension
//! - **Path normalization** - Trailing slash handling

use crate::state::AppState;
use crate::web;
use crate::web::handlers::health_handler;
use crate::web::middleware::{tracing, web_auth};
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds the router with all routes and middleware, without path
/// normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(web::routes::session_routes())
        .merge(web::routes::public_routes())
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new("static"))
        .layer(middleware::from_fn(web_auth::layer))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router served by the binary.
///
/// Trailing slashes are trimmed before routing, so `/login/` reaches
/// `/login`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
