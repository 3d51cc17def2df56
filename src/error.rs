//! Web layer error type.
//!
//! Handlers return [`AppError`] for anything that ends the normal page flow.
//! Browser-facing failures become a redirect or an HTML page; anything else
//! is reported as JSON: `{"error": {"code", "message", "details"}}`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::web::middleware::web_auth::clear_session_cookie;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Page shown when a lead cannot be loaded.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    message: String,
}

#[derive(Debug)]
pub enum AppError {
    /// The backend refused the visitor's session, or could not answer.
    /// Clears the session cookie and sends the browser to `/login`.
    Unauthenticated,
    /// Rendered as the 404 page.
    NotFound { message: String },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => (
                [(SET_COOKIE, clear_session_cookie())],
                Redirect::to("/login"),
            )
                .into_response(),
            AppError::NotFound { message } => {
                (StatusCode::NOT_FOUND, NotFoundTemplate { message }).into_response()
            }
            AppError::Internal { message, details } => {
                tracing::error!(%message, "Request failed");
                let body = ErrorBody {
                    error: ErrorInfo {
                        code: "internal_error",
                        message,
                        details,
                    },
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
