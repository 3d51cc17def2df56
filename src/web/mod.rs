//! Browser front-end.
//!
//! Server-rendered HTML pages (Askama templates under `templates/`) for
//! signing in, browsing leads and viewing a single lead. The visitor's
//! backend session travels in the `lm_session` cookie.
//!
//! # Modules
//!
//! - [`dto`] - Form bodies and query parameters
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Session cookie and request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
