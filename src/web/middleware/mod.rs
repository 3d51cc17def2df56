//! Middleware for the web front-end.

pub mod tracing;
pub mod web_auth;
