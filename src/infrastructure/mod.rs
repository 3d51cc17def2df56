//! Infrastructure layer for external integrations.
//!
//! The only external system is the leads backend, reached over HTTP.
//!
//! # Modules
//!
//! - [`api`] - JSON HTTP client and typed backend endpoints

pub mod api;
