//! Access layer for the remote leads backend.
//!
//! - [`client`] - Generic JSON request wrapper ([`ApiClient`], [`RequestError`])
//! - [`leads_api`] - Typed backend endpoints ([`LeadsApi`], [`HttpLeadsApi`])

pub mod client;
pub mod leads_api;

pub use client::{ApiClient, ApiResponse, FALLBACK_ERROR_MESSAGE, RequestError, RequestOptions};
pub use leads_api::{HttpLeadsApi, LeadsApi};

#[cfg(test)]
pub use leads_api::MockLeadsApi;
