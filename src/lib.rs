//! # Leadmaster
//!
//! A server-rendered lead management dashboard built with Axum, talking to a
//! remote leads backend over JSON.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Leads, analytics, credentials, list queries and sessions
//! - **Application Layer** ([`application`]) - Authentication, dashboard and lead services
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON client and typed backend endpoints
//! - **View Layer** ([`view`]) - Pagination, form and dashboard state rules
//! - **Web Layer** ([`web`]) - HTML pages, session cookie and routes
//!
//! Two binaries share these layers: `leadmaster` serves the web front-end
//! and `leadctl` is a terminal client.
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: point at another backend
//! export API_URL="http://localhost:4000/api"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod view;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for the binaries
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, DashboardService, LeadService};
    pub use crate::domain::entities::{AnalyticsSnapshot, Credentials, Lead, LeadPage, LeadStatus};
    pub use crate::domain::query::{ListQuery, SortKey};
    pub use crate::domain::session::{BackendSession, SessionStatus, SessionTracker};
    pub use crate::error::AppError;
    pub use crate::infrastructure::api::{ApiClient, HttpLeadsApi, LeadsApi, RequestError};
    pub use crate::state::AppState;
}
