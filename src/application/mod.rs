//! Application layer services orchestrating backend calls.
//!
//! Services consume the [`crate::infrastructure::api::LeadsApi`] trait and
//! provide a small API for the web handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Login, registration, guest login and logout
//! - [`services::dashboard_service::DashboardService`] - Lead list plus analytics, loaded together
//! - [`services::lead_service::LeadService`] - Single lead lookup

pub mod services;
