//! Business logic services for the application layer.

pub mod auth_service;
pub mod dashboard_service;
pub mod lead_service;

pub use auth_service::{AuthError, AuthService};
pub use dashboard_service::{DashboardData, DashboardService};
pub use lead_service::LeadService;
