//! HTML template rendering handlers for the web front-end.

mod auth;
mod dashboard;
mod health;
mod lead;
mod login;
mod logout;
mod register;

pub use dashboard::dashboard_handler;
pub use health::health_handler;
pub use lead::lead_handler;
pub use login::{login_guest_handler, login_handler, login_page};
pub use logout::logout_handler;
pub use register::{register_guest_handler, register_handler, register_page};
