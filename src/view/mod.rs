//! View rules independent of how a view is rendered.
//!
//! Both the web front-end and `leadctl` drive these types, so pagination,
//! form transitions and the stale-response guard behave the same in a
//! browser and in a terminal.
//!
//! # Modules
//!
//! - [`auth_form`] - Login/register form state machine
//! - [`dashboard_state`] - Dashboard query, loading flag and fetch tickets
//! - [`display`] - Status badges and date formatting
//! - [`pager`] - Pagination window and prev/next clamping

pub mod auth_form;
pub mod dashboard_state;
pub mod display;
pub mod pager;

pub use auth_form::{AlreadySubmitting, AuthForm, AuthFormState, AuthOutcome};
pub use dashboard_state::{DashboardState, FetchTicket, Outcome, SKELETON_ROWS, TableRows};
pub use display::{format_date, format_datetime};
pub use pager::{MAX_PAGE_BUTTONS, Pager};
