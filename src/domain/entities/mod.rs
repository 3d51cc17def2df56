//! Core domain entities mirroring the leads backend payloads.
//!
//! # Entity Types
//!
//! - [`Lead`] - A sales prospect with contact info and a pipeline status
//! - [`LeadStatus`] - Pipeline stage of a lead
//! - [`AnalyticsSnapshot`] - Server-computed aggregate counts
//! - [`LeadPage`] - One page of the filtered lead list
//! - [`Credentials`] - Login and registration payload
//!
//! Entities are immutable snapshots; the front-end never mutates them locally.

pub mod analytics;
pub mod credentials;
pub mod lead;

pub use analytics::{AnalyticsSnapshot, StageCount};
pub use credentials::Credentials;
pub use lead::{Lead, LeadPage, LeadStatus};
