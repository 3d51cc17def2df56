//! Domain layer containing the lead data model and session semantics.
//!
//! The front-end owns no data: every entity here is a read-only snapshot of
//! what the leads backend returned, decoded from its JSON wire format.
//!
//! # Architecture
//!
//! - [`entities`] - Leads, lead statuses and the analytics snapshot
//! - [`query`] - Lead list query state (page, search, status, sort)
//! - [`session`] - Backend session credentials and session status tracking
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Entities deserialize straight from the backend's camelCase payloads
//! - Display rules that only depend on entity data live next to the entity

pub mod entities;
pub mod query;
pub mod session;
