//! Single lead lookup for the detail view.

use std::sync::Arc;

use reqwest::StatusCode;

use crate::domain::entities::Lead;
use crate::infrastructure::api::{LeadsApi, RequestError};

/// Service fetching one lead by identifier.
pub struct LeadService<A: LeadsApi> {
    api: Arc<A>,
}

impl<A: LeadsApi> LeadService<A> {
    /// Creates a new lead service.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Fetches the lead with identifier `id`.
    ///
    /// A blank identifier is answered locally as not found.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the identifier is blank or the backend
    /// request fails for any reason.
    pub async fn get(&self, id: &str) -> Result<Lead, RequestError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(RequestError::new("Lead not found", Some(StatusCode::NOT_FOUND)));
        }

        self.api.get_lead(id).await
    }
}
