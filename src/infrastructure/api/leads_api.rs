//! Typed endpoints of the leads backend.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::entities::{AnalyticsSnapshot, Credentials, Lead, LeadPage};
use crate::domain::query::ListQuery;
use crate::domain::session::{BackendSession, SessionStatus};
use crate::infrastructure::api::client::{ApiClient, RequestError, RequestOptions};

/// Operations the front-end performs against the leads backend.
///
/// # Implementations
///
/// - [`HttpLeadsApi`] - HTTP implementation over [`ApiClient`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadsApi: Send + Sync {
    /// `POST /auth/login`. Returns the session the backend issued.
    async fn login(&self, credentials: &Credentials) -> Result<BackendSession, RequestError>;

    /// `POST /auth/register`. Returns the session the backend issued.
    async fn register(&self, credentials: &Credentials) -> Result<BackendSession, RequestError>;

    /// `POST /auth/logout`.
    async fn logout(&self) -> Result<(), RequestError>;

    /// `GET /leads?page&limit&search&status&sort`.
    async fn list_leads(&self, query: &ListQuery) -> Result<LeadPage, RequestError>;

    /// `GET /leads/analytics`.
    async fn analytics(&self) -> Result<AnalyticsSnapshot, RequestError>;

    /// `GET /leads/:id`.
    async fn get_lead(&self, id: &str) -> Result<Lead, RequestError>;
}

/// [`LeadsApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpLeadsApi {
    client: ApiClient,
}

impl HttpLeadsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn authenticate(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<BackendSession, RequestError> {
        let body = serde_json::to_value(credentials)
            .map_err(|e| RequestError::new(format!("Failed to encode credentials: {e}"), None))?;

        let response = self
            .client
            .send(path, RequestOptions::post().json(body))
            .await?;

        if let Some(tracker) = self.client.tracker() {
            tracker.mark(SessionStatus::Authenticated);
        }

        Ok(response.session)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let body = self.client.request(path, RequestOptions::get()).await?;
        decode(path, body)
    }
}

#[async_trait]
impl LeadsApi for HttpLeadsApi {
    async fn login(&self, credentials: &Credentials) -> Result<BackendSession, RequestError> {
        self.authenticate("/auth/login", credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<BackendSession, RequestError> {
        self.authenticate("/auth/register", credentials).await
    }

    async fn logout(&self) -> Result<(), RequestError> {
        self.client
            .request("/auth/logout", RequestOptions::post())
            .await
            .map(|_| ())
    }

    async fn list_leads(&self, query: &ListQuery) -> Result<LeadPage, RequestError> {
        self.get(&query.leads_path()).await
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot, RequestError> {
        self.get("/leads/analytics").await
    }

    async fn get_lead(&self, id: &str) -> Result<Lead, RequestError> {
        self.get(&lead_path(id)?).await
    }
}

/// `/leads/{id}` with `id` kept to one path segment.
///
/// `.` and `..` would be resolved away by the URL parser, so they are
/// answered locally as not found.
fn lead_path(id: &str) -> Result<String, RequestError> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(RequestError::new("Lead not found", Some(StatusCode::NOT_FOUND)));
    }
    Ok(format!("/leads/{}", urlencoding::encode(id)))
}

/// Decodes a JSON body into a typed payload.
fn decode<T: DeserializeOwned>(path: &str, body: Value) -> Result<T, RequestError> {
    serde_json::from_value(body).map_err(|e| {
        tracing::warn!(%path, error = %e, "Unexpected backend payload");
        RequestError::new(format!("Unexpected response from {path}: {e}"), None)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_path_encodes_one_segment() {
        assert_eq!(lead_path("65a1f0c2").unwrap(), "/leads/65a1f0c2");
        assert_eq!(lead_path("abc?x=1").unwrap(), "/leads/abc%3Fx%3D1");
        assert_eq!(lead_path("../auth/logout").unwrap(), "/leads/..%2Fauth%2Flogout");
        assert_eq!(lead_path("a b#c").unwrap(), "/leads/a%20b%23c");
    }

    #[test]
    fn test_lead_path_rejects_dot_segments() {
        for id in ["", ".", ".."] {
            let err = lead_path(id).unwrap_err();
            assert_eq!(err.status, Some(StatusCode::NOT_FOUND));
        }
    }
}
