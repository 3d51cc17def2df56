//! Data loading for the dashboard view.

use std::sync::Arc;

use crate::domain::entities::{AnalyticsSnapshot, LeadPage};
use crate::domain::query::ListQuery;
use crate::infrastructure::api::{LeadsApi, RequestError};

/// Everything the dashboard renders after a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub page: LeadPage,
    pub analytics: AnalyticsSnapshot,
}

/// Service loading the lead list and the analytics snapshot together.
pub struct DashboardService<A: LeadsApi> {
    api: Arc<A>,
}

impl<A: LeadsApi> DashboardService<A> {
    /// Creates a new dashboard service.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Fetches the filtered page and the analytics snapshot concurrently.
    ///
    /// Uses `tokio::try_join!`: the first failure fails the whole load and
    /// no partial result is returned.
    ///
    /// # Errors
    ///
    /// Returns the [`RequestError`] of whichever request failed.
    pub async fn load(&self, query: &ListQuery) -> Result<DashboardData, RequestError> {
        let (page, analytics) =
            tokio::try_join!(self.api.list_leads(query), self.api.analytics())?;

        tracing::debug!(
            page = query.page(),
            rows = page.leads.len(),
            total_pages = page.total_pages,
            "Dashboard loaded"
        );

        Ok(DashboardData { page, analytics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LeadStatus;
    use crate::infrastructure::api::MockLeadsApi;
    use reqwest::StatusCode;

    fn analytics() -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            total_leads: 50,
            converted_leads: 5,
            leads_by_stage: vec![],
        }
    }

    #[tokio::test]
    async fn test_load_success() {
        let mut mock_api = MockLeadsApi::new();

        mock_api
            .expect_list_leads()
            .withf(|q| q.page() == 2 && q.status() == Some(&LeadStatus::New))
            .times(1)
            .returning(|_| {
                Ok(LeadPage {
                    leads: vec![],
                    total_pages: 5,
                })
            });
        mock_api
            .expect_analytics()
            .times(1)
            .returning(|| Ok(analytics()));

        let service = DashboardService::new(Arc::new(mock_api));
        let query = ListQuery::new()
            .with_status(Some(LeadStatus::New))
            .with_page(2);

        let data = service.load(&query).await.unwrap();

        assert_eq!(data.page.total_pages, 5);
        assert_eq!(data.analytics, analytics());
    }

    #[tokio::test]
    async fn test_load_fails_when_analytics_fails() {
        let mut mock_api = MockLeadsApi::new();

        mock_api.expect_list_leads().returning(|_| {
            Ok(LeadPage {
                leads: vec![],
                total_pages: 1,
            })
        });
        mock_api
            .expect_analytics()
            .returning(|| Err(RequestError::new("Unauthorized", Some(StatusCode::UNAUTHORIZED))));

        let service = DashboardService::new(Arc::new(mock_api));
        let err = service.load(&ListQuery::new()).await.unwrap_err();

        assert_eq!(err.message, "Unauthorized");
    }

    #[tokio::test]
    async fn test_load_fails_when_list_fails() {
        let mut mock_api = MockLeadsApi::new();

        mock_api
            .expect_list_leads()
            .returning(|_| Err(RequestError::new("An error occurred", Some(StatusCode::BAD_GATEWAY))));
        mock_api.expect_analytics().returning(|| Ok(analytics()));

        let service = DashboardService::new(Arc::new(mock_api));
        assert!(service.load(&ListQuery::new()).await.is_err());
    }
}
