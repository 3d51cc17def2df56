//! Lead detail page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::application::services::LeadService;
use crate::domain::entities::Lead;
use crate::error::AppError;
use crate::state::AppState;
use crate::view::format_datetime;
use crate::web::middleware::web_auth::VisitorSession;

/// Template for the lead detail page.
///
/// "Back" returns to the previous history entry; "Edit Lead" is shown
/// disabled.
#[derive(Template, WebTemplate)]
#[template(path = "lead.html")]
pub struct LeadTemplate {
    name: String,
    email: String,
    phone: String,
    status: String,
    badge_class: &'static str,
    created_at: String,
    updated_at: String,
}

impl From<Lead> for LeadTemplate {
    fn from(lead: Lead) -> Self {
        Self {
            badge_class: lead.status.badge_class(),
            status: lead.status.to_string(),
            created_at: format_datetime(&lead.created_at),
            updated_at: lead
                .updated_at
                .as_ref()
                .map(format_datetime)
                .unwrap_or_else(|| "Never".to_string()),
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
        }
    }
}

/// Renders one lead.
///
/// # Endpoint
///
/// `GET /leads/{id}`
///
/// # Errors
///
/// Any failure to load the lead renders the "Lead not found" page with
/// **404 Not Found**.
pub async fn lead_handler(
    State(state): State<AppState>,
    Extension(VisitorSession(session)): Extension<VisitorSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let service = LeadService::new(state.leads_api(session));

    match service.get(&id).await {
        Ok(lead) => Ok(LeadTemplate::from(lead)),
        Err(e) => {
            tracing::warn!(lead_id = %id, error = %e, status = ?e.session_status(), "Lead lookup failed");
            Err(AppError::not_found("Lead not found"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LeadStatus;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_template_formats_timestamps() {
        let lead = Lead {
            id: "abc".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            status: LeadStatus::Qualified,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap(),
            updated_at: Some(Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 5).unwrap()),
        };

        let template = LeadTemplate::from(lead);

        assert_eq!(template.created_at, "1/15/2024, 2:30:00 PM");
        assert_eq!(template.updated_at, "2/1/2024, 8:00:05 AM");
        assert_eq!(template.badge_class, "badge badge-qualified");
    }
}
