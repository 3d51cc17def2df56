//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::application::services::DashboardService;
use crate::domain::entities::{Lead, LeadStatus, StageCount};
use crate::domain::query::{ListQuery, SortKey};
use crate::error::AppError;
use crate::state::AppState;
use crate::view::{DashboardState, Outcome, Pager, TableRows, format_date};
use crate::web::dto::DashboardParams;
use crate::web::middleware::web_auth::VisitorSession;

/// One row of the leads table.
pub struct LeadRow {
    pub href: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub badge_class: &'static str,
    pub created: String,
}

impl From<&Lead> for LeadRow {
    fn from(lead: &Lead) -> Self {
        Self {
            href: format!("/leads/{}", lead.id),
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            status: lead.status.to_string(),
            badge_class: lead.status.badge_class(),
            created: format_date(&lead.created_at),
        }
    }
}

/// Option of a `<select>` filter.
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Numbered pagination link.
pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub current: bool,
}

/// Template for the dashboard page.
///
/// Renders `templates/dashboard.html` with:
/// - Analytics cards and the per-stage breakdown
/// - Search, status and sort filters
/// - Leads table (or placeholder rows)
/// - Pagination window with previous/next links
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    total_leads: u64,
    converted_leads: u64,
    conversion_rate: String,
    stages: Vec<StageCount>,
    search: String,
    status_options: Vec<SelectOption>,
    sort_options: Vec<SelectOption>,
    rows: Vec<LeadRow>,
    skeleton_rows: Vec<usize>,
    page: u32,
    total_pages: u32,
    prev_href: Option<String>,
    next_href: Option<String>,
    page_links: Vec<PageLink>,
}

impl DashboardTemplate {
    fn from_state(view: &DashboardState) -> Self {
        let query = view.query();
        let pager = view.pager();

        let (rows, skeleton_rows) = match view.rows() {
            TableRows::Leads(leads) => (leads.iter().map(LeadRow::from).collect(), Vec::new()),
            TableRows::Skeleton(n) => (Vec::new(), (0..n).collect()),
        };

        let (total_leads, converted_leads, conversion_rate, stages) = match view.data() {
            Some(data) => (
                data.analytics.total_leads,
                data.analytics.converted_leads,
                data.analytics.conversion_rate_label(),
                data.analytics.leads_by_stage.clone(),
            ),
            None => (0, 0, "0".to_string(), Vec::new()),
        };

        Self {
            total_leads,
            converted_leads,
            conversion_rate,
            stages,
            search: query.search().to_string(),
            status_options: status_options(query),
            sort_options: sort_options(query),
            rows,
            skeleton_rows,
            page: pager.page(),
            total_pages: pager.total_pages(),
            prev_href: pager
                .has_prev()
                .then(|| query.dashboard_href(pager.prev())),
            next_href: pager
                .has_next()
                .then(|| query.dashboard_href(pager.next())),
            page_links: page_links(query, &pager),
        }
    }
}

fn status_options(query: &ListQuery) -> Vec<SelectOption> {
    let all = SelectOption {
        value: String::new(),
        label: "All Statuses".to_string(),
        selected: query.status().is_none(),
    };

    let known = LeadStatus::KNOWN.into_iter().map(|status| SelectOption {
        value: status.as_str().to_string(),
        label: status.as_str().to_string(),
        selected: query.status() == Some(&status),
    });

    // A status from the URL the filter doesn't offer stays selectable.
    let unknown = query
        .status()
        .filter(|status| !status.is_known())
        .map(|status| SelectOption {
            value: status.as_str().to_string(),
            label: status.as_str().to_string(),
            selected: true,
        });

    std::iter::once(all).chain(known).chain(unknown).collect()
}

fn sort_options(query: &ListQuery) -> Vec<SelectOption> {
    let current = query.sort().to_string();
    SortKey::OPTIONS
        .iter()
        .map(|(value, label)| SelectOption {
            value: value.to_string(),
            label: label.to_string(),
            selected: *value == current,
        })
        .collect()
}

fn page_links(query: &ListQuery, pager: &Pager) -> Vec<PageLink> {
    pager
        .window()
        .into_iter()
        .map(|number| PageLink {
            number,
            href: query.dashboard_href(number),
            current: number == pager.page(),
        })
        .collect()
}

/// Renders the dashboard.
///
/// # Endpoint
///
/// `GET /?page=&search=&status=&sort=`
///
/// # Data
///
/// The leads page and the analytics snapshot are fetched concurrently.
///
/// A `page` past the last page redirects (303) to the last page with the
/// same filters.
///
/// # Errors
///
/// Any fetch failure returns [`AppError::Unauthenticated`]: the session
/// cookie is cleared and the browser is sent to `/login`.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(VisitorSession(session)): Extension<VisitorSession>,
    Query(params): Query<DashboardParams>,
) -> Result<Response, AppError> {
    let mut view = DashboardState::new(params.into_query());
    let ticket = view.begin_fetch();

    let service = DashboardService::new(state.leads_api(session));
    let result = service.load(ticket.query()).await;

    match view.apply(ticket, result) {
        Outcome::Applied => match view.past_last_page() {
            Some(last) => {
                tracing::debug!(requested = view.query().page(), last, "Page past the end");
                Ok(Redirect::to(&view.query().dashboard_href(last)).into_response())
            }
            None => Ok(DashboardTemplate::from_state(&view).into_response()),
        },
        Outcome::Unauthenticated(status) => {
            tracing::warn!(?status, "Dashboard load failed, sending visitor to login");
            Err(AppError::Unauthenticated)
        }
        Outcome::Stale => Err(AppError::internal(
            "Dashboard response superseded",
            json!({ "page": view.query().page() }),
        )),
    }
}
