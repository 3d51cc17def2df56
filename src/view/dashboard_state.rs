//! Dashboard list and analytics state with a stale-response guard.
//!
//! Every fetch gets a [`FetchTicket`] stamped with a sequence number. Only
//! the result of the most recent ticket is applied; an older response that
//! resolves late is discarded instead of overwriting newer data.

use crate::application::services::DashboardData;
use crate::domain::entities::Lead;
use crate::domain::query::ListQuery;
use crate::domain::session::SessionStatus;
use crate::infrastructure::api::RequestError;
use crate::view::pager::Pager;

/// Placeholder rows rendered while a fetch is in flight.
pub const SKELETON_ROWS: usize = 5;

/// Handle for one in-flight dashboard fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: ListQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The query this fetch was issued for.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

/// Result of applying a fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The data is now displayed.
    Applied,
    /// A newer fetch was issued meanwhile; the result was dropped.
    Stale,
    /// The fetch failed. Any failure sends the user back to the login page;
    /// the status says whether the backend actually rejected the session.
    Unauthenticated(SessionStatus),
}

/// What the leads table body shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableRows<'a> {
    Skeleton(usize),
    Leads(&'a [Lead]),
}

/// State of the dashboard view.
#[derive(Debug, Clone)]
pub struct DashboardState {
    query: ListQuery,
    seq: u64,
    loading: bool,
    data: Option<DashboardData>,
}

impl DashboardState {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            seq: 0,
            loading: false,
            data: None,
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Data from the last applied fetch.
    pub fn data(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }

    /// Pager for the current page; one page until the first load.
    pub fn pager(&self) -> Pager {
        let total = self.data.as_ref().map_or(1, |d| d.page.total_pages);
        Pager::new(self.query.page(), total)
    }

    /// Last page of the loaded result when the query points past it, as
    /// happens with a stale bookmark after leads were removed.
    pub fn past_last_page(&self) -> Option<u32> {
        let total = self.data.as_ref()?.page.total_pages.max(1);
        (self.query.page() > total).then_some(total)
    }

    pub fn rows(&self) -> TableRows<'_> {
        match (&self.data, self.loading) {
            (Some(data), false) => TableRows::Leads(&data.page.leads),
            _ => TableRows::Skeleton(SKELETON_ROWS),
        }
    }

    /// Starts a fetch for the current query.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.seq += 1;
        self.loading = true;
        FetchTicket {
            seq: self.seq,
            query: self.query.clone(),
        }
    }

    /// Replaces the query and starts a fetch if it actually changed.
    pub fn update_query(&mut self, update: impl FnOnce(ListQuery) -> ListQuery) -> Option<FetchTicket> {
        let next = update(self.query.clone());
        if next == self.query {
            return None;
        }
        self.query = next;
        Some(self.begin_fetch())
    }

    /// Moves to `page`, clamped to the known page range.
    pub fn go_to_page(&mut self, page: u32) -> Option<FetchTicket> {
        let page = page.clamp(1, self.pager().total_pages());
        self.update_query(|q| q.with_page(page))
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        let next = self.pager().next();
        self.go_to_page(next)
    }

    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        let prev = self.pager().prev();
        self.go_to_page(prev)
    }

    /// Applies the result of the fetch identified by `ticket`.
    pub fn apply(&mut self, ticket: FetchTicket, result: Result<DashboardData, RequestError>) -> Outcome {
        if ticket.seq != self.seq {
            tracing::debug!(ticket = ticket.seq, latest = self.seq, "Dropping stale dashboard response");
            return Outcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                Outcome::Applied
            }
            Err(e) => Outcome::Unauthenticated(e.session_status()),
        }
    }
}
