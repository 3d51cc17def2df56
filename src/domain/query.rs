//! List query state for the lead list.
//!
//! The query is the only state the dashboard keeps between requests. It is
//! encoded into the `GET /leads` query string and into the dashboard's own
//! URL so pagination links carry the active filters.

use std::fmt;

use url::form_urlencoded;

use crate::domain::entities::LeadStatus;

/// Number of leads requested per page.
pub const PAGE_SIZE: u32 = 10;

/// Sort order for the lead list: a field name, optionally descending.
///
/// On the wire a leading `-` marks descending order (`-createdAt`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    /// Sort options offered by the dashboard, with their labels.
    pub const OPTIONS: [(&'static str, &'static str); 4] = [
        ("-createdAt", "Newest First"),
        ("createdAt", "Oldest First"),
        ("name", "Name (A-Z)"),
        ("-name", "Name (Z-A)"),
    ];

    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Parses the wire form. An empty string yields the default sort.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.strip_prefix('-') {
            Some(field) if !field.is_empty() => Self::descending(field),
            _ if raw.is_empty() || raw == "-" => Self::default(),
            _ => Self::ascending(raw),
        }
    }
}

impl Default for SortKey {
    /// Newest leads first.
    fn default() -> Self {
        Self::descending("createdAt")
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            f.write_str(&self.field)
        }
    }
}

/// Page, free-text search, status filter and sort key of the lead list.
///
/// Changing any filter resets the page to 1 so the page number always refers
/// to the current result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    search: String,
    status: Option<LeadStatus>,
    sort: SortKey,
}

impl ListQuery {
    pub fn new() -> Self {
        Self {
            page: 1,
            search: String::new(),
            status: None,
            sort: SortKey::default(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status(&self) -> Option<&LeadStatus> {
        self.status.as_ref()
    }

    pub fn sort(&self) -> &SortKey {
        &self.sort
    }

    /// Moves to another page of the same result set. Page 0 becomes 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 1;
        }
        self
    }

    pub fn with_status(mut self, status: Option<LeadStatus>) -> Self {
        if status != self.status {
            self.status = status;
            self.page = 1;
        }
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        if sort != self.sort {
            self.sort = sort;
            self.page = 1;
        }
        self
    }

    /// Query string for `GET /leads`, without the leading `?`.
    ///
    /// Always carries all five parameters; unset search and status are sent
    /// as empty strings.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("page", &self.page.to_string())
            .append_pair("limit", &PAGE_SIZE.to_string())
            .append_pair("search", &self.search)
            .append_pair("status", self.status.as_ref().map_or("", LeadStatus::as_str))
            .append_pair("sort", &self.sort.to_string())
            .finish()
    }

    /// Path of the `GET /leads` request for this query.
    pub fn leads_path(&self) -> String {
        format!("/leads?{}", self.to_query_string())
    }

    /// Dashboard URL (`/?...`) showing `page` with the current filters.
    pub fn dashboard_href(&self, page: u32) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", &page.to_string());
        if !self.search.is_empty() {
            query.append_pair("search", &self.search);
        }
        if let Some(status) = &self.status {
            query.append_pair("status", status.as_str());
        }
        query.append_pair("sort", &self.sort.to_string());
        format!("/?{}", query.finish())
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new()
    }
}
