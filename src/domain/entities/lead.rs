//! Lead entity and pipeline status.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pipeline stage of a lead.
///
/// The backend sends the status as a plain string. Values outside the five
/// known stages are kept verbatim in [`LeadStatus::Other`] so they still
/// render instead of failing the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
    Other(String),
}

impl LeadStatus {
    /// The known stages in pipeline order, as offered by the status filter.
    pub const KNOWN: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ];

    /// Wire label of the status.
    pub fn as_str(&self) -> &str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Converted => "Converted",
            LeadStatus::Lost => "Lost",
            LeadStatus::Other(raw) => raw,
        }
    }

    /// Returns true for one of the five known stages.
    pub fn is_known(&self) -> bool {
        !matches!(self, LeadStatus::Other(_))
    }
}

impl From<String> for LeadStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "New" => LeadStatus::New,
            "Contacted" => LeadStatus::Contacted,
            "Qualified" => LeadStatus::Qualified,
            "Converted" => LeadStatus::Converted,
            "Lost" => LeadStatus::Lost,
            _ => LeadStatus::Other(value),
        }
    }
}

impl From<&str> for LeadStatus {
    fn from(value: &str) -> Self {
        LeadStatus::from(value.to_string())
    }
}

impl From<LeadStatus> for String {
    fn from(status: LeadStatus) -> Self {
        match status {
            LeadStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sales prospect record as returned by `GET /leads/:id`.
///
/// List rows from `GET /leads` may omit `updatedAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of the filtered lead list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "LeadPageWire")]
pub struct LeadPage {
    pub leads: Vec<Lead>,
    /// Page count reported by the backend; may be zero for an empty result.
    pub total_pages: u32,
}

#[derive(Deserialize)]
struct LeadPageWire {
    leads: Vec<Lead>,
    pagination: PaginationWire,
}

#[derive(Deserialize)]
struct PaginationWire {
    pages: u32,
}

impl From<LeadPageWire> for LeadPage {
    fn from(wire: LeadPageWire) -> Self {
        Self {
            leads: wire.leads,
            total_pages: wire.pagination.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lead_from_backend_json() {
        let lead: Lead = serde_json::from_value(json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+44 20 7946 0000",
            "status": "Qualified",
            "createdAt": "2024-01-15T14:30:00.000Z",
            "updatedAt": "2024-01-16T09:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(lead.id, "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(lead.status, LeadStatus::Qualified);
        assert!(lead.updated_at.is_some());
    }

    #[test]
    fn test_lead_without_updated_at() {
        let lead: Lead = serde_json::from_value(json!({
            "_id": "1",
            "name": "Row",
            "email": "row@example.com",
            "phone": "",
            "status": "New",
            "createdAt": "2024-01-15T14:30:00Z"
        }))
        .unwrap();

        assert!(lead.updated_at.is_none());
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status = LeadStatus::from("Nurturing");
        assert_eq!(status, LeadStatus::Other("Nurturing".to_string()));
        assert!(!status.is_known());
        assert_eq!(status.to_string(), "Nurturing");
        assert_eq!(String::from(status), "Nurturing");
    }

    #[test]
    fn test_known_statuses_round_trip_labels() {
        for status in LeadStatus::KNOWN {
            assert!(status.is_known());
            assert_eq!(LeadStatus::from(status.as_str()), status);
        }
    }

    #[test]
    fn test_lead_page_reads_pagination_pages() {
        let page: LeadPage = serde_json::from_value(json!({
            "leads": [],
            "pagination": { "pages": 5, "total": 50, "page": 1 }
        }))
        .unwrap();

        assert!(page.leads.is_empty());
        assert_eq!(page.total_pages, 5);
    }
}
