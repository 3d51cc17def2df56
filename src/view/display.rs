//! Presentation helpers shared by the HTML views and the CLI.

use chrono::{DateTime, Utc};

use crate::domain::entities::LeadStatus;

impl LeadStatus {
    /// CSS class of the status badge.
    ///
    /// Statuses the dashboard doesn't know get the neutral `badge-default`.
    pub fn badge_class(&self) -> &'static str {
        match self {
            LeadStatus::New => "badge badge-new",
            LeadStatus::Contacted => "badge badge-contacted",
            LeadStatus::Qualified => "badge badge-qualified",
            LeadStatus::Converted => "badge badge-converted",
            LeadStatus::Lost => "badge badge-lost",
            LeadStatus::Other(_) => "badge badge-default",
        }
    }
}

/// Short date, e.g. `1/15/2024`.
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

/// Date and time, e.g. `1/15/2024, 2:30:00 PM`.
pub fn format_datetime(at: &DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        assert_eq!(format_date(&at), "1/15/2024");
    }

    #[test]
    fn test_format_datetime() {
        let afternoon = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        assert_eq!(format_datetime(&afternoon), "1/15/2024, 2:30:00 PM");

        let midnight = Utc.with_ymd_and_hms(2023, 11, 3, 0, 5, 9).unwrap();
        assert_eq!(format_datetime(&midnight), "11/3/2023, 12:05:09 AM");
    }

    #[test]
    fn test_badge_classes() {
        assert_eq!(LeadStatus::New.badge_class(), "badge badge-new");
        assert_eq!(LeadStatus::Lost.badge_class(), "badge badge-lost");
        assert_eq!(
            LeadStatus::from("Archived").badge_class(),
            "badge badge-default"
        );
    }
}
