//! Aggregate lead analytics computed by the backend.

use serde::{Deserialize, Serialize};

/// Number of leads in one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCount {
    #[serde(rename = "_id")]
    pub stage: String,
    pub count: u64,
}

/// Server-computed counts over all leads, as returned by `GET /leads/analytics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_leads: u64,
    pub converted_leads: u64,
    #[serde(default)]
    pub leads_by_stage: Vec<StageCount>,
}

impl AnalyticsSnapshot {
    /// Percentage of converted leads rounded to one decimal.
    ///
    /// Zero when there are no leads at all.
    pub fn conversion_rate(&self) -> f64 {
        if self.total_leads == 0 {
            return 0.0;
        }

        let rate = self.converted_leads as f64 / self.total_leads as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }

    /// Conversion rate as displayed on the dashboard card (without the `%`).
    ///
    /// `"0"` for an empty pipeline, one fixed decimal otherwise.
    pub fn conversion_rate_label(&self) -> String {
        if self.total_leads == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", self.conversion_rate())
        }
    }
}
