use super::super::domain::StatusBucket;
use super::super::metrics::MomentumStats;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One bar of the status counts chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BucketCountEntry {
    pub bucket: StatusBucket,
    pub bucket_label: &'static str,
    pub count: usize,
}

/// Serializable snapshot of a report for machine consumers.
#[derive(Debug, Clone, Serialize)]
pub struct MomentumSummary {
    pub window_days: u32,
    pub reference_now: NaiveDateTime,
    pub window_start: NaiveDateTime,
    pub total_records: usize,
    pub has_concessions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_column: Option<&'static str>,
    pub bucket_counts: Vec<BucketCountEntry>,
    pub stats: MomentumStats,
    pub chart: Vec<StatusCount>,
}
