use super::super::domain::{ClassifiedListing, StatusBucket};
use super::super::metrics::MomentumStats;
use super::super::parser::ListingDataset;
use super::super::window::SoldWindow;
use super::views::{BucketCountEntry, MomentumSummary, StatusCount};
use std::collections::HashMap;

/// Everything a renderer needs from one report generation. Built once and
/// never mutated.
#[derive(Debug, Clone)]
pub struct MomentumReport {
    window: SoldWindow,
    total_records: usize,
    has_concessions: bool,
    days_column: Option<&'static str>,
    bucket_counts: HashMap<StatusBucket, usize>,
    stats: MomentumStats,
}

impl MomentumReport {
    pub(crate) fn new(
        window: SoldWindow,
        dataset: &ListingDataset,
        listings: &[ClassifiedListing],
        stats: MomentumStats,
    ) -> Self {
        let mut bucket_counts = HashMap::new();
        for listing in listings {
            *bucket_counts.entry(listing.bucket).or_insert(0) += 1;
        }

        Self {
            window,
            total_records: dataset.len(),
            has_concessions: dataset.has_concessions(),
            days_column: dataset.days_column(),
            bucket_counts,
            stats,
        }
    }

    pub fn window(&self) -> &SoldWindow {
        &self.window
    }

    pub fn window_days(&self) -> u32 {
        self.window.window_days()
    }

    pub fn stats(&self) -> &MomentumStats {
        &self.stats
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn has_concessions(&self) -> bool {
        self.has_concessions
    }

    pub fn bucket_count(&self, bucket: StatusBucket) -> usize {
        self.bucket_counts.get(&bucket).copied().unwrap_or(0)
    }

    /// Bars for the status chart: actives, pendings and window solds.
    pub fn chart_counts(&self) -> Vec<StatusCount> {
        vec![
            StatusCount {
                label: StatusBucket::Active.label().to_string(),
                count: self.stats.active_count,
            },
            StatusCount {
                label: StatusBucket::Pending.label().to_string(),
                count: self.stats.pending_count,
            },
            StatusCount {
                label: format!("Solds ({}d)", self.window_days()),
                count: self.stats.sold_window_count,
            },
        ]
    }

    pub fn summary(&self) -> MomentumSummary {
        let bucket_counts = StatusBucket::ordered()
            .into_iter()
            .map(|bucket| BucketCountEntry {
                bucket,
                bucket_label: bucket.label(),
                count: self.bucket_count(bucket),
            })
            .collect();

        MomentumSummary {
            window_days: self.window_days(),
            reference_now: self.window.reference_now(),
            window_start: self.window.cutoff(),
            total_records: self.total_records,
            has_concessions: self.has_concessions,
            days_column: self.days_column,
            bucket_counts,
            stats: self.stats.clone(),
            chart: self.chart_counts(),
        }
    }
}
