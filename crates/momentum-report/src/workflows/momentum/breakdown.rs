use super::classifier::StatusClassifier;
use super::domain::StatusBucket;
use super::parser::ListingDataset;
use serde::Serialize;
use std::collections::HashMap;

pub const BLANK_STATUS: &str = "(blank)";

/// How often one raw status value occurs and where it is bucketed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub status: String,
    pub bucket: StatusBucket,
    pub count: usize,
}

/// Groups by bucket order, then by descending count, then by status text.
pub(crate) fn tally_statuses(
    classifier: &StatusClassifier,
    dataset: &ListingDataset,
) -> Vec<StatusTally> {
    let mut counts: HashMap<Option<&str>, usize> = HashMap::new();
    for record in dataset.records() {
        *counts.entry(record.status.as_deref()).or_insert(0) += 1;
    }

    let mut tallies: Vec<StatusTally> = counts
        .into_iter()
        .map(|(status, count)| StatusTally {
            status: status.unwrap_or(BLANK_STATUS).to_string(),
            bucket: classifier.classify(status),
            count,
        })
        .collect();

    tallies.sort_by(|a, b| {
        a.bucket
            .cmp(&b.bucket)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.status.cmp(&b.status))
    });
    tallies
}
