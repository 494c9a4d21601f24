//! Market momentum metrics for MLS listing exports.
//!
//! An export is imported as text ([`ListingImporter`]), every row is classified
//! and normalized, and the batch is reduced into [`MomentumStats`] over a
//! trailing closed-sales window. [`MomentumReport`] carries the statistics to
//! the renderers in [`report`].

mod breakdown;
mod classifier;
pub mod domain;
mod metrics;
mod normalizer;
mod parser;
pub mod report;
mod window;

pub use breakdown::StatusTally;
pub use classifier::{StatusClassifier, StatusRules};
pub use domain::{ClassifiedListing, ListingRecord, StatusBucket};
pub use metrics::{compute_momentum, months_of_inventory, MomentumStats, PriceRange};
pub use normalizer::{days_on_market, to_days, to_number};
pub use parser::{parse_close_date, ListingDataset, DAYS_IN_MLS_COLUMNS, REQUIRED_COLUMNS};
pub use report::MomentumReport;
pub use window::SoldWindow;

use chrono::NaiveDateTime;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ListingImportError {
    #[error("failed to open listing export {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid listing CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

pub struct ListingImporter;

impl ListingImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ListingDataset, ListingImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ListingImportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ListingDataset, ListingImportError> {
        parser::parse_dataset(reader)
    }
}

/// Stateless engine turning a dataset into a [`MomentumReport`].
#[derive(Debug, Clone, Default)]
pub struct MomentumEngine {
    classifier: StatusClassifier,
}

impl MomentumEngine {
    pub fn new(classifier: StatusClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &StatusClassifier {
        &self.classifier
    }

    /// Classifies and normalizes every listing, preserving dataset order.
    pub fn classify(&self, dataset: &ListingDataset) -> Vec<ClassifiedListing> {
        let days = days_on_market(dataset);

        dataset
            .records()
            .iter()
            .zip(days)
            .map(|(record, days_on_market)| ClassifiedListing {
                bucket: self.classifier.classify(record.status.as_deref()),
                close_date: record.close_date.as_deref().and_then(parse_close_date),
                list_price: to_number(record.list_price.as_deref()),
                close_price: to_number(record.close_price.as_deref()),
                concessions: to_number(record.seller_concessions.as_deref()),
                days_on_market,
            })
            .collect()
    }

    pub fn generate(
        &self,
        dataset: &ListingDataset,
        window_days: u32,
        reference_now: NaiveDateTime,
    ) -> MomentumReport {
        let window = SoldWindow::new(reference_now, window_days);
        let listings = self.classify(dataset);

        if listings.is_empty() {
            warn!("listing export contains no rows");
        }

        let sold_total = listings
            .iter()
            .filter(|listing| listing.bucket == StatusBucket::Sold)
            .count();
        let sold_undated = listings
            .iter()
            .filter(|listing| listing.bucket == StatusBucket::Sold && listing.close_date.is_none())
            .count();
        if sold_total > 0 && sold_undated == sold_total {
            warn!(
                sold_total,
                "no sold listing has a readable close date; closed-sales window is empty"
            );
        }

        let stats = compute_momentum(&listings, &window, dataset.has_concessions());
        MomentumReport::new(window, dataset, &listings, stats)
    }

    /// Distinct raw statuses with the bucket each lands in.
    pub fn status_breakdown(&self, dataset: &ListingDataset) -> Vec<StatusTally> {
        breakdown::tally_statuses(&self.classifier, dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::io::Cursor;

    fn reference_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid reference time")
    }

    #[test]
    fn classify_attaches_days_from_either_header() {
        for header in DAYS_IN_MLS_COLUMNS {
            let csv = format!(
                "Mls Status,Close Date,List Price,Close Price,{header}\nClosed,2025-09-01,,\"$1,000\",\"1,200\"\n"
            );
            let dataset = ListingImporter::from_reader(Cursor::new(csv)).expect("import");
            let listings = MomentumEngine::default().classify(&dataset);
            assert_eq!(listings[0].days_on_market, Some(1_200.0), "{header}");
            assert_eq!(listings[0].close_price, Some(1_000.0));
        }
    }

    #[test]
    fn classify_without_days_column_yields_missing_days() {
        let csv = "Mls Status,Close Date,List Price,Close Price\nClosed,2025-09-01,,100\nActive,,200,\n";
        let dataset = ListingImporter::from_reader(Cursor::new(csv)).expect("import");
        let listings = MomentumEngine::default().classify(&dataset);
        assert_eq!(listings.len(), 2);
        assert!(listings.iter().all(|listing| listing.days_on_market.is_none()));
        assert_eq!(listings[1].bucket, StatusBucket::Active);
        assert_eq!(listings[1].list_price, Some(200.0));
    }

    #[test]
    fn generate_uses_a_single_cutoff_for_the_batch() {
        let now = reference_now();
        let inside = (now - Duration::days(30)).format("%Y-%m-%d");
        let outside = (now - Duration::days(31)).format("%Y-%m-%d");
        let csv = format!(
            "Mls Status,Close Date,List Price,Close Price\nSold,{inside},,100\nSold,{outside},,200\n"
        );
        let dataset = ListingImporter::from_reader(Cursor::new(csv)).expect("import");
        let report = MomentumEngine::default().generate(&dataset, 30, now);

        assert_eq!(report.stats().sold_window_count, 1);
        assert_eq!(report.window().cutoff(), now - Duration::days(30));
    }

    #[test]
    fn from_path_names_the_missing_file() {
        let error = ListingImporter::from_path("./does-not-exist.csv").expect_err("missing file");
        match &error {
            ListingImportError::Open { path, .. } => {
                assert_eq!(path, Path::new("./does-not-exist.csv"));
            }
            other => panic!("expected open error, got {other:?}"),
        }
        assert!(error.to_string().contains("does-not-exist.csv"));
    }

    #[test]
    fn missing_columns_error_lists_names() {
        let error = ListingImporter::from_reader(Cursor::new("Status,Price\nActive,1\n"))
            .expect_err("schema error");
        assert_eq!(
            error.to_string(),
            "missing required columns: Mls Status, Close Date, List Price, Close Price"
        );
    }
}
