use super::domain::{ClassifiedListing, StatusBucket};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// Trailing closed-sales window. The cutoff is fixed at construction so every
/// listing in a batch is judged against the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SoldWindow {
    reference_now: NaiveDateTime,
    window_days: u32,
    cutoff: NaiveDateTime,
}

impl SoldWindow {
    pub fn new(reference_now: NaiveDateTime, window_days: u32) -> Self {
        let cutoff = reference_now
            .checked_sub_signed(Duration::days(i64::from(window_days)))
            .unwrap_or(NaiveDateTime::MIN);
        Self {
            reference_now,
            window_days,
            cutoff,
        }
    }

    pub fn reference_now(&self) -> NaiveDateTime {
        self.reference_now
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Earliest close date still inside the window (inclusive).
    pub fn cutoff(&self) -> NaiveDateTime {
        self.cutoff
    }

    pub fn contains(&self, listing: &ClassifiedListing) -> bool {
        listing.bucket == StatusBucket::Sold
            && listing
                .close_date
                .is_some_and(|closed_on| closed_on >= self.cutoff)
    }
}
