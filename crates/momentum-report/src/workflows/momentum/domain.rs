use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed taxonomy every free-text MLS status collapses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    Active,
    Pending,
    Sold,
    Other,
    Unknown,
}

impl StatusBucket {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Active,
            Self::Pending,
            Self::Sold,
            Self::Other,
            Self::Unknown,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Sold => "Sold",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a listing export exactly as it was read. Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRecord {
    pub status: Option<String>,
    pub close_date: Option<String>,
    pub list_price: Option<String>,
    pub close_price: Option<String>,
    pub seller_concessions: Option<String>,
    pub days_in_mls: Option<String>,
}

/// A listing with its bucket and every numeric/date field normalized.
///
/// `None` means the source value was absent or could not be parsed; it is never
/// coerced to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedListing {
    pub bucket: StatusBucket,
    pub close_date: Option<NaiveDateTime>,
    pub list_price: Option<f64>,
    pub close_price: Option<f64>,
    pub concessions: Option<f64>,
    pub days_on_market: Option<f64>,
}

impl ClassifiedListing {
    /// Close price net of seller concessions. When the export carries no
    /// concessions column every listing nets against zero.
    pub fn net_price(&self, has_concessions: bool) -> Option<f64> {
        let close_price = self.close_price?;
        if has_concessions {
            self.concessions.map(|concessions| close_price - concessions)
        } else {
            Some(close_price)
        }
    }
}
