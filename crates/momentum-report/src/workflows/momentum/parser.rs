use super::domain::ListingRecord;
use super::ListingImportError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::io::Read;
use tracing::debug;

pub const STATUS_COLUMN: &str = "Mls Status";
pub const CLOSE_DATE_COLUMN: &str = "Close Date";
pub const LIST_PRICE_COLUMN: &str = "List Price";
pub const CLOSE_PRICE_COLUMN: &str = "Close Price";
pub const CONCESSIONS_COLUMN: &str = "Seller Concessions";
/// Accepted spellings of the days-on-market header, in order of preference.
pub const DAYS_IN_MLS_COLUMNS: [&str; 2] = ["DaysInMLS", "Days in MLS"];

pub const REQUIRED_COLUMNS: [&str; 4] = [
    STATUS_COLUMN,
    CLOSE_DATE_COLUMN,
    LIST_PRICE_COLUMN,
    CLOSE_PRICE_COLUMN,
];

/// Missing-value markers spreadsheet and pandas-style exports write into cells.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// `%.f` also matches when there is no fractional part.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

// Two-digit years go first: `%Y` would otherwise read "25" as the year 25.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%b %d, %Y",
];

/// A validated listing export held fully in memory.
#[derive(Debug, Clone)]
pub struct ListingDataset {
    records: Vec<ListingRecord>,
    has_concessions: bool,
    days_column: Option<&'static str>,
}

impl ListingDataset {
    pub fn new(
        records: Vec<ListingRecord>,
        has_concessions: bool,
        days_column: Option<&'static str>,
    ) -> Self {
        Self {
            records,
            has_concessions,
            days_column,
        }
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the export carried a `Seller Concessions` column at all.
    pub fn has_concessions(&self) -> bool {
        self.has_concessions
    }

    /// The header the days-on-market values were read from, if any.
    pub fn days_column(&self) -> Option<&'static str> {
        self.days_column
    }
}

struct ColumnIndex {
    status: usize,
    close_date: usize,
    list_price: usize,
    close_price: usize,
    concessions: Option<usize>,
    days: Option<(usize, &'static str)>,
}

impl ColumnIndex {
    fn locate(headers: &csv::StringRecord) -> Result<Self, ListingImportError> {
        let position = |name: &str| headers.iter().position(|header| header == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| position(**column).is_none())
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ListingImportError::MissingColumns(missing));
        }

        let required = |name: &str| {
            position(name)
                .ok_or_else(|| ListingImportError::MissingColumns(vec![name.to_string()]))
        };

        Ok(Self {
            status: required(STATUS_COLUMN)?,
            close_date: required(CLOSE_DATE_COLUMN)?,
            list_price: required(LIST_PRICE_COLUMN)?,
            close_price: required(CLOSE_PRICE_COLUMN)?,
            concessions: position(CONCESSIONS_COLUMN),
            days: DAYS_IN_MLS_COLUMNS
                .iter()
                .find_map(|name| position(*name).map(|index| (index, *name))),
        })
    }

    fn record(&self, row: &csv::StringRecord) -> ListingRecord {
        ListingRecord {
            status: cell(row, Some(self.status)),
            close_date: cell(row, Some(self.close_date)),
            list_price: cell(row, Some(self.list_price)),
            close_price: cell(row, Some(self.close_price)),
            seller_concessions: cell(row, self.concessions),
            days_in_mls: cell(row, self.days.map(|(index, _)| index)),
        }
    }
}

/// Reads a CSV export, keeping every value as text. Fails before reading any
/// rows when a mandatory column is absent.
pub(crate) fn parse_dataset<R: Read>(reader: R) -> Result<ListingDataset, ListingImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnIndex::locate(&headers)?;

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        records.push(columns.record(&row));
    }

    debug!(
        rows = records.len(),
        has_concessions = columns.concessions.is_some(),
        days_column = columns.days.map(|(_, name)| name),
        "listing export parsed"
    );

    Ok(ListingDataset::new(
        records,
        columns.concessions.is_some(),
        columns.days.map(|(_, name)| name),
    ))
}

fn cell(row: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|index| row.get(index))
        .map(str::trim)
        .filter(|value| !value.is_empty() && !NA_TOKENS.contains(value))
        .map(str::to_string)
}

/// Parses the close-date formats MLS exports commonly use. Offset-bearing
/// timestamps are converted to UTC wall time; bare dates are midnight.
pub fn parse_close_date(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}
