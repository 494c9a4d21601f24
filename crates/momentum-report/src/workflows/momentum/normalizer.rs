use super::domain::ListingRecord;
use super::parser::ListingDataset;
use std::fmt;

/// Why a raw cell could not be read as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseFailure {
    Empty,
    NotNumeric(String),
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::Empty => write!(f, "value is empty"),
            ParseFailure::NotNumeric(value) => write!(f, "'{}' is not a number", value),
        }
    }
}

/// Currency-like text to a number. `$`, `,` and surrounding whitespace are
/// ignored; anything else unparseable is `None`.
pub fn to_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| parse_amount(value).ok())
}

/// Day counts only tolerate thousands separators; a stray `$` makes the cell
/// unreadable.
pub fn to_days(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| parse_decimal(&value.replace(',', "")).ok())
}

/// Days-on-market for every listing, in dataset order. An export without a
/// days column yields one `None` per listing.
pub fn days_on_market(dataset: &ListingDataset) -> Vec<Option<f64>> {
    if dataset.days_column().is_none() {
        return vec![None; dataset.len()];
    }

    dataset
        .records()
        .iter()
        .map(|record: &ListingRecord| to_days(record.days_in_mls.as_deref()))
        .collect()
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, ParseFailure> {
    let stripped = raw.replace(['$', ','], "");
    parse_decimal(&stripped)
}

fn parse_decimal(raw: &str) -> Result<f64, ParseFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseFailure::Empty);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseFailure::NotNumeric(trimmed.to_string())),
    }
}
