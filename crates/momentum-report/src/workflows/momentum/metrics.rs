use super::domain::{ClassifiedListing, StatusBucket};
use super::window::SoldWindow;
use serde::Serialize;
use tracing::debug;

/// Inclusive `[min, max]` over a non-empty sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// `None` when the sample is empty.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values.into_iter().fold(None, |range, value| match range {
            None => Some(Self {
                min: value,
                max: value,
            }),
            Some(Self { min, max }) => Some(Self {
                min: min.min(value),
                max: max.max(value),
            }),
        })
    }
}

/// Market momentum statistics for one export, window and reference time.
///
/// `None` marks a statistic with no contributing values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentumStats {
    pub active_count: usize,
    pub pending_count: usize,
    pub sold_window_count: usize,
    pub months_of_inventory: Option<f64>,
    pub active_list_price_range: Option<PriceRange>,
    pub pending_list_price_range: Option<PriceRange>,
    pub sold_net_price_range: Option<PriceRange>,
    pub avg_days_on_market: Option<f64>,
    pub median_days_on_market: Option<f64>,
}

pub fn compute_momentum(
    listings: &[ClassifiedListing],
    window: &SoldWindow,
    has_concessions: bool,
) -> MomentumStats {
    let in_bucket = move |bucket: StatusBucket| {
        listings
            .iter()
            .filter(move |listing| listing.bucket == bucket)
    };
    let sold_in_window = move || {
        listings
            .iter()
            .filter(move |listing| window.contains(listing))
    };

    let active_count = in_bucket(StatusBucket::Active).count();
    let pending_count = in_bucket(StatusBucket::Pending).count();
    let sold_window_count = sold_in_window().count();

    let months_of_inventory = months_of_inventory(active_count, pending_count, sold_window_count);

    let active_list_price_range =
        PriceRange::from_values(in_bucket(StatusBucket::Active).filter_map(|l| l.list_price));
    let pending_list_price_range =
        PriceRange::from_values(in_bucket(StatusBucket::Pending).filter_map(|l| l.list_price));
    let sold_net_price_range = PriceRange::from_values(
        sold_in_window().filter_map(|listing| listing.net_price(has_concessions)),
    );

    let days_on_market: Vec<f64> = sold_in_window()
        .filter_map(|listing| listing.days_on_market)
        .collect();

    debug!(
        listings = listings.len(),
        active_count,
        pending_count,
        sold_window_count,
        dom_samples = days_on_market.len(),
        window_days = window.window_days(),
        "momentum statistics computed"
    );

    MomentumStats {
        active_count,
        pending_count,
        sold_window_count,
        months_of_inventory,
        active_list_price_range,
        pending_list_price_range,
        sold_net_price_range,
        avg_days_on_market: mean(&days_on_market),
        median_days_on_market: median(days_on_market),
    }
}

/// Active supply over monthly absorption, where a month of absorption is a
/// third of the trailing sold count plus everything currently pending.
pub fn months_of_inventory(
    active_count: usize,
    pending_count: usize,
    sold_window_count: usize,
) -> Option<f64> {
    let denominator = sold_window_count as f64 / 3.0 + pending_count as f64;
    if denominator > 0.0 {
        Some(active_count as f64 / denominator)
    } else {
        None
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn reference_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid reference time")
    }

    fn listing(bucket: StatusBucket) -> ClassifiedListing {
        ClassifiedListing {
            bucket,
            close_date: None,
            list_price: None,
            close_price: None,
            concessions: None,
            days_on_market: None,
        }
    }

    fn recent_sale(close_price: Option<f64>, days_on_market: Option<f64>) -> ClassifiedListing {
        ClassifiedListing {
            close_date: Some(reference_now() - Duration::days(5)),
            close_price,
            days_on_market,
            ..listing(StatusBucket::Sold)
        }
    }

    #[test]
    fn months_of_inventory_uses_a_third_of_window_sales() {
        assert_eq!(months_of_inventory(6, 0, 9), Some(2.0));
        assert_eq!(months_of_inventory(3, 1, 3), Some(1.5));
        assert_eq!(months_of_inventory(0, 2, 0), Some(0.0));
    }

    #[test]
    fn months_of_inventory_undefined_without_absorption() {
        assert_eq!(months_of_inventory(12, 0, 0), None);
        assert_eq!(months_of_inventory(0, 0, 0), None);
    }

    #[test]
    fn price_range_ignores_order_and_handles_empty_samples() {
        let range = PriceRange::from_values([250.0, 100.0, 400.0, 300.0]).expect("range");
        assert_eq!(range, PriceRange { min: 100.0, max: 400.0 });
        assert!(PriceRange::from_values(Vec::<f64>::new()).is_none());
    }

    #[test]
    fn median_averages_middle_pair_for_even_samples() {
        assert_eq!(median(vec![40.0, 10.0, 30.0, 20.0]), Some(25.0));
        assert_eq!(median(vec![7.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(Vec::new()), None);
    }

    #[test]
    fn list_price_ranges_skip_missing_values() {
        let listings = vec![
            ClassifiedListing {
                list_price: Some(310_000.0),
                ..listing(StatusBucket::Active)
            },
            ClassifiedListing {
                list_price: None,
                ..listing(StatusBucket::Active)
            },
            ClassifiedListing {
                list_price: Some(295_000.0),
                ..listing(StatusBucket::Active)
            },
            listing(StatusBucket::Pending),
        ];
        let window = SoldWindow::new(reference_now(), 90);
        let stats = compute_momentum(&listings, &window, false);

        assert_eq!(stats.active_count, 3);
        assert_eq!(stats.pending_count, 1);
        assert_eq!(
            stats.active_list_price_range,
            Some(PriceRange {
                min: 295_000.0,
                max: 310_000.0
            })
        );
        assert!(stats.pending_list_price_range.is_none());
        assert_eq!(stats.months_of_inventory, Some(3.0));
    }

    #[test]
    fn days_on_market_statistics_cover_only_window_sales() {
        let stale_sale = ClassifiedListing {
            close_date: Some(reference_now() - Duration::days(200)),
            days_on_market: Some(500.0),
            ..listing(StatusBucket::Sold)
        };
        let listings = vec![
            recent_sale(Some(200_000.0), Some(10.0)),
            recent_sale(Some(220_000.0), Some(30.0)),
            recent_sale(Some(240_000.0), None),
            stale_sale,
        ];
        let window = SoldWindow::new(reference_now(), 90);
        let stats = compute_momentum(&listings, &window, false);

        assert_eq!(stats.sold_window_count, 3);
        assert_eq!(stats.avg_days_on_market, Some(20.0));
        assert_eq!(stats.median_days_on_market, Some(20.0));
        assert_eq!(
            stats.sold_net_price_range,
            Some(PriceRange {
                min: 200_000.0,
                max: 240_000.0
            })
        );
    }

    #[test]
    fn empty_input_yields_zero_counts_and_no_statistics() {
        let window = SoldWindow::new(reference_now(), 90);
        let stats = compute_momentum(&[], &window, true);

        assert_eq!(stats.active_count, 0);
        assert_eq!(stats.pending_count, 0);
        assert_eq!(stats.sold_window_count, 0);
        assert!(stats.months_of_inventory.is_none());
        assert!(stats.active_list_price_range.is_none());
        assert!(stats.sold_net_price_range.is_none());
        assert!(stats.avg_days_on_market.is_none());
        assert!(stats.median_days_on_market.is_none());
    }

    #[test]
    fn missing_concession_with_column_present_drops_net_price() {
        let listings = vec![
            ClassifiedListing {
                concessions: Some(2_000.0),
                ..recent_sale(Some(200_000.0), None)
            },
            recent_sale(Some(150_000.0), None),
        ];
        let window = SoldWindow::new(reference_now(), 90);

        let with_column = compute_momentum(&listings, &window, true);
        assert_eq!(
            with_column.sold_net_price_range,
            Some(PriceRange {
                min: 198_000.0,
                max: 198_000.0
            })
        );

        let without_column = compute_momentum(&listings, &window, false);
        assert_eq!(
            without_column.sold_net_price_range,
            Some(PriceRange {
                min: 150_000.0,
                max: 200_000.0
            })
        );
    }
}
