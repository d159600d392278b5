//! Unit tests for price records and series invariants

use chrono::{Days, NaiveDate};
use stockscope::models::price::{PriceRecord, PriceSeries, SeriesError};

fn create_test_records(count: usize, base_price: f64) -> Vec<PriceRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let price = base_price + i as f64;
            PriceRecord::new(
                start + Days::new(i as u64),
                price,
                price + 1.0,
                price - 1.0,
                price + 0.5,
                1_000.0,
            )
        })
        .collect()
}

#[test]
fn test_series_accepts_ordered_records() {
    let series = PriceSeries::new("TEST", create_test_records(10, 100.0)).unwrap();
    assert_eq!(series.symbol(), "TEST");
    assert_eq!(series.len(), 10);
    assert!(!series.is_empty());
    assert_eq!(series.closes()[0], 100.5);
    assert_eq!(series.dates().len(), 10);
    assert_eq!(series.last_date(), NaiveDate::from_ymd_opt(2024, 1, 10));
}

#[test]
fn test_series_rejects_duplicate_dates() {
    let mut records = create_test_records(3, 100.0);
    records[2].date = records[1].date;
    let err = PriceSeries::new("TEST", records).unwrap_err();
    assert!(matches!(err, SeriesError::NonIncreasingDates { .. }));
}

#[test]
fn test_series_rejects_unordered_dates() {
    let mut records = create_test_records(3, 100.0);
    records.swap(0, 2);
    assert!(PriceSeries::new("TEST", records).is_err());
}

#[test]
fn test_series_rejects_non_finite_values() {
    let mut records = create_test_records(3, 100.0);
    records[1].close = f64::NAN;
    let err = PriceSeries::new("TEST", records).unwrap_err();
    assert_eq!(
        err,
        SeriesError::NonFinitePrice {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            field: "close",
        }
    );
}

#[test]
fn test_tail_returns_latest_rows_oldest_first() {
    let series = PriceSeries::new("TEST", create_test_records(10, 100.0)).unwrap();
    let tail = series.tail(5);
    assert_eq!(tail.len(), 5);
    assert_eq!(tail[0].open, 105.0);
    assert_eq!(tail[4].open, 109.0);

    assert_eq!(series.tail(50).len(), 10);
}

#[test]
fn test_empty_series() {
    let series = PriceSeries::empty("NONE");
    assert!(series.is_empty());
    assert_eq!(series.last_date(), None);
    assert!(series.tail(5).is_empty());
}
