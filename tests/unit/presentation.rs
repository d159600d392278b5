//! Unit tests for chart bundle assembly

use chrono::{Days, NaiveDate};
use stockscope::forecast::ForecastEngine;
use stockscope::indicators::{IndicatorConfig, IndicatorEngine};
use stockscope::models::forecast::{ArimaOrder, ForecastPoint, ForecastSeries};
use stockscope::models::indicators::RsiSmoothing;
use stockscope::models::price::{PriceRecord, PriceSeries};
use stockscope::presentation::{PresentationAdapter, PresentationError};

fn create_test_series(count: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let records = (0..count)
        .map(|i| {
            let price = 100.0 + i as f64;
            PriceRecord::new(
                start + Days::new(i as u64),
                price - 0.5,
                price + 1.0,
                price - 1.0,
                price,
                10.0,
            )
        })
        .collect();
    PriceSeries::new("TEST", records).unwrap()
}

fn small_engine() -> IndicatorEngine {
    IndicatorEngine::new(IndicatorConfig {
        ma_windows: vec![3, 5],
        rsi_window: 2,
        rsi_smoothing: RsiSmoothing::Wilder,
    })
}

#[test]
fn test_candlestick_bundle() {
    let series = create_test_series(4);
    let bundle = PresentationAdapter::default().candlestick(&series);

    assert_eq!(bundle.title, "Candlestick chart for TEST");
    assert_eq!(bundle.points.len(), 4);
    let first = bundle.points[0];
    assert_eq!(first.date, series.records()[0].date);
    assert_eq!(first.open, 99.5);
    assert_eq!(first.high, 101.0);
    assert_eq!(first.low, 99.0);
    assert_eq!(first.close, 100.0);
}

#[test]
fn test_indicator_panels_preserve_alignment() {
    let series = create_test_series(6);
    let indicators = small_engine().compute(&series).unwrap();
    let bundle = PresentationAdapter::default()
        .indicator_panels(&series, &indicators)
        .unwrap();

    assert_eq!(bundle.price_title, "Moving averages for TEST");
    assert_eq!(bundle.rsi_title, "RSI for TEST");
    assert_eq!(bundle.price_panel.len(), 6);
    assert_eq!(bundle.rsi_panel.len(), 6);

    for (row, record) in bundle.price_panel.iter().zip(series.records()) {
        assert_eq!(row.date, record.date);
        assert_eq!(row.close, record.close);
    }
    assert_eq!(bundle.price_panel[1].averages["ma3"], None);
    assert_eq!(bundle.price_panel[2].averages["ma3"], Some(101.0));
    assert_eq!(bundle.price_panel[3].averages["ma5"], None);
    assert_eq!(bundle.price_panel[4].averages["ma5"], Some(102.0));
    assert_eq!(bundle.rsi_panel[1].rsi, None);
    assert_eq!(bundle.rsi_panel[5].rsi, Some(100.0));
}

#[test]
fn test_indicator_panels_reference_lines() {
    let series = create_test_series(3);
    let indicators = small_engine().compute(&series).unwrap();
    let bundle = PresentationAdapter::default()
        .indicator_panels(&series, &indicators)
        .unwrap();

    assert_eq!(bundle.reference_lines.len(), 2);
    assert_eq!(bundle.reference_lines[0].value, 70.0);
    assert_eq!(bundle.reference_lines[0].label, "Overbought");
    assert_eq!(bundle.reference_lines[1].value, 30.0);
    assert_eq!(bundle.reference_lines[1].label, "Oversold");

    let custom = PresentationAdapter::new(80.0, 20.0)
        .indicator_panels(&series, &indicators)
        .unwrap();
    assert_eq!(custom.reference_lines[0].value, 80.0);
    assert_eq!(custom.reference_lines[1].value, 20.0);
}

#[test]
fn test_indicator_panels_reject_misaligned_columns() {
    let series = create_test_series(6);
    let other = create_test_series(5);
    let indicators = small_engine().compute(&other).unwrap();

    let err = PresentationAdapter::default()
        .indicator_panels(&series, &indicators)
        .unwrap_err();
    assert!(matches!(err, PresentationError::Misaligned { expected: 6, actual: 5, .. }));
}

#[test]
fn test_indicator_panels_reject_shifted_dates() {
    let series = create_test_series(4);
    let mut indicators = small_engine().compute(&series).unwrap();
    indicators.dates[2] = indicators.dates[2] + Days::new(1);

    let err = PresentationAdapter::default()
        .indicator_panels(&series, &indicators)
        .unwrap_err();
    assert!(matches!(err, PresentationError::DateMismatch { .. }));
}

#[test]
fn test_forecast_overlay() {
    let series = create_test_series(30);
    let forecast = ForecastEngine::default().forecast(&series).unwrap();
    let overlay = PresentationAdapter::default()
        .forecast_overlay(&series, &forecast)
        .unwrap();

    assert_eq!(overlay.title, "ARIMA(5,1,0) forecast for TEST");
    assert_eq!(overlay.historical.len(), 30);
    assert_eq!(overlay.forecast.len(), 10);
    assert_eq!(overlay.historical.last().unwrap().close, 129.0);
    assert!(overlay.forecast[0].date > overlay.historical.last().unwrap().date);
}

#[test]
fn test_forecast_overlay_rejects_overlap() {
    let series = create_test_series(5);
    let last = series.last_date().unwrap();
    let forecast = ForecastSeries {
        symbol: "TEST".to_string(),
        order: ArimaOrder::default(),
        points: vec![ForecastPoint {
            date: last,
            close: 1.0,
        }],
    };

    let err = PresentationAdapter::default()
        .forecast_overlay(&series, &forecast)
        .unwrap_err();
    assert_eq!(
        err,
        PresentationError::ForecastOverlap {
            previous: last,
            found: last,
        }
    );
}
