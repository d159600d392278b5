//! Reshapes computed series into chart bundles.
//!
//! Nothing here computes: every bundle row is copied from an input at the same
//! position, and inputs whose dates disagree are rejected rather than reindexed.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::chart::{
    CandlePoint, CandlestickBundle, ClosePoint, ForecastOverlayBundle, IndicatorBundle,
    PricePanelRow, ReferenceLine, RsiPanelRow,
};
use crate::models::forecast::ForecastSeries;
use crate::models::indicators::IndicatorSet;
use crate::models::price::PriceSeries;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PresentationError {
    #[error("{column} has {actual} rows, price series has {expected}")]
    Misaligned {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("{column} date {found} does not match price date {expected}")]
    DateMismatch {
        column: String,
        expected: NaiveDate,
        found: NaiveDate,
    },
    #[error("forecast date {found} does not follow {previous}")]
    ForecastOverlap {
        previous: NaiveDate,
        found: NaiveDate,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationAdapter {
    overbought: f64,
    oversold: f64,
}

impl PresentationAdapter {
    pub fn new(overbought: f64, oversold: f64) -> Self {
        Self {
            overbought,
            oversold,
        }
    }

    pub fn candlestick(&self, series: &PriceSeries) -> CandlestickBundle {
        CandlestickBundle {
            title: format!("Candlestick chart for {}", series.symbol()),
            points: series
                .records()
                .iter()
                .map(|r| CandlePoint {
                    date: r.date,
                    open: r.open,
                    high: r.high,
                    low: r.low,
                    close: r.close,
                })
                .collect(),
        }
    }

    /// Close + moving averages panel and RSI panel with overbought/oversold guides.
    pub fn indicator_panels(
        &self,
        series: &PriceSeries,
        indicators: &IndicatorSet,
    ) -> Result<IndicatorBundle, PresentationError> {
        let records = series.records();
        check_len("dates", records.len(), indicators.dates.len())?;
        for (record, &date) in records.iter().zip(&indicators.dates) {
            if record.date != date {
                return Err(PresentationError::DateMismatch {
                    column: "dates".to_string(),
                    expected: record.date,
                    found: date,
                });
            }
        }
        for ma in &indicators.moving_averages {
            check_len(&ma.label(), records.len(), ma.values.len())?;
        }
        if let Some(rsi) = &indicators.rsi {
            check_len("rsi", records.len(), rsi.values.len())?;
        }

        let price_panel = records
            .iter()
            .enumerate()
            .map(|(i, record)| PricePanelRow {
                date: record.date,
                close: record.close,
                averages: indicators
                    .moving_averages
                    .iter()
                    .map(|ma| (ma.label(), ma.values[i]))
                    .collect::<BTreeMap<_, _>>(),
            })
            .collect();

        let rsi_panel = records
            .iter()
            .enumerate()
            .map(|(i, record)| RsiPanelRow {
                date: record.date,
                rsi: indicators.rsi.as_ref().and_then(|rsi| rsi.values[i]),
            })
            .collect();

        Ok(IndicatorBundle {
            price_title: format!("Moving averages for {}", series.symbol()),
            rsi_title: format!("RSI for {}", series.symbol()),
            price_panel,
            rsi_panel,
            reference_lines: vec![
                ReferenceLine {
                    value: self.overbought,
                    label: "Overbought".to_string(),
                },
                ReferenceLine {
                    value: self.oversold,
                    label: "Oversold".to_string(),
                },
            ],
        })
    }

    /// Historical closes followed by the forecast, which must start after the history.
    pub fn forecast_overlay(
        &self,
        series: &PriceSeries,
        forecast: &ForecastSeries,
    ) -> Result<ForecastOverlayBundle, PresentationError> {
        let mut previous = series.last_date();
        for point in &forecast.points {
            if let Some(prev) = previous {
                if point.date <= prev {
                    return Err(PresentationError::ForecastOverlap {
                        previous: prev,
                        found: point.date,
                    });
                }
            }
            previous = Some(point.date);
        }

        Ok(ForecastOverlayBundle {
            title: format!("ARIMA{} forecast for {}", forecast.order, series.symbol()),
            historical: series
                .records()
                .iter()
                .map(|r| ClosePoint {
                    date: r.date,
                    close: r.close,
                })
                .collect(),
            forecast: forecast
                .points
                .iter()
                .map(|p| ClosePoint {
                    date: p.date,
                    close: p.close,
                })
                .collect(),
        })
    }
}

impl Default for PresentationAdapter {
    fn default() -> Self {
        Self::new(RSI_OVERBOUGHT, RSI_OVERSOLD)
    }
}

fn check_len(column: &str, expected: usize, actual: usize) -> Result<(), PresentationError> {
    if expected != actual {
        return Err(PresentationError::Misaligned {
            column: column.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}
