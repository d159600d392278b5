//! Daily OHLCV records and the ordered series built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceRecord {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    fn first_non_finite_field(&self) -> Option<&'static str> {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("dates must be strictly increasing: {current} follows {previous}")]
    NonIncreasingDates {
        previous: NaiveDate,
        current: NaiveDate,
    },
    #[error("non-finite {field} value on {date}")]
    NonFinitePrice { date: NaiveDate, field: &'static str },
}

/// Price history for one symbol, ordered by date.
///
/// Construction enforces strictly increasing dates and finite values, so every
/// downstream stage can index by position without re-checking alignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, records: Vec<PriceRecord>) -> Result<Self, SeriesError> {
        for record in &records {
            if let Some(field) = record.first_non_finite_field() {
                return Err(SeriesError::NonFinitePrice {
                    date: record.date,
                    field,
                });
            }
        }

        for pair in records.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::NonIncreasingDates {
                    previous: pair[0].date,
                    current: pair[1].date,
                });
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            records,
        })
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            records: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.close).collect()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// Last `count` records, oldest first.
    pub fn tail(&self, count: usize) -> &[PriceRecord] {
        let start = self.records.len().saturating_sub(count);
        &self.records[start..]
    }
}
