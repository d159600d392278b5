//! Market data provider interface and an in-memory implementation.

use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::price::{PriceRecord, PriceSeries, SeriesError};

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("market data request failed: {0}")]
    Transport(String),
    #[error("market data source returned HTTP {status}")]
    Status { status: u16 },
    #[error("could not parse market data: {0}")]
    Parse(String),
    #[error("market data source error: {0}")]
    Source(String),
    #[error("market data is malformed: {0}")]
    InvalidSeries(#[from] SeriesError),
}

impl MarketDataError {
    /// Whether a retry has a reasonable chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily series for `symbol` from `start` (inclusive) to `end` (exclusive).
    ///
    /// An unknown symbol or a range without trading days yields an empty series,
    /// not an error.
    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError>;
}

/// Serves fixed records per symbol, filtered to the requested range.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketDataProvider {
    series: HashMap<String, Vec<PriceRecord>>,
}

impl StaticMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, records: Vec<PriceRecord>) -> Self {
        self.series.insert(symbol.to_uppercase(), records);
        self
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError> {
        let records = self
            .series
            .get(&symbol.to_uppercase())
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.date >= start && r.date < end)
                    .copied()
                    .collect()
            })
            .unwrap_or_default();

        Ok(PriceSeries::new(symbol, records)?)
    }
}
