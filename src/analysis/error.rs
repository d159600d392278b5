use chrono::NaiveDate;
use thiserror::Error;

use crate::indicators::IndicatorError;
use crate::presentation::PresentationError;
use crate::services::market_data::MarketDataError;
use crate::validation::ValidationError;

/// Everything that stops an analysis run before a report exists.
///
/// A forecast failure is not here: the report is still produced with its
/// charts and carries the failure in its forecast section.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
    #[error(
        "no data for symbol '{symbol}' between {start} and {end}; check the symbol and that the market was open in that range"
    )]
    EmptyData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("failed to fetch market data: {0}")]
    Fetch(#[from] MarketDataError),
    #[error("indicator computation failed: {0}")]
    Indicator(#[from] IndicatorError),
    #[error("failed to prepare charts: {0}")]
    Presentation(#[from] PresentationError),
}

impl AnalysisError {
    /// Empty data is reported as a warning rather than a failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::EmptyData { .. })
    }

    /// Metric label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid_request",
            Self::EmptyData { .. } => "no_data",
            Self::Fetch(_) => "fetch_failed",
            Self::Indicator(_) | Self::Presentation(_) => "failed",
        }
    }
}
