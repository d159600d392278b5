//! Fits the configured ARIMA order to a close series and dates its forecast.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::forecast::arima::ArimaModel;
use crate::forecast::error::ModelFitError;
use crate::models::forecast::{ArimaOrder, ForecastPoint, ForecastSeries};
use crate::models::price::PriceSeries;

pub const DEFAULT_FORECAST_HORIZON: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastConfig {
    pub order: ArimaOrder,
    pub horizon: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            order: ArimaOrder::default(),
            horizon: DEFAULT_FORECAST_HORIZON,
        }
    }
}

pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast the closes of `series` for `horizon` calendar days.
    ///
    /// Days are calendar days, not trading days: weekends and holidays get a
    /// forecast like any other date.
    pub fn forecast(&self, series: &PriceSeries) -> Result<ForecastSeries, ModelFitError> {
        let closes = series.closes();
        let last_date = series.last_date().ok_or(ModelFitError::TooShort {
            order: self.config.order.to_string(),
            required: ArimaModel::with_order(self.config.order).minimum_observations(),
            actual: 0,
        })?;

        let points = self.forecast_closes(&closes, last_date)?;

        debug!(
            symbol = %series.symbol(),
            order = %self.config.order,
            horizon = points.len(),
            "ForecastEngine: forecast {} days for {}",
            points.len(),
            series.symbol()
        );

        Ok(ForecastSeries {
            symbol: series.symbol().to_string(),
            order: self.config.order,
            points,
        })
    }

    /// Fit and forecast raw closes whose last observation falls on `last_date`.
    pub fn forecast_closes(
        &self,
        closes: &[f64],
        last_date: NaiveDate,
    ) -> Result<Vec<ForecastPoint>, ModelFitError> {
        let fitted = ArimaModel::with_order(self.config.order).fit(closes)?;
        let values = fitted.forecast(self.config.horizon)?;
        let dates = forecast_dates(last_date, self.config.horizon)?;

        Ok(dates
            .into_iter()
            .zip(values)
            .map(|(date, close)| ForecastPoint { date, close })
            .collect())
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

/// `horizon` consecutive calendar days starting the day after `last_date`.
pub fn forecast_dates(last_date: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>, ModelFitError> {
    (1..=horizon as u64)
        .map(|offset| {
            last_date.checked_add_days(Days::new(offset)).ok_or_else(|| {
                ModelFitError::Degenerate(format!("forecast date overflow after {}", last_date))
            })
        })
        .collect()
}
