//! Time-series forecasting of close prices.

pub mod arima;
pub mod engine;
pub mod error;

pub use arima::{ArimaModel, FittedArima, MAX_FORECAST_HORIZON};
pub use engine::{forecast_dates, ForecastConfig, ForecastEngine, DEFAULT_FORECAST_HORIZON};
pub use error::ModelFitError;
