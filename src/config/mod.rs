//! Environment-driven configuration.
//!
//! Binaries call `dotenvy::dotenv()` first, so every value here can also come
//! from a `.env` file. Unparseable values fall back to their defaults with a warning.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::warn;

use crate::forecast::{ForecastConfig, DEFAULT_FORECAST_HORIZON, MAX_FORECAST_HORIZON};
use crate::indicators::IndicatorConfig;
use crate::models::forecast::ArimaOrder;
use crate::models::indicators::RsiSmoothing;
use crate::presentation::{RSI_OVERBOUGHT, RSI_OVERSOLD};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
pub const DEFAULT_SYMBOL: &str = "BBCA.JK";

/// First day of the default analysis range.
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or(NaiveDate::MIN)
}

pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_port() -> u16 {
    parse_or("PORT", env::var("PORT").ok(), DEFAULT_PORT)
}

/// Market data source settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            timeout_seconds: 10,
            max_retries: 2,
        }
    }
}

impl FetchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("YAHOO_BASE_URL").unwrap_or(defaults.base_url),
            timeout_seconds: parse_or(
                "FETCH_TIMEOUT_SECONDS",
                lookup("FETCH_TIMEOUT_SECONDS"),
                defaults.timeout_seconds,
            ),
            max_retries: parse_or(
                "FETCH_MAX_RETRIES",
                lookup("FETCH_MAX_RETRIES"),
                defaults.max_retries,
            ),
        }
    }
}

/// Parameters of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub indicators: IndicatorConfig,
    pub forecast: ForecastConfig,
    pub preview_rows: usize,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            indicators: IndicatorConfig::default(),
            forecast: ForecastConfig::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            rsi_overbought: RSI_OVERBOUGHT,
            rsi_oversold: RSI_OVERSOLD,
        }
    }
}

impl AnalysisSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let ma_windows = match lookup("MA_WINDOWS") {
            Some(raw) => match parse_windows(&raw) {
                Some(windows) => windows,
                None => {
                    warn!(key = "MA_WINDOWS", value = %raw, "invalid moving average windows, using defaults");
                    defaults.indicators.ma_windows.clone()
                }
            },
            None => defaults.indicators.ma_windows.clone(),
        };

        let rsi_window = positive_or(
            "RSI_WINDOW",
            parse_or("RSI_WINDOW", lookup("RSI_WINDOW"), defaults.indicators.rsi_window),
            defaults.indicators.rsi_window,
        );
        let rsi_smoothing: RsiSmoothing = parse_or(
            "RSI_SMOOTHING",
            lookup("RSI_SMOOTHING"),
            defaults.indicators.rsi_smoothing,
        );
        let order: ArimaOrder = parse_or("ARIMA_ORDER", lookup("ARIMA_ORDER"), defaults.forecast.order);
        let horizon = at_most_or(
            "FORECAST_HORIZON",
            positive_or(
                "FORECAST_HORIZON",
                parse_or("FORECAST_HORIZON", lookup("FORECAST_HORIZON"), DEFAULT_FORECAST_HORIZON),
                DEFAULT_FORECAST_HORIZON,
            ),
            MAX_FORECAST_HORIZON,
            DEFAULT_FORECAST_HORIZON,
        );
        let preview_rows = parse_or("PREVIEW_ROWS", lookup("PREVIEW_ROWS"), defaults.preview_rows);

        Self {
            indicators: IndicatorConfig {
                ma_windows,
                rsi_window,
                rsi_smoothing,
            },
            forecast: ForecastConfig { order, horizon },
            preview_rows,
            ..defaults
        }
    }
}

fn parse_windows(raw: &str) -> Option<Vec<usize>> {
    let windows: Vec<usize> = raw
        .split(',')
        .map(|part| part.trim().parse::<usize>().ok().filter(|w| *w > 0))
        .collect::<Option<_>>()?;
    if windows.is_empty() {
        None
    } else {
        Some(windows)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|e| {
            warn!(key = key, value = %value, error = %e, "invalid configuration value, using default");
            default
        }),
        None => default,
    }
}

fn positive_or(key: &str, value: usize, default: usize) -> usize {
    if value == 0 {
        warn!(key = key, "configuration value must be positive, using default");
        default
    } else {
        value
    }
}

fn at_most_or(key: &str, value: usize, max: usize, default: usize) -> usize {
    if value > max {
        warn!(key = key, value = value, max = max, "configuration value too large, using default");
        default
    } else {
        value
    }
}
