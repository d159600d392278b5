//! Stock analysis: daily price history, moving averages, RSI and an ARIMA
//! close-price forecast, packaged as chart-ready data.

pub mod analysis;
pub mod common;
pub mod config;
pub mod core;
pub mod forecast;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod presentation;
pub mod services;
pub mod validation;

pub use analysis::{AnalysisError, AnalysisPipeline, AnalysisReport, ForecastStage};
pub use config::AnalysisSettings;
