use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::chart::{CandlestickBundle, ForecastOverlayBundle, IndicatorBundle};
use crate::models::forecast::ForecastSeries;
use crate::models::indicators::IndicatorSet;
use crate::models::price::{PriceRecord, PriceSeries};
use crate::models::request::RequestContext;

/// Result of the forecast stage as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastStage {
    Ready {
        series: ForecastSeries,
        overlay: ForecastOverlayBundle,
    },
    Failed {
        message: String,
    },
}

impl ForecastStage {
    pub fn series(&self) -> Option<&ForecastSeries> {
        match self {
            Self::Ready { series, .. } => Some(series),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Latest value of every column, for summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestSnapshot {
    pub date: NaiveDate,
    pub close: f64,
    pub averages: BTreeMap<String, Option<f64>>,
    pub rsi: Option<f64>,
}

impl LatestSnapshot {
    pub fn from_series(series: &PriceSeries, indicators: &IndicatorSet) -> Option<Self> {
        let last = series.records().last()?;
        Some(Self {
            date: last.date,
            close: last.close,
            averages: indicators
                .moving_averages
                .iter()
                .map(|ma| (ma.label(), ma.latest()))
                .collect(),
            rsi: indicators.rsi.as_ref().and_then(|rsi| rsi.latest()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub context: RequestContext,
    pub record_count: usize,
    /// Most recent rows, oldest first.
    pub preview: Vec<PriceRecord>,
    pub latest: Option<LatestSnapshot>,
    pub candlestick: CandlestickBundle,
    pub indicators: IndicatorBundle,
    pub forecast: ForecastStage,
}
