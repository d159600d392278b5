//! Chart-ready bundles handed to the renderer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickBundle {
    pub title: String,
    pub points: Vec<CandlePoint>,
}

/// One row of the upper panel: close plus every moving average, keyed `ma<window>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePanelRow {
    pub date: NaiveDate,
    pub close: f64,
    #[serde(flatten)]
    pub averages: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiPanelRow {
    pub date: NaiveDate,
    pub rsi: Option<f64>,
}

/// Horizontal guide drawn across the RSI panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBundle {
    pub price_title: String,
    pub rsi_title: String,
    pub price_panel: Vec<PricePanelRow>,
    pub rsi_panel: Vec<RsiPanelRow>,
    pub reference_lines: Vec<ReferenceLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOverlayBundle {
    pub title: String,
    pub historical: Vec<ClosePoint>,
    pub forecast: Vec<ClosePoint>,
}
