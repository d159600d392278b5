use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How RSI averages gains and losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiSmoothing {
    /// Recursive average with `alpha = 1 / window`, seeded with the first change.
    #[default]
    Wilder,
    /// Arithmetic mean over the trailing `window` changes.
    Simple,
}

impl FromStr for RsiSmoothing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wilder" => Ok(Self::Wilder),
            "simple" | "sma" => Ok(Self::Simple),
            other => Err(format!("unknown RSI smoothing '{}'", other)),
        }
    }
}

impl fmt::Display for RsiSmoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wilder => write!(f, "wilder"),
            Self::Simple => write!(f, "simple"),
        }
    }
}

/// Simple moving average aligned index-for-index with the input closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageSeries {
    pub window: usize,
    pub values: Vec<Option<f64>>,
}

impl MovingAverageSeries {
    /// Column label used in chart bundles, e.g. `ma50`.
    pub fn label(&self) -> String {
        format!("ma{}", self.window)
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiSeries {
    pub window: usize,
    pub smoothing: RsiSmoothing,
    pub values: Vec<Option<f64>>,
}

impl RsiSeries {
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }
}

/// Indicator columns derived from one price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub moving_averages: Vec<MovingAverageSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<RsiSeries>,
}

impl IndicatorSet {
    pub fn new(symbol: String, dates: Vec<NaiveDate>) -> Self {
        Self {
            symbol,
            dates,
            moving_averages: Vec::new(),
            rsi: None,
        }
    }

    pub fn with_moving_average(mut self, ma: MovingAverageSeries) -> Self {
        self.moving_averages.push(ma);
        self
    }

    pub fn with_rsi(mut self, rsi: RsiSeries) -> Self {
        self.rsi = Some(rsi);
        self
    }

    pub fn moving_average(&self, window: usize) -> Option<&MovingAverageSeries> {
        self.moving_averages.iter().find(|ma| ma.window == window)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
