//! Derives the indicator columns for one price series.

use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{calculate_rsi, DEFAULT_RSI_WINDOW};
use crate::indicators::trend::calculate_smas;
use crate::models::indicators::{IndicatorSet, RsiSmoothing};
use crate::models::price::PriceSeries;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub ma_windows: Vec<usize>,
    pub rsi_window: usize,
    pub rsi_smoothing: RsiSmoothing,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_windows: vec![50, 200],
            rsi_window: DEFAULT_RSI_WINDOW,
            rsi_smoothing: RsiSmoothing::Wilder,
        }
    }
}

pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Compute every configured moving average plus RSI.
    ///
    /// Short histories are not an error: columns simply stay `None` where the
    /// window is not yet filled. Only an empty series fails.
    pub fn compute(&self, series: &PriceSeries) -> Result<IndicatorSet, IndicatorError> {
        if series.is_empty() {
            return Err(IndicatorError::InsufficientData(format!(
                "no closes for {}",
                series.symbol()
            )));
        }

        let closes = series.closes();
        let mut set = IndicatorSet::new(series.symbol().to_string(), series.dates());

        for ma in calculate_smas(&closes, &self.config.ma_windows)? {
            set = set.with_moving_average(ma);
        }

        let rsi = calculate_rsi(&closes, self.config.rsi_window, self.config.rsi_smoothing)?;
        set = set.with_rsi(rsi);

        debug!(
            symbol = %series.symbol(),
            closes = closes.len(),
            ma_windows = ?self.config.ma_windows,
            rsi_window = self.config.rsi_window,
            smoothing = %self.config.rsi_smoothing,
            "IndicatorEngine: computed indicators for {}",
            series.symbol()
        );

        Ok(set)
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(IndicatorConfig::default())
    }
}
