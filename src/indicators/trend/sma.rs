//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::MovingAverageSeries;

/// Rolling simple moving average over `window` closes.
///
/// Index `i` holds the mean of `closes[i + 1 - window..=i]` once `i + 1 >= window`
/// and `None` before that.
pub fn calculate_sma(closes: &[f64], window: usize) -> Result<MovingAverageSeries, IndicatorError> {
    if closes.is_empty() {
        return Err(IndicatorError::InsufficientData(
            "moving average needs at least one close".to_string(),
        ));
    }
    if window == 0 {
        return Err(IndicatorError::InvalidWindow {
            indicator: "moving average",
            window,
        });
    }

    let values = (0..closes.len())
        .map(|i| {
            if i + 1 >= window {
                math::sma(&closes[..=i], window)
            } else {
                None
            }
        })
        .collect();

    Ok(MovingAverageSeries { window, values })
}

/// Calculate several moving averages over the same closes.
pub fn calculate_smas(
    closes: &[f64],
    windows: &[usize],
) -> Result<Vec<MovingAverageSeries>, IndicatorError> {
    windows
        .iter()
        .map(|&window| calculate_sma(closes, window))
        .collect()
}
