//! RSI (Relative Strength Index) indicator

use crate::indicators::error::IndicatorError;
use crate::models::indicators::{RsiSeries, RsiSmoothing};

pub const DEFAULT_RSI_WINDOW: usize = 14;

/// Calculate RSI for every close.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// The first `window` entries are `None`. A zero average loss yields 100.
pub fn calculate_rsi(
    closes: &[f64],
    window: usize,
    smoothing: RsiSmoothing,
) -> Result<RsiSeries, IndicatorError> {
    if closes.is_empty() {
        return Err(IndicatorError::InsufficientData(
            "RSI needs at least one close".to_string(),
        ));
    }
    if window == 0 {
        return Err(IndicatorError::InvalidWindow {
            indicator: "RSI",
            window,
        });
    }

    let mut gains = vec![0.0; closes.len()];
    let mut losses = vec![0.0; closes.len()];
    for i in 1..closes.len() {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            gains[i] = change;
        } else {
            losses[i] = change.abs();
        }
    }

    let values = match smoothing {
        RsiSmoothing::Wilder => wilder_rsi(&gains, &losses, window),
        RsiSmoothing::Simple => simple_rsi(&gains, &losses, window),
    };

    Ok(RsiSeries {
        window,
        smoothing,
        values,
    })
}

/// Calculate RSI with the default window (14) and Wilder smoothing
pub fn calculate_rsi_default(closes: &[f64]) -> Result<RsiSeries, IndicatorError> {
    calculate_rsi(closes, DEFAULT_RSI_WINDOW, RsiSmoothing::Wilder)
}

/// Recursive average with `alpha = 1/window`, seeded at zero on the first
/// close (which has no change).
fn wilder_rsi(gains: &[f64], losses: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut values = vec![None; gains.len()];
    let alpha = 1.0 / window as f64;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for i in 1..gains.len() {
        avg_gain += alpha * (gains[i] - avg_gain);
        avg_loss += alpha * (losses[i] - avg_loss);
        if i >= window {
            values[i] = Some(rsi_from_averages(avg_gain, avg_loss));
        }
    }

    values
}

fn simple_rsi(gains: &[f64], losses: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..gains.len())
        .map(|i| {
            if i < window {
                return None;
            }
            let from = i + 1 - window;
            let avg_gain = gains[from..=i].iter().sum::<f64>() / window as f64;
            let avg_loss = losses[from..=i].iter().sum::<f64>() / window as f64;
            Some(rsi_from_averages(avg_gain, avg_loss))
        })
        .collect()
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
}
