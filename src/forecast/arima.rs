//! ARIMA(p, d, q) estimation and recursive forecasting.
//!
//! The series is differenced `d` times and modelled as a stationary ARMA process
//! around its sample mean (the drift of the undifferenced series):
//!
//! - `q = 0`: AR coefficients from the Yule-Walker equations, solved with the
//!   Levinson-Durbin recursion. The solution is always stationary.
//! - `q > 0`: Hannan-Rissanen. A long AR fit supplies innovation estimates, then
//!   least squares on lagged values and lagged innovations gives the ARMA terms.
//!
//! A differenced series with (numerically) zero variance is a pure drift model.

use crate::common::math;
use crate::forecast::error::ModelFitError;
use crate::models::forecast::ArimaOrder;

/// Variance below this fraction of the mean square is treated as zero.
const ZERO_VARIANCE_RATIO: f64 = 1e-12;

/// Longest projection `FittedArima::forecast` accepts.
pub const MAX_FORECAST_HORIZON: usize = 365;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArimaModel {
    order: ArimaOrder,
}

impl ArimaModel {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self::with_order(ArimaOrder::new(p, d, q))
    }

    pub fn with_order(order: ArimaOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    /// Smallest history the estimator accepts for this order.
    pub fn minimum_observations(&self) -> usize {
        let ArimaOrder { p, d, q } = self.order;
        let ar_needed = 2 * p + 1;
        let arma_needed = if q > 0 {
            let long = long_ar_order(self.order);
            (2 * long + 1).max(long + p.max(q) + p + q + 2)
        } else {
            0
        };
        (d + ar_needed.max(arma_needed)).max(p + d + 1)
    }

    pub fn fit(&self, values: &[f64]) -> Result<FittedArima, ModelFitError> {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ModelFitError::NonFinite { index });
        }

        let required = self.minimum_observations();
        if values.len() < required {
            return Err(ModelFitError::TooShort {
                order: self.order.to_string(),
                required,
                actual: values.len(),
            });
        }

        let ArimaOrder { p, d, q } = self.order;
        let differenced = math::difference(values, d);
        let drift = math::mean(&differenced).ok_or_else(|| {
            ModelFitError::Degenerate("differenced series is empty".to_string())
        })?;
        let centered: Vec<f64> = differenced.iter().map(|v| v - drift).collect();

        let variance = math::autocovariance(&centered, 0).unwrap_or(0.0);
        let mean_square =
            differenced.iter().map(|v| v * v).sum::<f64>() / differenced.len() as f64;

        let (ar, ma, sigma2) = if variance <= ZERO_VARIANCE_RATIO * mean_square {
            (vec![0.0; p], vec![0.0; q], 0.0)
        } else if q == 0 {
            let (ar, sigma2) = yule_walker(&centered, p)?;
            (ar, Vec::new(), sigma2)
        } else {
            hannan_rissanen(&centered, self.order)?
        };

        if ar.iter().chain(ma.iter()).any(|c| !c.is_finite()) || !sigma2.is_finite() {
            return Err(ModelFitError::Degenerate(
                "estimated coefficients are not finite".to_string(),
            ));
        }

        let residuals = innovations(&centered, &ar, &ma);

        Ok(FittedArima {
            order: self.order,
            drift,
            ar,
            ma,
            sigma2,
            levels: level_tails(values, d),
            centered,
            residuals,
        })
    }
}

/// Estimated ARIMA model ready to forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedArima {
    order: ArimaOrder,
    drift: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    sigma2: f64,
    // Last value of each differencing level 0..d, used to integrate forecasts back.
    levels: Vec<f64>,
    centered: Vec<f64>,
    residuals: Vec<f64>,
}

impl FittedArima {
    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    /// Mean of the differenced series.
    pub fn drift(&self) -> f64 {
        self.drift
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    /// Innovation variance.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Point forecasts for the next `steps` observations, undifferenced.
    pub fn forecast(&self, steps: usize) -> Result<Vec<f64>, ModelFitError> {
        if steps == 0 || steps > MAX_FORECAST_HORIZON {
            return Err(ModelFitError::InvalidHorizon {
                steps,
                max: MAX_FORECAST_HORIZON,
            });
        }

        let mut history = self.centered.clone();
        let mut shocks = self.residuals.clone();
        let mut differenced = Vec::with_capacity(steps);

        for _ in 0..steps {
            let t = history.len();
            let ar_part: f64 = self
                .ar
                .iter()
                .enumerate()
                .filter(|(i, _)| t > *i)
                .map(|(i, phi)| phi * history[t - 1 - i])
                .sum();
            let ma_part: f64 = self
                .ma
                .iter()
                .enumerate()
                .filter(|(j, _)| t > *j)
                .map(|(j, theta)| theta * shocks[t - 1 - j])
                .sum();

            let next = ar_part + ma_part;
            history.push(next);
            // Future innovations have zero expectation.
            shocks.push(0.0);
            differenced.push(next + self.drift);
        }

        let forecast = integrate(&differenced, &self.levels);
        if forecast.iter().any(|v| !v.is_finite()) {
            return Err(ModelFitError::Degenerate("forecast diverged".to_string()));
        }
        Ok(forecast)
    }
}

fn long_ar_order(order: ArimaOrder) -> usize {
    2 * (order.p + order.q).max(2)
}

fn yule_walker(centered: &[f64], p: usize) -> Result<(Vec<f64>, f64), ModelFitError> {
    let autocov: Vec<f64> = (0..=p)
        .map(|lag| math::autocovariance(centered, lag).unwrap_or(0.0))
        .collect();
    if p == 0 {
        return Ok((Vec::new(), autocov[0]));
    }
    math::levinson_durbin(&autocov, p).ok_or_else(|| {
        ModelFitError::Degenerate(
            "Yule-Walker recursion did not produce a stationary solution".to_string(),
        )
    })
}

fn hannan_rissanen(
    centered: &[f64],
    order: ArimaOrder,
) -> Result<(Vec<f64>, Vec<f64>, f64), ModelFitError> {
    let ArimaOrder { p, q, .. } = order;
    let long = long_ar_order(order);

    let (long_ar, _) = yule_walker(centered, long)?;
    let mut shocks = vec![0.0; centered.len()];
    for t in long..centered.len() {
        let predicted: f64 = (0..long).map(|i| long_ar[i] * centered[t - 1 - i]).sum();
        shocks[t] = centered[t] - predicted;
    }

    let start = long + p.max(q);
    let mut design = Vec::with_capacity(centered.len().saturating_sub(start));
    let mut targets = Vec::with_capacity(design.capacity());
    for t in start..centered.len() {
        let mut row = Vec::with_capacity(p + q);
        row.extend((0..p).map(|i| centered[t - 1 - i]));
        row.extend((0..q).map(|j| shocks[t - 1 - j]));
        design.push(row);
        targets.push(centered[t]);
    }

    let coefficients = math::least_squares(&design, &targets).ok_or_else(|| {
        ModelFitError::Degenerate("ARMA regression is singular".to_string())
    })?;
    let ar = coefficients[..p].to_vec();
    let ma = coefficients[p..].to_vec();

    let residuals = innovations(centered, &ar, &ma);
    let burn_in = p.max(q);
    let tail = &residuals[burn_in.min(residuals.len())..];
    let sigma2 = if tail.is_empty() {
        0.0
    } else {
        tail.iter().map(|e| e * e).sum::<f64>() / tail.len() as f64
    };

    Ok((ar, ma, sigma2))
}

/// One-step-ahead prediction errors of the fitted ARMA, pre-sample terms set to zero.
fn innovations(centered: &[f64], ar: &[f64], ma: &[f64]) -> Vec<f64> {
    let mut residuals = vec![0.0; centered.len()];
    for t in 0..centered.len() {
        let ar_part: f64 = ar
            .iter()
            .enumerate()
            .filter(|(i, _)| t > *i)
            .map(|(i, phi)| phi * centered[t - 1 - i])
            .sum();
        let ma_part: f64 = ma
            .iter()
            .enumerate()
            .filter(|(j, _)| t > *j)
            .map(|(j, theta)| theta * residuals[t - 1 - j])
            .sum();
        residuals[t] = centered[t] - ar_part - ma_part;
    }
    residuals
}

fn level_tails(values: &[f64], d: usize) -> Vec<f64> {
    (0..d)
        .filter_map(|k| math::difference(values, k).last().copied())
        .collect()
}

/// Undo `levels.len()` rounds of differencing by cumulative summation.
fn integrate(differenced: &[f64], levels: &[f64]) -> Vec<f64> {
    let mut current = differenced.to_vec();
    for &last in levels.iter().rev() {
        let mut running = last;
        current = current
            .iter()
            .map(|step| {
                running += step;
                running
            })
            .collect();
    }
    current
}
