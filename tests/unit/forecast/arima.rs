//! Unit tests for ARIMA estimation and forecasting

use stockscope::forecast::{ArimaModel, ModelFitError, MAX_FORECAST_HORIZON};
use stockscope::models::forecast::ArimaOrder;

/// Deterministic uniform noise in [-0.5, 0.5).
struct Noise(u64);

impl Noise {
    fn next(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64 - 0.5
    }
}

fn linear_closes(count: usize, from: f64, to: f64) -> Vec<f64> {
    let step = (to - from) / (count - 1) as f64;
    (0..count).map(|i| from + i as f64 * step).collect()
}

/// Random walk whose increments follow an AR(1) around `drift`.
fn ar1_integrated(count: usize, phi: f64, drift: f64, seed: u64) -> Vec<f64> {
    let mut noise = Noise(seed);
    let mut level = 1_000.0;
    let mut previous = 0.0;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        let deviation = phi * previous + noise.next();
        previous = deviation;
        level += drift + deviation;
        values.push(level);
    }
    values
}

fn arma11(count: usize, phi: f64, theta: f64, seed: u64) -> Vec<f64> {
    let mut noise = Noise(seed);
    let mut previous_value = 0.0;
    let mut previous_shock = 0.0;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        let shock = noise.next();
        let value = phi * previous_value + shock + theta * previous_shock;
        values.push(value);
        previous_value = value;
        previous_shock = shock;
    }
    values
}

#[test]
fn test_minimum_observations_default_order() {
    let model = ArimaModel::with_order(ArimaOrder::default());
    assert_eq!(model.minimum_observations(), 12);
    assert_eq!(ArimaModel::new(0, 0, 0).minimum_observations(), 1);
}

#[test]
fn test_fit_rejects_short_series() {
    let err = ArimaModel::new(5, 1, 0).fit(&[1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(
        err,
        ModelFitError::TooShort {
            order: "(5,1,0)".to_string(),
            required: 12,
            actual: 3,
        }
    );
    assert!(err.to_string().starts_with("model fit failed"));
}

#[test]
fn test_fit_rejects_non_finite_values() {
    let mut closes = linear_closes(30, 1.0, 30.0);
    closes[7] = f64::INFINITY;
    let err = ArimaModel::new(5, 1, 0).fit(&closes).unwrap_err();
    assert_eq!(err, ModelFitError::NonFinite { index: 7 });
}

#[test]
fn test_forecast_rejects_out_of_range_steps() {
    let fitted = ArimaModel::new(5, 1, 0)
        .fit(&linear_closes(30, 1.0, 30.0))
        .unwrap();
    assert_eq!(
        fitted.forecast(0),
        Err(ModelFitError::InvalidHorizon { steps: 0, max: MAX_FORECAST_HORIZON })
    );
    assert_eq!(
        fitted.forecast(usize::MAX),
        Err(ModelFitError::InvalidHorizon {
            steps: usize::MAX,
            max: MAX_FORECAST_HORIZON
        })
    );
    assert_eq!(fitted.forecast(MAX_FORECAST_HORIZON).unwrap().len(), MAX_FORECAST_HORIZON);
}

#[test]
fn test_linear_series_continues_trend() {
    let closes = linear_closes(300, 100.0, 400.0);
    let fitted = ArimaModel::new(5, 1, 0).fit(&closes).unwrap();
    let step = 300.0 / 299.0;

    assert!((fitted.drift() - step).abs() < 1e-9);
    assert!(fitted.ar_coefficients().iter().all(|c| *c == 0.0));

    let forecast = fitted.forecast(10).unwrap();
    assert_eq!(forecast.len(), 10);
    for (k, value) in forecast.iter().enumerate() {
        let expected = 400.0 + (k + 1) as f64 * step;
        assert!(
            (value - expected).abs() < 1e-6,
            "step {}: expected {}, got {}",
            k + 1,
            expected,
            value
        );
    }
    assert!(forecast.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_constant_series_forecasts_constant() {
    let closes = vec![50.0; 40];
    let forecast = ArimaModel::new(5, 1, 0).fit(&closes).unwrap().forecast(5).unwrap();
    assert_eq!(forecast, vec![50.0; 5]);
}

#[test]
fn test_white_noise_forecasts_mean() {
    let fitted = ArimaModel::new(0, 0, 0).fit(&[1.0, 2.0, 3.0]).unwrap();
    assert!((fitted.drift() - 2.0).abs() < 1e-12);
    assert_eq!(fitted.forecast(3).unwrap(), vec![2.0, 2.0, 2.0]);
}

#[test]
fn test_fit_is_deterministic() {
    let closes = ar1_integrated(400, 0.4, 0.05, 7);
    let model = ArimaModel::with_order(ArimaOrder::default());
    let first = model.fit(&closes).unwrap().forecast(10).unwrap();
    let second = model.fit(&closes).unwrap().forecast(10).unwrap();
    assert_eq!(first, second);
    assert!(first.iter().all(|v| v.is_finite()));
}

#[test]
fn test_recovers_ar1_coefficient() {
    let closes = ar1_integrated(3_000, 0.6, 0.0, 42);
    let fitted = ArimaModel::new(1, 1, 0).fit(&closes).unwrap();
    let phi = fitted.ar_coefficients()[0];
    assert!((phi - 0.6).abs() < 0.1, "phi estimate {}", phi);
    assert!(fitted.sigma2() > 0.0);
    assert!(fitted.ma_coefficients().is_empty());
}

#[test]
fn test_recovers_arma11_coefficients() {
    let values = arma11(3_000, 0.5, 0.3, 11);
    let fitted = ArimaModel::new(1, 0, 1).fit(&values).unwrap();
    let phi = fitted.ar_coefficients()[0];
    let theta = fitted.ma_coefficients()[0];
    assert!((phi - 0.5).abs() < 0.2, "phi estimate {}", phi);
    assert!((theta - 0.3).abs() < 0.2, "theta estimate {}", theta);

    let forecast = fitted.forecast(10).unwrap();
    assert!(forecast.iter().all(|v| v.is_finite()));
}
