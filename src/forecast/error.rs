use thiserror::Error;

/// Why an ARIMA model could not be fitted or projected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelFitError {
    #[error("model fit failed: {actual} observations, ARIMA{order} needs at least {required}")]
    TooShort {
        order: String,
        required: usize,
        actual: usize,
    },
    #[error("model fit failed: non-finite value at index {index}")]
    NonFinite { index: usize },
    #[error("model fit failed: {0}")]
    Degenerate(String),
    #[error("model fit failed: forecast horizon must be between 1 and {max}, got {steps}")]
    InvalidHorizon { steps: usize, max: usize },
}
