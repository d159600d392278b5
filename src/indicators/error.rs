use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("insufficient data: {0}")]
    InsufficientData(String),
    #[error("invalid {indicator} window: {window}")]
    InvalidWindow {
        indicator: &'static str,
        window: usize,
    },
}
