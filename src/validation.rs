//! Request validation that runs before any data is fetched.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start date {start} must be before end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("ticker symbol must not be empty")]
    EmptySymbol,
}

/// Pass `(start, end)` through unchanged when `start < end`.
pub fn validate_range(
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    if start >= end {
        return Err(ValidationError::InvalidRange { start, end });
    }
    Ok((start, end))
}

/// Trim and uppercase a ticker symbol.
pub fn validate_symbol(symbol: &str) -> Result<String, ValidationError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    Ok(symbol.to_uppercase())
}
