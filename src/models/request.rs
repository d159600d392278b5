use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::{validate_range, validate_symbol, ValidationError};

/// One user-triggered analysis: which symbol, over which date range.
///
/// `end` is exclusive, the way the market data source treats it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RequestContext {
    pub fn new(symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        let symbol = validate_symbol(symbol)?;
        let (start, end) = validate_range(start, end)?;
        Ok(Self { symbol, start, end })
    }
}
