//! Unit tests for request validation

use chrono::NaiveDate;
use stockscope::models::request::RequestContext;
use stockscope::validation::{validate_range, validate_symbol, ValidationError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_range_passes_through_when_ordered() {
    let (start, end) = validate_range(date(2022, 1, 1), date(2024, 1, 1)).unwrap();
    assert_eq!(start, date(2022, 1, 1));
    assert_eq!(end, date(2024, 1, 1));
}

#[test]
fn test_range_rejects_equal_dates() {
    let result = validate_range(date(2024, 1, 1), date(2024, 1, 1));
    assert_eq!(
        result,
        Err(ValidationError::InvalidRange {
            start: date(2024, 1, 1),
            end: date(2024, 1, 1),
        })
    );
}

#[test]
fn test_range_rejects_reversed_dates() {
    let err = validate_range(date(2024, 6, 1), date(2024, 1, 1)).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidRange { .. }));
    assert!(err.to_string().contains("must be before"));
}

#[test]
fn test_symbol_is_trimmed_and_uppercased() {
    assert_eq!(validate_symbol("  bbca.jk ").unwrap(), "BBCA.JK");
}

#[test]
fn test_blank_symbol_is_rejected() {
    assert_eq!(validate_symbol("   "), Err(ValidationError::EmptySymbol));
}

#[test]
fn test_request_context_validates_both_fields() {
    let context = RequestContext::new("aapl", date(2023, 1, 1), date(2023, 2, 1)).unwrap();
    assert_eq!(context.symbol, "AAPL");

    assert!(RequestContext::new("", date(2023, 1, 1), date(2023, 2, 1)).is_err());
    assert!(RequestContext::new("AAPL", date(2023, 2, 1), date(2023, 1, 1)).is_err());
}
