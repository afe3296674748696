//! # Validation Module
//!
//! Parsing of the numeric fields a user types at the menu prompts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console (apps/cli)                                           │
//! │  ├── Reads one line per field                                          │
//! │  └── Re-prompts the same field on a ValidationError                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Type parsing only (whole number / finite decimal)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── Column affinity, rowid primary key                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There are deliberately no range rules: negative quantities and prices are
//! stored as typed.
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{parse_price, parse_quantity};
//!
//! assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
//! assert_eq!(parse_price("9.99").unwrap(), 9.99);
//! assert!(parse_price("cheap").is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Generic Parsers
// =============================================================================

/// Parses a whole number, ignoring surrounding whitespace.
pub fn parse_whole(field: &str, input: &str) -> ValidationResult<i64> {
    let trimmed = input.trim();

    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field: field.to_string(),
            input: trimmed.to_string(),
        })
}

/// Parses a finite decimal number, ignoring surrounding whitespace.
///
/// `NaN` and infinities are rejected: SQLite would store NaN as NULL and
/// the row would no longer round-trip.
pub fn parse_decimal(field: &str, input: &str) -> ValidationResult<f64> {
    let trimmed = input.trim();

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidDecimal {
            field: field.to_string(),
            input: trimmed.to_string(),
        })?;

    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    Ok(value)
}

// =============================================================================
// Field Parsers
// =============================================================================

/// Parses a product id.
pub fn parse_id(input: &str) -> ValidationResult<i64> {
    parse_whole("id", input)
}

/// Parses a quantity. Any whole number is accepted.
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    parse_whole("quantity", input)
}

/// Parses a price. Any finite decimal is accepted.
pub fn parse_price(input: &str) -> ValidationResult<f64> {
    parse_decimal("price", input)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5"), Ok(5));
        assert_eq!(parse_quantity("  -3\n"), Ok(-3));
        assert_eq!(parse_quantity("0"), Ok(0));

        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("2.5").is_err());
        assert!(parse_quantity("ten").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("15"), Ok(15.0));
        assert_eq!(parse_price(" 0.5 "), Ok(0.5));
        assert_eq!(parse_price("-1.25"), Ok(-1.25));

        assert_eq!(
            parse_price("abc"),
            Err(ValidationError::InvalidDecimal {
                field: "price".to_string(),
                input: "abc".to_string(),
            })
        );
        assert_eq!(
            parse_price("NaN"),
            Err(ValidationError::NotFinite {
                field: "price".to_string(),
            })
        );
        assert!(parse_price("inf").is_err());
    }

    #[test]
    fn test_parse_id_reports_trimmed_input() {
        assert_eq!(parse_id("42"), Ok(42));
        assert_eq!(
            parse_id(" x1 "),
            Err(ValidationError::InvalidNumber {
                field: "id".to_string(),
                input: "x1".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_decimal_uses_field_name() {
        let err = parse_decimal("minimum price", "low").unwrap_err();
        assert_eq!(
            err.to_string(),
            "minimum price must be a decimal number, got 'low'"
        );
    }
}
