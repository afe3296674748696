//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Rejected domain input (sort criterion)         │
//! │  └── ValidationError  - Malformed numbers typed at a prompt            │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the menu loop reports                     │
//! │                                                                         │
//! │  Flow: ValidationError → console notice, same field re-prompted       │
//! │        CoreError       → CliError → console notice                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are faults: every variant ends up as a notice on the
//! console and the menu keeps running.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Sort criterion is neither `name` nor `price`.
    ///
    /// ## When This Occurs
    /// - User types `bogus` at the "sort by" prompt
    ///
    /// No rows are produced and storage is never touched.
    #[error("Invalid sort criterion '{0}' (expected 'name' or 'price')")]
    InvalidCriterion(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input parsing errors.
///
/// Only type parsing is checked: quantities and prices may be negative,
/// names may be empty.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Input is not a whole number.
    #[error("{field} must be a whole number, got '{input}'")]
    InvalidNumber { field: String, input: String },

    /// Input is not a decimal number.
    #[error("{field} must be a decimal number, got '{input}'")]
    InvalidDecimal { field: String, input: String },

    /// Input parsed as a float but is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
