//! Document error types.
//!
//! Missing numbers are never errors; they count as zero. These variants
//! cover caller misuse only.

use rust_decimal::Decimal;
use tally_shared::AppError;
use thiserror::Error;

use super::types::RateField;

/// Errors that can occur during document recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    // ========== Currency Errors ==========
    /// The city currency flag passed in disagrees with the header.
    #[error("City currency flag mismatch: header has {header}, caller passed {requested}")]
    CityCurrencyMismatch {
        /// Flag stored on the header.
        header: bool,
        /// Flag passed by the caller.
        requested: bool,
    },

    /// Exchange rates cannot be negative.
    #[error("Exchange rate {field} cannot be negative: {value}")]
    NegativeExchangeRate {
        /// Offending field.
        field: RateField,
        /// Offending value.
        value: Decimal,
    },

    // ========== Line Errors ==========
    /// No line with this item number.
    #[error("Line not found: {0}")]
    LineNotFound(u32),

    /// Two lines share an item number.
    #[error("Duplicate item number: {0}")]
    DuplicateItemNo(u32),

    /// Item numbers must run 1, 2, 3, ... without gaps.
    #[error("Item numbers are not dense: expected {expected}, found {found}")]
    NonDenseItemNo {
        /// Item number expected at this position.
        expected: u32,
        /// Item number actually found.
        found: u32,
    },

    // ========== Arithmetic Errors ==========
    /// A line amount exceeded the decimal range.
    #[error("Amount overflow on line {0}")]
    LineOverflow(u32),

    /// A header total exceeded the decimal range.
    #[error("Amount overflow while totaling {0}")]
    TotalsOverflow(&'static str),
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        Self::Engine(err.to_string())
    }
}
