//! Core business logic for Tally.
//!
//! This crate contains the multi-currency document totals engine with ZERO
//! I/O dependencies. Every operation is a pure function over immutable
//! snapshots: callers pass a document in and receive a new one back.
//!
//! # Modules
//!
//! - `precision` - Rounding per semantic category
//! - `document` - Header and line records, line collection helpers, errors
//! - `totals` - Line calculator, header aggregator, and edit triggers

pub mod document;
pub mod precision;
pub mod totals;

pub use document::{
    Document, DocumentError, DocumentHeader, DocumentLine, HeaderTotals, RateChange, RateField,
};
pub use precision::{PrecisionRound, coerce_f64, round};
pub use tally_shared::{DecimalPrecision, PrecisionCategory, RoundingMode};
pub use totals::{HeaderAggregator, LineCalculator, RecalcOutcome};
