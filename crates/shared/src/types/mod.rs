//! Common types used across the application.

pub mod precision;

pub use precision::{DecimalPrecision, PrecisionCategory, RoundingMode};
