//! Rounding per semantic category.

pub mod rounding;

#[cfg(test)]
mod props;

pub use rounding::{PrecisionRound, coerce_f64, round};
