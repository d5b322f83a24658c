//! Precision and rounding utility.
//!
//! Rounding never fails: missing values count as zero, and hosts holding
//! floating-point input go through [`coerce_f64`] so `NaN` never reaches a
//! total.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tally_shared::{DecimalPrecision, PrecisionCategory, RoundingMode};

/// Round a value to `decimals` places with the given midpoint rule.
///
/// The result always carries exactly `decimals` places (`50` at 2 places
/// is `50.00`), and a zero result is never negative.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tally_core::{RoundingMode, round};
///
/// assert_eq!(round(dec!(0.125), 2, RoundingMode::HalfAwayFromZero), dec!(0.13));
/// assert_eq!(round(dec!(0.125), 2, RoundingMode::HalfEven), dec!(0.12));
/// ```
#[must_use]
pub fn round(value: Decimal, decimals: u32, mode: RoundingMode) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(decimals, mode.strategy());
    rounded.rescale(decimals);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Convert a host floating-point value, mapping `NaN` and infinities to zero.
#[must_use]
pub fn coerce_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Category-aware rounding on a precision record.
pub trait PrecisionRound {
    /// Round `value` at the places configured for `category`.
    fn round(&self, value: Decimal, category: PrecisionCategory) -> Decimal;

    /// Same as [`PrecisionRound::round`], with `None` treated as zero.
    fn round_opt(&self, value: Option<Decimal>, category: PrecisionCategory) -> Decimal {
        self.round(value.unwrap_or_default(), category)
    }
}

impl PrecisionRound for DecimalPrecision {
    fn round(&self, value: Decimal, category: PrecisionCategory) -> Decimal {
        round(value, self.places(category), self.rounding)
    }
}
