//! Property-based tests for rounding.
//!
//! - Rounded values never carry more places than configured
//! - Rounding is idempotent
//! - Rounding is sign-symmetric

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::RoundingMode;

use super::rounding::round;

/// Strategy to generate signed values with up to 6 decimal places.
fn signed_value() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

/// Strategy to generate decimal places (0 to 6).
fn decimal_places() -> impl Strategy<Value = u32> {
    0u32..=6
}

fn rounding_mode() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![
        Just(RoundingMode::HalfAwayFromZero),
        Just(RoundingMode::HalfEven)
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* value, the rounded result has at most `decimals` places.
    #[test]
    fn prop_round_respects_places(
        value in signed_value(),
        decimals in decimal_places(),
        mode in rounding_mode(),
    ) {
        let result = round(value, decimals, mode);
        prop_assert!(
            result.scale() <= decimals,
            "{} rounded to {} places has scale {}",
            value, decimals, result.scale()
        );
    }

    /// *For any* value, rounding twice equals rounding once.
    #[test]
    fn prop_round_is_idempotent(
        value in signed_value(),
        decimals in decimal_places(),
        mode in rounding_mode(),
    ) {
        let once = round(value, decimals, mode);
        prop_assert_eq!(round(once, decimals, mode), once);
    }

    /// *For any* value, rounding the negation negates the rounding.
    #[test]
    fn prop_round_is_sign_symmetric(
        value in signed_value(),
        decimals in decimal_places(),
        mode in rounding_mode(),
    ) {
        prop_assert_eq!(round(-value, decimals, mode), -round(value, decimals, mode));
    }

    /// *For any* value, the rounding error is at most half a unit.
    #[test]
    fn prop_round_error_within_half_unit(
        value in signed_value(),
        decimals in decimal_places(),
        mode in rounding_mode(),
    ) {
        let half_unit = Decimal::new(5, decimals + 1);
        let error = (round(value, decimals, mode) - value).abs();
        prop_assert!(error <= half_unit, "error {} exceeds {}", error, half_unit);
    }
}
