//! Property-based tests for document totals.
//!
//! - Recalculation is idempotent
//! - Header totals equal the rounded sum of line values
//! - City fields mirror transaction fields without a city currency
//! - Tax keeps the sign of the line amount
//! - Unchanged rate edits return the document untouched

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::{DecimalPrecision, PrecisionCategory, RoundingMode};

use super::header::HeaderAggregator;
use super::line::LineCalculator;
use crate::document::{Document, DocumentHeader, DocumentLine, RateChange, RateField};
use crate::precision::PrecisionRound;

/// Strategy to generate signed line amounts (-1,000,000.000 to 1,000,000.000).
fn line_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|v| Decimal::new(v, 3))
}

/// Strategy to generate tax rates (0.00 to 30.00 percent).
fn gst_percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=3000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy to generate exchange rates (0.000001 to 20000.000000).
fn exchange_rate() -> impl Strategy<Value = Decimal> {
    (1i64..20_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

fn lines() -> impl Strategy<Value = Vec<DocumentLine>> {
    prop::collection::vec(
        (
            prop::option::of(line_amount()),
            prop::option::of(gst_percentage()),
        ),
        0..20,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .zip(1u32..)
            .map(|((tot_amt, gst_percentage), item_no)| DocumentLine {
                item_no,
                tot_amt,
                gst_percentage,
                ..DocumentLine::default()
            })
            .collect()
    })
}

fn precision() -> impl Strategy<Value = DecimalPrecision> {
    (
        0u32..=4,
        0u32..=4,
        0u32..=4,
        prop_oneof![
            Just(RoundingMode::HalfAwayFromZero),
            Just(RoundingMode::HalfEven)
        ],
    )
        .prop_map(|(amount, local, city, rounding)| DecimalPrecision {
            amount_decimals: amount,
            local_amount_decimals: local,
            city_amount_decimals: city,
            rounding,
            ..DecimalPrecision::default()
        })
}

fn sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* lines and rates, recalculating and aggregating twice gives
    /// the same lines and totals as doing it once.
    #[test]
    fn prop_recalculation_is_idempotent(
        lines in lines(),
        rate in exchange_rate(),
        city_rate in exchange_rate(),
        precision in precision(),
        has_city in any::<bool>(),
    ) {
        let once = HeaderAggregator::recalculate_all_lines(&lines, rate, city_rate, &precision, has_city).unwrap();
        let twice = HeaderAggregator::recalculate_all_lines(&once, rate, city_rate, &precision, has_city).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(
            HeaderAggregator::aggregate_header_totals(&once, &precision).unwrap(),
            HeaderAggregator::aggregate_header_totals(&twice, &precision).unwrap()
        );
    }

    /// *For any* lines, every header total equals the rounded sum of the
    /// matching line field, and grand totals equal total plus tax.
    #[test]
    fn prop_header_equals_sum_of_lines(
        lines in lines(),
        rate in exchange_rate(),
        city_rate in exchange_rate(),
        precision in precision(),
        has_city in any::<bool>(),
    ) {
        use PrecisionCategory::{Amount, CityAmount, LocalAmount};

        let lines = HeaderAggregator::recalculate_all_lines(&lines, rate, city_rate, &precision, has_city).unwrap();
        let totals = HeaderAggregator::aggregate_header_totals(&lines, &precision).unwrap();

        prop_assert_eq!(totals.tot_amt, precision.round(sum(lines.iter().map(|l| l.tot_amt.unwrap_or_default())), Amount));
        prop_assert_eq!(totals.tot_local_amt, precision.round(sum(lines.iter().map(|l| l.tot_local_amt)), LocalAmount));
        prop_assert_eq!(totals.tot_cty_amt, precision.round(sum(lines.iter().map(|l| l.tot_cty_amt)), CityAmount));
        prop_assert_eq!(totals.gst_amt, precision.round(sum(lines.iter().map(|l| l.gst_amt)), Amount));
        prop_assert_eq!(totals.gst_local_amt, precision.round(sum(lines.iter().map(|l| l.gst_local_amt)), LocalAmount));
        prop_assert_eq!(totals.gst_cty_amt, precision.round(sum(lines.iter().map(|l| l.gst_cty_amt)), CityAmount));

        prop_assert_eq!(totals.tot_amt_aft_gst, totals.tot_amt + totals.gst_amt);
        prop_assert_eq!(totals.tot_local_amt_aft_gst, totals.tot_local_amt + totals.gst_local_amt);
        prop_assert_eq!(totals.tot_cty_amt_aft_gst, totals.tot_cty_amt + totals.gst_cty_amt);
    }

    /// *For any* line without a city currency, city fields equal the
    /// transaction-currency fields whatever city rate is passed.
    #[test]
    fn prop_city_fields_mirror_transaction_without_city_currency(
        tot_amt in line_amount(),
        gst in gst_percentage(),
        rate in exchange_rate(),
        city_rate in exchange_rate(),
    ) {
        let line = DocumentLine::new(1, tot_amt, gst);
        let result = LineCalculator::recalculate(&line, rate, city_rate, &DecimalPrecision::default(), false).unwrap();
        prop_assert_eq!(Some(result.tot_cty_amt), result.tot_amt);
        prop_assert_eq!(result.gst_cty_amt, result.gst_amt);
    }

    /// *For any* amount, negating it negates every derived field.
    #[test]
    fn prop_sign_is_preserved(
        tot_amt in line_amount(),
        gst in gst_percentage(),
        rate in exchange_rate(),
        city_rate in exchange_rate(),
    ) {
        let precision = DecimalPrecision::default();
        let positive = LineCalculator::recalculate(&DocumentLine::new(1, tot_amt, gst), rate, city_rate, &precision, true).unwrap();
        let negative = LineCalculator::recalculate(&DocumentLine::new(1, -tot_amt, gst), rate, city_rate, &precision, true).unwrap();

        prop_assert_eq!(negative.gst_amt, -positive.gst_amt);
        prop_assert_eq!(negative.tot_local_amt, -positive.tot_local_amt);
        prop_assert_eq!(negative.gst_local_amt, -positive.gst_local_amt);
        prop_assert_eq!(negative.tot_cty_amt, -positive.tot_cty_amt);
        prop_assert_eq!(negative.gst_cty_amt, -positive.gst_cty_amt);
    }

    /// *For any* document, a rate edit back to the same value returns the
    /// document unchanged.
    #[test]
    fn prop_unchanged_rate_edit_is_noop(
        lines in lines(),
        rate in exchange_rate(),
        city_rate in exchange_rate(),
        has_city in any::<bool>(),
        edit_city in any::<bool>(),
    ) {
        let precision = DecimalPrecision::default();
        let document = Document {
            header: DocumentHeader::new(rate, city_rate, has_city),
            lines,
        };
        let field = if edit_city { RateField::CtyExhRate } else { RateField::ExhRate };
        let current = document.header.rate(field);
        let outcome = HeaderAggregator::recalculate_on_rate_change(
            document.clone(),
            RateChange::new(field, current, current),
            &precision,
            has_city,
        )
        .unwrap();

        prop_assert!(!outcome.recalculated);
        prop_assert_eq!(outcome.document, document);
    }
}
