//! Line (detail) calculator.
//!
//! CRITICAL: Every derived amount is rounded at the line, before any
//! header summation, so displayed line values always reconcile with the
//! header.

use rust_decimal::Decimal;
use tally_shared::{DecimalPrecision, PrecisionCategory};

use crate::document::{DocumentError, DocumentHeader, DocumentLine};
use crate::precision::PrecisionRound;

/// Recalculates one document line.
pub struct LineCalculator;

impl LineCalculator {
    /// Recalculate a line's tax and currency amounts.
    ///
    /// Computes, in order:
    /// 1. `gst_amt = round(tot_amt * gst_percentage / 100)` at amount places
    /// 2. local amounts: `tot_amt` and `gst_amt` times `exchange_rate`
    /// 3. city amounts: times `city_exchange_rate` when `has_city_currency`,
    ///    otherwise copied from the transaction-currency values
    ///
    /// A missing `tot_amt` or `gst_percentage` counts as zero. `tot_amt` is
    /// an input and comes back as entered; every derived field is computed
    /// from the unrounded amount. The input line is untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tally_core::{DecimalPrecision, DocumentLine, LineCalculator};
    ///
    /// let line = DocumentLine::new(1, dec!(1000), dec!(5));
    /// let precision = DecimalPrecision::default();
    /// let result =
    ///     LineCalculator::recalculate(&line, dec!(3.5), dec!(3.6), &precision, true).unwrap();
    /// assert_eq!(result.gst_amt, dec!(50.00));
    /// assert_eq!(result.tot_local_amt, dec!(3500.00));
    /// assert_eq!(result.gst_cty_amt, dec!(180.00));
    /// ```
    pub fn recalculate(
        line: &DocumentLine,
        exchange_rate: Decimal,
        city_exchange_rate: Decimal,
        precision: &DecimalPrecision,
        has_city_currency: bool,
    ) -> Result<DocumentLine, DocumentError> {
        let item_no = line.item_no;
        let tot_amt = line.tot_amt.unwrap_or_default();
        let gst_percentage = line.gst_percentage.unwrap_or_default();

        let gst_amt = precision.round(
            mul(tot_amt, gst_percentage, item_no)? / Decimal::ONE_HUNDRED,
            PrecisionCategory::Amount,
        );

        let tot_local_amt = precision.round(
            mul(tot_amt, exchange_rate, item_no)?,
            PrecisionCategory::LocalAmount,
        );
        let gst_local_amt = precision.round(
            mul(gst_amt, exchange_rate, item_no)?,
            PrecisionCategory::LocalAmount,
        );

        let (tot_cty_amt, gst_cty_amt) = if has_city_currency {
            (
                precision.round(
                    mul(tot_amt, city_exchange_rate, item_no)?,
                    PrecisionCategory::CityAmount,
                ),
                precision.round(
                    mul(gst_amt, city_exchange_rate, item_no)?,
                    PrecisionCategory::CityAmount,
                ),
            )
        } else {
            // City currency degenerates to the transaction currency
            (tot_amt, gst_amt)
        };

        Ok(DocumentLine {
            tot_local_amt,
            tot_cty_amt,
            gst_amt,
            gst_local_amt,
            gst_cty_amt,
            ..line.clone()
        })
    }

    /// Recalculate a line against the rates and flag stored on a header.
    pub fn recalculate_with_header(
        line: &DocumentLine,
        header: &DocumentHeader,
        precision: &DecimalPrecision,
    ) -> Result<DocumentLine, DocumentError> {
        Self::recalculate(
            line,
            header.exh_rate,
            header.cty_exh_rate,
            precision,
            header.has_city_currency,
        )
    }

    /// Derive `tot_amt` from quantity and unit price.
    ///
    /// `tot_amt = round(round(qty, quantity places) * unit_price, amount places)`.
    /// Lines without both a quantity and a price keep their entered amount.
    pub fn derive_amount(
        line: &DocumentLine,
        precision: &DecimalPrecision,
    ) -> Result<DocumentLine, DocumentError> {
        let (Some(qty), Some(unit_price)) = (line.qty, line.unit_price) else {
            return Ok(line.clone());
        };

        let qty = precision.round(qty, PrecisionCategory::Quantity);
        let tot_amt = precision.round(
            mul(qty, unit_price, line.item_no)?,
            PrecisionCategory::Amount,
        );

        Ok(DocumentLine {
            qty: Some(qty),
            tot_amt: Some(tot_amt),
            ..line.clone()
        })
    }

    /// Assign a tax category and rate, then recalculate the line.
    pub fn apply_gst(
        line: &DocumentLine,
        gst_id: Option<u32>,
        gst_percentage: Decimal,
        header: &DocumentHeader,
        precision: &DecimalPrecision,
    ) -> Result<DocumentLine, DocumentError> {
        let taxed = DocumentLine {
            gst_id,
            gst_percentage: Some(precision.round(gst_percentage, PrecisionCategory::Percentage)),
            ..line.clone()
        };
        Self::recalculate_with_header(&taxed, header, precision)
    }
}

fn mul(a: Decimal, b: Decimal, item_no: u32) -> Result<Decimal, DocumentError> {
    a.checked_mul(b).ok_or(DocumentError::LineOverflow(item_no))
}
