//! Header aggregator.
//!
//! Header totals are derived state: round-then-sum over already-rounded line
//! values, so no hidden cents appear between the lines and the header.

use rust_decimal::Decimal;
use tally_shared::{DecimalPrecision, PrecisionCategory};

use super::line::LineCalculator;
use crate::document::{
    Document, DocumentError, DocumentHeader, DocumentLine, HeaderTotals, RateField,
};
use crate::precision::PrecisionRound;

/// Sums recalculated lines into header totals.
pub struct HeaderAggregator;

impl HeaderAggregator {
    /// Run the line calculator over every line with the same rates.
    ///
    /// Lines are neither reordered nor dropped; `item_no` is preserved.
    pub fn recalculate_all_lines(
        lines: &[DocumentLine],
        exchange_rate: Decimal,
        city_exchange_rate: Decimal,
        precision: &DecimalPrecision,
        has_city_currency: bool,
    ) -> Result<Vec<DocumentLine>, DocumentError> {
        lines
            .iter()
            .map(|line| {
                LineCalculator::recalculate(
                    line,
                    exchange_rate,
                    city_exchange_rate,
                    precision,
                    has_city_currency,
                )
            })
            .collect()
    }

    /// Sum line amounts into header totals.
    ///
    /// Each total is the sum of the line values, rounded again at its
    /// category's places. Derived line values are already rounded; `tot_amt`
    /// is summed as entered. Grand totals add tax to the pre-tax
    /// total and round once more. An empty list yields all-zero totals.
    pub fn aggregate_header_totals(
        lines: &[DocumentLine],
        precision: &DecimalPrecision,
    ) -> Result<HeaderTotals, DocumentError> {
        use PrecisionCategory::{Amount, CityAmount, LocalAmount};

        let tot_amt = sum(lines, precision, Amount, "totAmt", |l| {
            l.tot_amt.unwrap_or_default()
        })?;
        let tot_local_amt = sum(lines, precision, LocalAmount, "totLocalAmt", |l| {
            l.tot_local_amt
        })?;
        let tot_cty_amt = sum(lines, precision, CityAmount, "totCtyAmt", |l| l.tot_cty_amt)?;
        let gst_amt = sum(lines, precision, Amount, "gstAmt", |l| l.gst_amt)?;
        let gst_local_amt = sum(lines, precision, LocalAmount, "gstLocalAmt", |l| {
            l.gst_local_amt
        })?;
        let gst_cty_amt = sum(lines, precision, CityAmount, "gstCtyAmt", |l| l.gst_cty_amt)?;

        Ok(HeaderTotals {
            tot_amt,
            tot_local_amt,
            tot_cty_amt,
            gst_amt,
            gst_local_amt,
            gst_cty_amt,
            tot_amt_aft_gst: add(tot_amt, gst_amt, precision, Amount, "totAmtAftGst")?,
            tot_local_amt_aft_gst: add(
                tot_local_amt,
                gst_local_amt,
                precision,
                LocalAmount,
                "totLocalAmtAftGst",
            )?,
            tot_cty_amt_aft_gst: add(
                tot_cty_amt,
                gst_cty_amt,
                precision,
                CityAmount,
                "totCtyAmtAftGst",
            )?,
        })
    }

    /// Resolve the city exchange rate.
    ///
    /// Without a city currency the city rate tracks the primary rate.
    /// With one, the two rates are edited independently and the previous
    /// city rate is kept.
    #[must_use]
    pub const fn sync_city_exchange_rate(
        current_exchange_rate: Decimal,
        has_city_currency: bool,
        previous_city_exchange_rate: Decimal,
    ) -> Decimal {
        if has_city_currency {
            previous_city_exchange_rate
        } else {
            current_exchange_rate
        }
    }

    /// Recalculate a whole document from its header rates.
    ///
    /// Rates are rounded at exchange rate places and the city rate synced,
    /// amounts are derived from quantity x price where both are present,
    /// then every line is recalculated and the totals re-aggregated.
    /// Running this on its own output yields the same document.
    pub fn recalculate_document(
        document: Document,
        precision: &DecimalPrecision,
    ) -> Result<Document, DocumentError> {
        let Document { mut header, lines } = document;

        header.exh_rate = checked_rate(RateField::ExhRate, header.exh_rate, precision)?;
        header.cty_exh_rate = Self::sync_city_exchange_rate(
            header.exh_rate,
            header.has_city_currency,
            checked_rate(RateField::CtyExhRate, header.cty_exh_rate, precision)?,
        );

        let lines = lines
            .iter()
            .map(|line| recalculate_line(line, &header, precision))
            .collect::<Result<Vec<_>, _>>()?;
        header.totals = Self::aggregate_header_totals(&lines, precision)?;

        Ok(Document { header, lines })
    }
}

/// Derive the amount from quantity x price, then recalculate at the header rates.
pub(crate) fn recalculate_line(
    line: &DocumentLine,
    header: &DocumentHeader,
    precision: &DecimalPrecision,
) -> Result<DocumentLine, DocumentError> {
    let derived = LineCalculator::derive_amount(line, precision)?;
    LineCalculator::recalculate_with_header(&derived, header, precision)
}

/// Round an incoming rate at exchange rate places and reject negatives.
pub(crate) fn checked_rate(
    field: RateField,
    value: Decimal,
    precision: &DecimalPrecision,
) -> Result<Decimal, DocumentError> {
    let rounded = precision.round(value, PrecisionCategory::ExchangeRate);
    if rounded.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if rounded.is_sign_negative() {
        return Err(DocumentError::NegativeExchangeRate { field, value });
    }
    Ok(rounded)
}

fn sum(
    lines: &[DocumentLine],
    precision: &DecimalPrecision,
    category: PrecisionCategory,
    field: &'static str,
    pick: impl Fn(&DocumentLine) -> Decimal,
) -> Result<Decimal, DocumentError> {
    lines
        .iter()
        .map(pick)
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .map(|total| precision.round(total, category))
        .ok_or(DocumentError::TotalsOverflow(field))
}

fn add(
    a: Decimal,
    b: Decimal,
    precision: &DecimalPrecision,
    category: PrecisionCategory,
    field: &'static str,
) -> Result<Decimal, DocumentError> {
    a.checked_add(b)
        .map(|total| precision.round(total, category))
        .ok_or(DocumentError::TotalsOverflow(field))
}
