//! Edit triggers.
//!
//! Each trigger matches one user action in the host (blur on a rate field,
//! currency or customer change, line edit, line added or removed). The
//! engine keeps no state: dirty checks compare values the caller passes in.

use rust_decimal::Decimal;
use tally_shared::{DecimalPrecision, PrecisionCategory};
use tracing::debug;

use super::header::{HeaderAggregator, checked_rate, recalculate_line};
use crate::document::{
    Document, DocumentError, DocumentHeader, DocumentLine, RateChange, RateField, remove_line,
};
use crate::precision::PrecisionRound;

/// Result of a dirty-checked trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecalcOutcome {
    /// The document after the trigger; the input itself when nothing changed.
    pub document: Document,
    /// Whether any recalculation ran.
    pub recalculated: bool,
}

impl RecalcOutcome {
    const fn unchanged(document: Document) -> Self {
        Self {
            document,
            recalculated: false,
        }
    }

    const fn changed(document: Document) -> Self {
        Self {
            document,
            recalculated: true,
        }
    }
}

impl HeaderAggregator {
    /// Apply an exchange rate edit.
    ///
    /// When the new value (rounded at exchange rate places) equals the
    /// value captured on focus, the document comes back untouched.
    /// Otherwise the header rate is replaced, both rates rounded at exchange
    /// rate places, the city rate synced, every line recalculated (amounts
    /// derived from quantity x price first) and the totals re-aggregated.
    /// With no lines the totals come back as zero.
    pub fn recalculate_on_rate_change(
        document: Document,
        change: RateChange,
        precision: &DecimalPrecision,
        has_city_currency: bool,
    ) -> Result<RecalcOutcome, DocumentError> {
        ensure_city_flag(&document.header, has_city_currency)?;

        let value = checked_rate(change.field, change.value, precision)?;
        let previous = precision.round(change.previous, PrecisionCategory::ExchangeRate);
        if value == previous {
            debug!(field = %change.field, %value, "Rate unchanged, skipping recalculation");
            return Ok(RecalcOutcome::unchanged(document));
        }

        debug!(
            field = %change.field,
            %previous,
            %value,
            lines = document.lines.len(),
            "Exchange rate changed"
        );

        let Document { mut header, lines } = document;
        match change.field {
            RateField::ExhRate => header.exh_rate = value,
            RateField::CtyExhRate => header.cty_exh_rate = value,
        }
        header.exh_rate = checked_rate(RateField::ExhRate, header.exh_rate, precision)?;
        header.cty_exh_rate = Self::sync_city_exchange_rate(
            header.exh_rate,
            has_city_currency,
            checked_rate(RateField::CtyExhRate, header.cty_exh_rate, precision)?,
        );

        refresh(header, &lines, precision)
    }

    /// Apply new rates after a currency or customer change.
    ///
    /// Both rates are replaced at once. The document comes back untouched
    /// when the resolved rates equal the ones on the header.
    pub fn recalculate_on_currency_change(
        document: Document,
        exchange_rate: Decimal,
        city_exchange_rate: Decimal,
        precision: &DecimalPrecision,
        has_city_currency: bool,
    ) -> Result<RecalcOutcome, DocumentError> {
        ensure_city_flag(&document.header, has_city_currency)?;

        let exh_rate = checked_rate(RateField::ExhRate, exchange_rate, precision)?;
        let cty_exh_rate = Self::sync_city_exchange_rate(
            exh_rate,
            has_city_currency,
            checked_rate(RateField::CtyExhRate, city_exchange_rate, precision)?,
        );

        let header = document.header;
        if header.exh_rate == exh_rate && header.cty_exh_rate == cty_exh_rate {
            debug!(%exh_rate, %cty_exh_rate, "Rates unchanged, skipping recalculation");
            return Ok(RecalcOutcome::unchanged(document));
        }

        debug!(
            %exh_rate,
            %cty_exh_rate,
            lines = document.lines.len(),
            "Currency rates changed"
        );

        let Document { mut header, lines } = document;
        header.exh_rate = exh_rate;
        header.cty_exh_rate = cty_exh_rate;

        refresh(header, &lines, precision)
    }

    /// Apply an edit to one line.
    ///
    /// The line replaces the one with the same `item_no`. Its amount is
    /// derived from quantity x price when both are set, then it is
    /// recalculated at the header rates and the totals re-aggregated.
    /// Edits that leave every input field as it was change nothing.
    pub fn recalculate_on_line_change(
        document: Document,
        line: DocumentLine,
        precision: &DecimalPrecision,
    ) -> Result<RecalcOutcome, DocumentError> {
        let index = document
            .lines
            .iter()
            .position(|existing| existing.item_no == line.item_no)
            .ok_or(DocumentError::LineNotFound(line.item_no))?;

        if document.lines[index].same_inputs(&line) {
            debug!(item_no = line.item_no, "Line unchanged, skipping recalculation");
            return Ok(RecalcOutcome::unchanged(document));
        }

        debug!(item_no = line.item_no, "Line changed");

        let Document { mut header, mut lines } = document;
        lines[index] = recalculate_line(&line, &header, precision)?;
        header.totals = Self::aggregate_header_totals(&lines, precision)?;

        Ok(RecalcOutcome::changed(Document { header, lines }))
    }

    /// Append a line as the next `item_no` and re-aggregate.
    pub fn recalculate_on_line_added(
        document: Document,
        line: DocumentLine,
        precision: &DecimalPrecision,
    ) -> Result<Document, DocumentError> {
        let Document { mut header, mut lines } = document;
        let item_no = u32::try_from(lines.len())
            .ok()
            .and_then(|count| count.checked_add(1))
            .ok_or(DocumentError::TotalsOverflow("itemNo"))?;

        debug!(item_no, "Line added");

        let line = DocumentLine { item_no, ..line };
        lines.push(recalculate_line(&line, &header, precision)?);
        header.totals = Self::aggregate_header_totals(&lines, precision)?;

        Ok(Document { header, lines })
    }

    /// Remove a line, renumber the rest, and re-aggregate.
    pub fn recalculate_on_line_removed(
        document: Document,
        item_no: u32,
        precision: &DecimalPrecision,
    ) -> Result<Document, DocumentError> {
        let Document { mut header, lines } = document;
        let lines = remove_line(lines, item_no)?;

        debug!(item_no, remaining = lines.len(), "Line removed");

        header.totals = Self::aggregate_header_totals(&lines, precision)?;
        Ok(Document { header, lines })
    }
}

fn ensure_city_flag(header: &DocumentHeader, requested: bool) -> Result<(), DocumentError> {
    if header.has_city_currency != requested {
        return Err(DocumentError::CityCurrencyMismatch {
            header: header.has_city_currency,
            requested,
        });
    }
    Ok(())
}

/// Recalculate every line at the header rates and re-aggregate.
fn refresh(
    mut header: DocumentHeader,
    lines: &[DocumentLine],
    precision: &DecimalPrecision,
) -> Result<RecalcOutcome, DocumentError> {
    if lines.is_empty() {
        debug!("No lines, totals reset");
    }

    let lines = lines
        .iter()
        .map(|line| recalculate_line(line, &header, precision))
        .collect::<Result<Vec<_>, _>>()?;
    header.totals = HeaderAggregator::aggregate_header_totals(&lines, precision)?;

    Ok(RecalcOutcome::changed(Document { header, lines }))
}
