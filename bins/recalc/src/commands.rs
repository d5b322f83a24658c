//! Runs one engine operation over a document.

use anyhow::{Context, Result, bail};
use tally_core::document::validate_lines;
use tally_core::{DecimalPrecision, Document, HeaderAggregator, RateChange};
use tracing::info;

use crate::cli::Command;

/// Run `command` against `document` and return the resulting document.
pub fn run(command: &Command, document: Document, precision: &DecimalPrecision) -> Result<Document> {
    let has_city_currency = document.header.has_city_currency;

    let document = match command {
        Command::Recalc { .. } => HeaderAggregator::recalculate_document(document, precision)?,
        Command::Rate {
            field,
            previous,
            value,
            ..
        } => {
            let change = RateChange::new((*field).into(), *previous, *value);
            let outcome = HeaderAggregator::recalculate_on_rate_change(
                document,
                change,
                precision,
                has_city_currency,
            )?;
            info!(recalculated = outcome.recalculated, "Rate change applied");
            outcome.document
        }
        Command::Currency {
            exh_rate,
            cty_exh_rate,
            ..
        } => {
            let outcome = HeaderAggregator::recalculate_on_currency_change(
                document,
                *exh_rate,
                *cty_exh_rate,
                precision,
                has_city_currency,
            )?;
            info!(recalculated = outcome.recalculated, "Currency change applied");
            outcome.document
        }
        Command::Remove { item_no, .. } => {
            HeaderAggregator::recalculate_on_line_removed(document, *item_no, precision)
                .with_context(|| format!("Failed to remove line {item_no}"))?
        }
        Command::Validate { .. } => {
            validate(&document, precision)?;
            info!(lines = document.lines.len(), "Document is consistent");
            document
        }
    };

    Ok(document)
}

/// Check item numbers and that a full recalculation would change nothing.
fn validate(document: &Document, precision: &DecimalPrecision) -> Result<()> {
    validate_lines(&document.lines)?;

    let expected = HeaderAggregator::recalculate_document(document.clone(), precision)?;
    if expected.header.totals != document.header.totals {
        bail!(
            "Stale header totals: expected {:?}, found {:?}",
            expected.header.totals,
            document.header.totals
        );
    }
    if let Some((line, _)) = document
        .lines
        .iter()
        .zip(&expected.lines)
        .find(|(actual, expected)| actual != expected)
    {
        bail!("Stale amounts on line {}", line.item_no);
    }
    Ok(())
}
