//! Document domain types.
//!
//! Field names serialize in camelCase (`totAmt`, `exhRate`, ...) so records
//! round-trip with the hosts that produce them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a financial document (invoice, receipt, debit note detail).
///
/// Input fields may be missing and count as zero. Derived fields are owned
/// by the engine and overwritten on every recalculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLine {
    /// 1-based sequence, unique and dense within the document.
    pub item_no: u32,
    /// Quantity, when the amount is derived from quantity x price.
    #[serde(default)]
    pub qty: Option<Decimal>,
    /// Unit price in transaction currency.
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    /// Line amount in transaction currency.
    #[serde(default)]
    pub tot_amt: Option<Decimal>,
    /// Tax category.
    #[serde(default)]
    pub gst_id: Option<u32>,
    /// Tax rate in percent; missing means untaxed.
    #[serde(default)]
    pub gst_percentage: Option<Decimal>,

    // ========== Derived ==========
    /// Line amount in local currency.
    #[serde(default)]
    pub tot_local_amt: Decimal,
    /// Line amount in city currency.
    #[serde(default)]
    pub tot_cty_amt: Decimal,
    /// Tax amount in transaction currency.
    #[serde(default)]
    pub gst_amt: Decimal,
    /// Tax amount in local currency.
    #[serde(default)]
    pub gst_local_amt: Decimal,
    /// Tax amount in city currency.
    #[serde(default)]
    pub gst_cty_amt: Decimal,
}

impl DocumentLine {
    /// Creates a line from an entered amount and tax rate.
    #[must_use]
    pub fn new(item_no: u32, tot_amt: Decimal, gst_percentage: Decimal) -> Self {
        Self {
            item_no,
            tot_amt: Some(tot_amt),
            gst_percentage: Some(gst_percentage),
            ..Self::default()
        }
    }

    /// Returns true if the user-editable fields of both lines match.
    ///
    /// Derived fields are ignored.
    #[must_use]
    pub fn same_inputs(&self, other: &Self) -> bool {
        self.item_no == other.item_no
            && self.qty == other.qty
            && self.unit_price == other.unit_price
            && self.tot_amt == other.tot_amt
            && self.gst_id == other.gst_id
            && self.gst_percentage == other.gst_percentage
    }
}

/// Document-level totals, derived from the lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderTotals {
    /// Sum of line amounts, transaction currency.
    #[serde(default)]
    pub tot_amt: Decimal,
    /// Sum of line amounts, local currency.
    #[serde(default)]
    pub tot_local_amt: Decimal,
    /// Sum of line amounts, city currency.
    #[serde(default)]
    pub tot_cty_amt: Decimal,
    /// Sum of tax amounts, transaction currency.
    #[serde(default)]
    pub gst_amt: Decimal,
    /// Sum of tax amounts, local currency.
    #[serde(default)]
    pub gst_local_amt: Decimal,
    /// Sum of tax amounts, city currency.
    #[serde(default)]
    pub gst_cty_amt: Decimal,
    /// Grand total, transaction currency.
    #[serde(default)]
    pub tot_amt_aft_gst: Decimal,
    /// Grand total, local currency.
    #[serde(default)]
    pub tot_local_amt_aft_gst: Decimal,
    /// Grand total, city currency.
    #[serde(default)]
    pub tot_cty_amt_aft_gst: Decimal,
}

/// Document header: rates, the city currency flag, and derived totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHeader {
    /// Transaction currency to local currency.
    pub exh_rate: Decimal,
    /// Transaction currency to city currency.
    #[serde(default)]
    pub cty_exh_rate: Decimal,
    /// Whether the company reports in a secondary city currency.
    #[serde(default)]
    pub has_city_currency: bool,
    /// Aggregated totals.
    #[serde(flatten)]
    pub totals: HeaderTotals,
}

impl DocumentHeader {
    /// Creates a header with zero totals.
    #[must_use]
    pub fn new(exh_rate: Decimal, cty_exh_rate: Decimal, has_city_currency: bool) -> Self {
        Self {
            exh_rate,
            cty_exh_rate,
            has_city_currency,
            totals: HeaderTotals::default(),
        }
    }

    /// Returns the current value of a rate field.
    #[must_use]
    pub const fn rate(&self, field: RateField) -> Decimal {
        match field {
            RateField::ExhRate => self.exh_rate,
            RateField::CtyExhRate => self.cty_exh_rate,
        }
    }
}

/// A whole document: header plus its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Header record.
    pub header: DocumentHeader,
    /// Detail lines, in `item_no` order.
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

/// Header rate a user can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RateField {
    /// `exhRate`.
    ExhRate,
    /// `ctyExhRate`.
    CtyExhRate,
}

impl std::fmt::Display for RateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExhRate => write!(f, "exhRate"),
            Self::CtyExhRate => write!(f, "ctyExhRate"),
        }
    }
}

/// A rate edit: the value captured on focus and the value on blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateChange {
    /// Edited field.
    pub field: RateField,
    /// Value when the edit started.
    pub previous: Decimal,
    /// Value when the edit ended.
    pub value: Decimal,
}

impl RateChange {
    /// Creates a rate change.
    #[must_use]
    pub const fn new(field: RateField, previous: Decimal, value: Decimal) -> Self {
        Self {
            field,
            previous,
            value,
        }
    }
}
