//! Decimal precision settings for a document session.
//!
//! CRITICAL: Every rounding in the engine reads its places from here.
//! The record is read once per session and never mutated afterwards.

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Largest scale `rust_decimal` can represent.
pub const MAX_DECIMALS: u32 = 28;

/// Semantic category of a numeric value, used to pick its decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionCategory {
    /// Transaction-currency amount.
    Amount,
    /// Local (bookkeeping) currency amount.
    LocalAmount,
    /// Secondary "city" currency amount.
    CityAmount,
    /// Exchange rate.
    ExchangeRate,
    /// Quantity.
    Quantity,
    /// Percentage (e.g. GST rate).
    Percentage,
}

/// Midpoint rule applied when rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Commercial rounding: 2.5 → 3, -2.5 → -3.
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: 2.5 → 2, 3.5 → 4.
    HalfEven,
}

impl RoundingMode {
    /// Returns the matching `rust_decimal` strategy.
    #[must_use]
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Decimal places per semantic category.
///
/// Missing fields fall back to 2 places for amounts, quantities and
/// percentages, and 6 places for exchange rates. Negative values are
/// rejected during deserialization since every field is unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalPrecision {
    /// Places for transaction-currency amounts.
    #[serde(default = "default_amount_decimals")]
    pub amount_decimals: u32,
    /// Places for local-currency amounts.
    #[serde(default = "default_amount_decimals")]
    pub local_amount_decimals: u32,
    /// Places for city-currency amounts.
    #[serde(default = "default_amount_decimals")]
    pub city_amount_decimals: u32,
    /// Places for exchange rates.
    #[serde(default = "default_exchange_rate_decimals")]
    pub exchange_rate_decimals: u32,
    /// Places for quantities.
    #[serde(default = "default_amount_decimals")]
    pub quantity_decimals: u32,
    /// Places for percentages.
    #[serde(default = "default_amount_decimals")]
    pub percentage_decimals: u32,
    /// Midpoint rule.
    #[serde(default)]
    pub rounding: RoundingMode,
}

fn default_amount_decimals() -> u32 {
    2
}

fn default_exchange_rate_decimals() -> u32 {
    6
}

impl Default for DecimalPrecision {
    fn default() -> Self {
        Self {
            amount_decimals: default_amount_decimals(),
            local_amount_decimals: default_amount_decimals(),
            city_amount_decimals: default_amount_decimals(),
            exchange_rate_decimals: default_exchange_rate_decimals(),
            quantity_decimals: default_amount_decimals(),
            percentage_decimals: default_amount_decimals(),
            rounding: RoundingMode::default(),
        }
    }
}

impl DecimalPrecision {
    /// Returns the configured places for a category.
    #[must_use]
    pub const fn places(&self, category: PrecisionCategory) -> u32 {
        match category {
            PrecisionCategory::Amount => self.amount_decimals,
            PrecisionCategory::LocalAmount => self.local_amount_decimals,
            PrecisionCategory::CityAmount => self.city_amount_decimals,
            PrecisionCategory::ExchangeRate => self.exchange_rate_decimals,
            PrecisionCategory::Quantity => self.quantity_decimals,
            PrecisionCategory::Percentage => self.percentage_decimals,
        }
    }

    /// Checks every category fits in a `Decimal` scale.
    ///
    /// Hosts call this once at load time; the engine assumes a validated record.
    pub fn validate(&self) -> AppResult<()> {
        const FIELDS: [(PrecisionCategory, &str); 6] = [
            (PrecisionCategory::Amount, "amount_decimals"),
            (PrecisionCategory::LocalAmount, "local_amount_decimals"),
            (PrecisionCategory::CityAmount, "city_amount_decimals"),
            (PrecisionCategory::ExchangeRate, "exchange_rate_decimals"),
            (PrecisionCategory::Quantity, "quantity_decimals"),
            (PrecisionCategory::Percentage, "percentage_decimals"),
        ];

        for (category, name) in FIELDS {
            let places = self.places(category);
            if places > MAX_DECIMALS {
                return Err(AppError::Validation(format!(
                    "{name} is {places}, maximum is {MAX_DECIMALS}"
                )));
            }
        }
        Ok(())
    }
}
