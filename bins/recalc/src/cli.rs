//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tally_core::RateField;

/// Recalculate multi-currency document totals.
///
/// The document is read as JSON from FILE, or from stdin when FILE is
/// omitted, and the result is written to stdout.
#[derive(Debug, Parser)]
#[command(name = "tally-recalc", version, about)]
pub struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Engine operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recalculate every line and the header totals.
    Recalc {
        /// Document file.
        file: Option<PathBuf>,
    },
    /// Apply an exchange rate edit.
    Rate {
        /// Edited rate.
        #[arg(long, value_enum)]
        field: RateArg,
        /// Value when the edit started.
        #[arg(long, allow_hyphen_values = true)]
        previous: Decimal,
        /// Value when the edit ended.
        #[arg(long, allow_hyphen_values = true)]
        value: Decimal,
        /// Document file.
        file: Option<PathBuf>,
    },
    /// Apply new rates after a currency or customer change.
    Currency {
        /// New exchange rate.
        #[arg(long, allow_hyphen_values = true)]
        exh_rate: Decimal,
        /// New city exchange rate.
        #[arg(long, allow_hyphen_values = true)]
        cty_exh_rate: Decimal,
        /// Document file.
        file: Option<PathBuf>,
    },
    /// Remove a line and renumber the rest.
    Remove {
        /// Item number of the line to remove.
        #[arg(long)]
        item_no: u32,
        /// Document file.
        file: Option<PathBuf>,
    },
    /// Check item numbers and that header totals are current.
    Validate {
        /// Document file.
        file: Option<PathBuf>,
    },
}

impl Command {
    /// Input file, if one was given.
    pub fn file(&self) -> Option<&PathBuf> {
        match self {
            Self::Recalc { file }
            | Self::Rate { file, .. }
            | Self::Currency { file, .. }
            | Self::Remove { file, .. }
            | Self::Validate { file } => file.as_ref(),
        }
    }
}

/// Rate field names on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RateArg {
    /// `exhRate`.
    ExhRate,
    /// `ctyExhRate`.
    CtyExhRate,
}

impl From<RateArg> for RateField {
    fn from(arg: RateArg) -> Self {
        match arg {
            RateArg::ExhRate => Self::ExhRate,
            RateArg::CtyExhRate => Self::CtyExhRate,
        }
    }
}
