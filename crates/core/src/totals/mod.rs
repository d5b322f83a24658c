//! Document totals: line calculator, header aggregator, and edit triggers.
//!
//! Control flow for every edit: the host passes the whole document, the
//! aggregator runs the line calculator over each line, sums the results
//! into header totals, and hands back a new document.

pub mod header;
pub mod line;
pub mod triggers;

#[cfg(test)]
mod props;

pub use header::HeaderAggregator;
pub use line::LineCalculator;
pub use triggers::RecalcOutcome;
