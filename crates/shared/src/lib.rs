//! Shared types, errors, and configuration for Tally.
//!
//! This crate provides the pieces every other crate agrees on:
//! - Decimal precision settings per semantic category
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LogConfig};
pub use error::{AppError, AppResult};
pub use types::{DecimalPrecision, PrecisionCategory, RoundingMode};
