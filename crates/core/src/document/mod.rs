//! Financial document records.
//!
//! This module defines:
//! - Header and line records exchanged with the host
//! - Rate change requests
//! - Line collection maintenance (numbering, removal, validation)
//! - Error types for engine misuse

pub mod error;
pub mod lines;
pub mod types;

pub use error::DocumentError;
pub use lines::{remove_line, renumber_lines, validate_lines};
pub use types::{Document, DocumentHeader, DocumentLine, HeaderTotals, RateChange, RateField};
