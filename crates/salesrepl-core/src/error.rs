//! Error types for ledger values and operations.

use thiserror::Error;

use crate::ledger::SaleId;

/// A well-formed value that is not acceptable for a sale or a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Month outside of 1..=12.
    #[error("invalid month: {0}")]
    InvalidMonth(i64),
    /// Year that does not fit a calendar date.
    #[error("invalid year: {0}")]
    InvalidYear(i64),
    /// Sale identifier that cannot exist.
    #[error("invalid sale id: {0}")]
    InvalidId(i64),
    /// Date text that is not `dd/mm/yyyy` or `dd-mm-yyyy`, or names a day that does not exist.
    #[error("invalid date {0:?}, expected dd/mm/yyyy or dd-mm-yyyy")]
    InvalidDate(String),
    /// Field text that could not be read as the expected type.
    #[error("invalid {field} {value:?}, expected {expected}")]
    InvalidField {
        /// Name of the sale field.
        field: &'static str,
        /// The rejected input.
        value: String,
        /// Human readable description of the accepted type.
        expected: &'static str,
    },
}

/// Error returned by a ledger mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The identifier is not present (or was listed twice in one removal).
    #[error("no sale with id {0}")]
    NotFound(SaleId),
}
