//! Core types for salesrepl
//!
//! This crate provides the data model shared by the query front-end and the
//! interactive session:
//!
//! - [`Money`] - An amount tagged with one of two currencies
//! - [`SaleRecord`] - A single sale, the unit of data in a ledger
//! - [`SalesDb`] - A ledger of sales keyed by monotonically assigned [`SaleId`]s
//! - [`Period`] - A validated month/year pair used by the reporting queries
//!
//! # Example
//!
//! ```
//! use salesrepl_core::{Money, Period, SaleRecord, SalesDb};
//! use chrono::NaiveDate;
//!
//! let mut db = SalesDb::new();
//! let date = NaiveDate::from_ymd_opt(1933, 5, 6).unwrap();
//! let id = db.insert(
//!     SaleRecord::new("orange", Money::Brl(4.0), date)
//!         .with_quantity(88)
//!         .with_employee("Amanda"),
//! );
//! assert_eq!(id.get(), 1);
//!
//! let may = Period::new(5, 1933).unwrap();
//! assert_eq!(db.employee_of_the_month(may), Some("Amanda"));
//! assert_eq!(db.month_summary(may).total, 352.0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod ledger;
pub mod money;
pub mod sale;

pub use error::{LedgerError, ValidationError};
pub use ledger::{MonthSummary, Period, SaleId, SalesDb};
pub use money::{Currency, Money, USD_TO_BRL_RATE};
pub use sale::{parse_sale_date, SaleRecord};

// Re-export commonly used external types
pub use chrono::NaiveDate;
