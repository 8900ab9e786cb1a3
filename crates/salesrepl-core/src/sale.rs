//! Sale records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

/// A single sale stored in a [`SalesDb`](crate::SalesDb).
///
/// Records are immutable once inserted, except for `price`, which bulk
/// currency conversion rewrites in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Name of the product sold
    pub product_name: String,
    /// Unit price
    pub price: Money,
    /// Number of units sold
    pub quantity: i64,
    /// Identifier of the buying client
    pub client_id: i64,
    /// Employee credited with the sale
    pub employee_name: String,
    /// Day of the sale
    pub date: NaiveDate,
    /// Free-form notes
    pub notes: String,
}

impl SaleRecord {
    /// Field names in their canonical order.
    ///
    /// This order is shared by interactive insertion, positional insertion
    /// arguments and the export header.
    pub const FIELD_NAMES: [&'static str; 7] = [
        "product_name",
        "price",
        "quantity",
        "client_id",
        "employee_name",
        "date",
        "notes",
    ];

    /// Create a sale of a single unit with no client, employee or notes.
    #[must_use]
    pub fn new(product_name: impl Into<String>, price: Money, date: NaiveDate) -> Self {
        Self {
            product_name: product_name.into(),
            price,
            quantity: 1,
            client_id: 0,
            employee_name: String::new(),
            date,
            notes: String::new(),
        }
    }

    /// Set the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the client identifier.
    #[must_use]
    pub const fn with_client(mut self, client_id: i64) -> Self {
        self.client_id = client_id;
        self
    }

    /// Set the employee.
    #[must_use]
    pub fn with_employee(mut self, employee_name: impl Into<String>) -> Self {
        self.employee_name = employee_name.into();
        self
    }

    /// Set the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Price times quantity, in the price's currency.
    #[must_use]
    pub fn revenue(&self) -> f64 {
        self.price.value() * self.quantity as f64
    }
}

/// Parse a sale date written as `dd/mm/yyyy` or `dd-mm-yyyy`.
///
/// The separators may be mixed; the day must exist in the calendar.
///
/// # Example
///
/// ```
/// use salesrepl_core::{parse_sale_date, NaiveDate};
///
/// let date = parse_sale_date("06/05/1933").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(1933, 5, 6).unwrap());
/// assert!(parse_sale_date("31/02/2020").is_err());
/// ```
pub fn parse_sale_date(text: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate(text.to_string());
    let parts: Vec<&str> = text.trim().split(['/', '-']).collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(invalid());
    };
    let day: u32 = day.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_slash_and_dash() {
        assert_eq!(parse_sale_date("18/05/1933").unwrap(), date(1933, 5, 18));
        assert_eq!(parse_sale_date("09-02-1950").unwrap(), date(1950, 2, 9));
        assert_eq!(parse_sale_date(" 1/12/2020 ").unwrap(), date(2020, 12, 1));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "1933-05", "aa/05/1933", "1/2/3/4", "32/01/2020", "29/02/2023"] {
            assert!(
                matches!(parse_sale_date(text), Err(ValidationError::InvalidDate(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_builder_and_revenue() {
        let sale = SaleRecord::new("mango", Money::Brl(6.0), date(1933, 5, 8))
            .with_quantity(10)
            .with_client(81_928_319)
            .with_employee("Bob")
            .with_notes("Stale");
        assert_eq!(sale.revenue(), 60.0);
        assert_eq!(sale.employee_name, "Bob");
        assert_eq!(sale.client_id, 81_928_319);
    }
}
