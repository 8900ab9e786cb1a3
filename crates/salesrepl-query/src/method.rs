//! Ledger methods and their typed arguments.
//!
//! [`MethodName`] is the closed set of callable names; [`Method::bind`] checks a
//! call's literals against the method's signature and produces a [`Method`]
//! carrying validated values, ready to be executed.

use salesrepl_core::{parse_sale_date, Money, Period, SaleId, SaleRecord, ValidationError};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ast::Literal;
use crate::error::{ArgumentError, UnknownMethod};

/// Name of a ledger method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodName {
    /// `insert()`
    Insert,
    /// `view()`
    View,
    /// `remove(id, ...)`
    Remove,
    /// `save(path)`
    Save,
    /// `to_usd()`
    ToUsd,
    /// `employee_of_the_month(month, year)`
    EmployeeOfTheMonth,
    /// `product_of_the_month(month, year)`
    ProductOfTheMonth,
    /// `month_summary(month, year)`
    MonthSummary,
    /// `_unsafe_insert(name, price, quantity, client_id, employee, date, notes)`
    UnsafeInsert,
}

impl MethodName {
    /// Every method, in help order.
    pub const ALL: [Self; 9] = [
        Self::View,
        Self::Insert,
        Self::Remove,
        Self::Save,
        Self::ToUsd,
        Self::EmployeeOfTheMonth,
        Self::ProductOfTheMonth,
        Self::MonthSummary,
        Self::UnsafeInsert,
    ];

    /// The name as written in a query.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::View => "view",
            Self::Remove => "remove",
            Self::Save => "save",
            Self::ToUsd => "to_usd",
            Self::EmployeeOfTheMonth => "employee_of_the_month",
            Self::ProductOfTheMonth => "product_of_the_month",
            Self::MonthSummary => "month_summary",
            Self::UnsafeInsert => "_unsafe_insert",
        }
    }
}

impl FromStr for MethodName {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ledger method with validated arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    /// Read a sale field by field from the line input.
    Insert,
    /// Dump every sale.
    View,
    /// Remove the listed sales, all or none.
    Remove(Vec<SaleId>),
    /// Export the ledger to a CSV file.
    Save(PathBuf),
    /// Convert every price to US dollars.
    ToUsd,
    /// Best employee by revenue.
    EmployeeOfTheMonth(Period),
    /// Most frequently sold product.
    ProductOfTheMonth(Period),
    /// Total and mean revenue.
    MonthSummary(Period),
    /// Insert a fully specified sale without prompting.
    UnsafeInsert(SaleRecord),
}

impl Method {
    /// Check `args` against the signature of `name`.
    pub fn bind(name: MethodName, args: &[Literal]) -> Result<Self, ArgumentError> {
        let method = name.as_str();
        match name {
            MethodName::Insert => exact::<0>(method, args).map(|_| Self::Insert),
            MethodName::View => exact::<0>(method, args).map(|_| Self::View),
            MethodName::ToUsd => exact::<0>(method, args).map(|_| Self::ToUsd),
            MethodName::Remove => {
                if args.is_empty() {
                    return Err(ArgumentError::Missing { method });
                }
                args.iter()
                    .enumerate()
                    .map(|(i, arg)| sale_id(method, i + 1, arg))
                    .collect::<Result<_, _>>()
                    .map(Self::Remove)
            }
            MethodName::Save => {
                let [path] = exact::<1>(method, args)?;
                Ok(Self::Save(PathBuf::from(string(method, 1, path)?)))
            }
            MethodName::EmployeeOfTheMonth => period(method, args).map(Self::EmployeeOfTheMonth),
            MethodName::ProductOfTheMonth => period(method, args).map(Self::ProductOfTheMonth),
            MethodName::MonthSummary => period(method, args).map(Self::MonthSummary),
            MethodName::UnsafeInsert => sale(method, args).map(Self::UnsafeInsert),
        }
    }

    /// The method's name.
    #[must_use]
    pub const fn name(&self) -> MethodName {
        match self {
            Self::Insert => MethodName::Insert,
            Self::View => MethodName::View,
            Self::Remove(_) => MethodName::Remove,
            Self::Save(_) => MethodName::Save,
            Self::ToUsd => MethodName::ToUsd,
            Self::EmployeeOfTheMonth(_) => MethodName::EmployeeOfTheMonth,
            Self::ProductOfTheMonth(_) => MethodName::ProductOfTheMonth,
            Self::MonthSummary(_) => MethodName::MonthSummary,
            Self::UnsafeInsert(_) => MethodName::UnsafeInsert,
        }
    }
}

fn exact<'a, const N: usize>(
    method: &'static str,
    args: &'a [Literal],
) -> Result<&'a [Literal; N], ArgumentError> {
    args.try_into().map_err(|_| ArgumentError::Count {
        method,
        expected: N,
        found: args.len(),
    })
}

fn type_error(
    method: &'static str,
    index: usize,
    expected: &'static str,
    found: &Literal,
) -> ArgumentError {
    ArgumentError::Type {
        method,
        index,
        expected,
        found: found.type_name(),
    }
}

fn string<'a>(
    method: &'static str,
    index: usize,
    arg: &'a Literal,
) -> Result<&'a str, ArgumentError> {
    match arg {
        Literal::String(s) => Ok(s),
        other => Err(type_error(method, index, "a string", other)),
    }
}

fn integer(method: &'static str, index: usize, arg: &Literal) -> Result<i64, ArgumentError> {
    match arg {
        Literal::Integer(i) => Ok(*i),
        other => Err(type_error(method, index, "an integer", other)),
    }
}

fn number(method: &'static str, index: usize, arg: &Literal) -> Result<f64, ArgumentError> {
    match arg {
        Literal::Integer(i) => Ok(*i as f64),
        Literal::Float(x) => Ok(*x),
        other @ Literal::String(_) => Err(type_error(method, index, "a number", other)),
    }
}

fn sale_id(method: &'static str, index: usize, arg: &Literal) -> Result<SaleId, ArgumentError> {
    let raw = integer(method, index, arg)?;
    u64::try_from(raw)
        .ok()
        .filter(|id| *id > 0)
        .map(SaleId::new)
        .ok_or(ArgumentError::Value {
            method,
            source: ValidationError::InvalidId(raw),
        })
}

fn period(method: &'static str, args: &[Literal]) -> Result<Period, ArgumentError> {
    let [month, year] = exact::<2>(method, args)?;
    let month = integer(method, 1, month)?;
    let year = integer(method, 2, year)?;
    Period::new(month, year).map_err(|source| ArgumentError::Value { method, source })
}

fn sale(method: &'static str, args: &[Literal]) -> Result<SaleRecord, ArgumentError> {
    let [product, price, quantity, client, employee, date, notes] = exact::<7>(method, args)?;
    let product_name = string(method, 1, product)?.to_string();
    let price = Money::Brl(number(method, 2, price)?);
    let quantity = integer(method, 3, quantity)?;
    let client_id = integer(method, 4, client)?;
    let employee_name = string(method, 5, employee)?.to_string();
    let date = parse_sale_date(string(method, 6, date)?)
        .map_err(|source| ArgumentError::Value { method, source })?;
    let notes = string(method, 7, notes)?.to_string();
    Ok(SaleRecord {
        product_name,
        price,
        quantity,
        client_id,
        employee_name,
        date,
        notes,
    })
}
