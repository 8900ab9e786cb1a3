//! Currency-tagged amounts.
//!
//! A [`Money`] value holds a magnitude in either Brazilian reais or US dollars.
//! Conversion between the two uses the fixed [`USD_TO_BRL_RATE`] and always
//! produces a new value; converting to the currency already held is a no-op.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of reais per US dollar.
pub const USD_TO_BRL_RATE: f64 = 5.0;

/// The currencies a [`Money`] value can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    /// Brazilian real, the default currency of new sales.
    Brl,
    /// US dollar.
    Usd,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brl => write!(f, "BRL"),
            Self::Usd => write!(f, "USD"),
        }
    }
}

/// An amount of money in a specific currency.
///
/// # Examples
///
/// ```
/// use salesrepl_core::{Currency, Money};
///
/// let price = Money::Brl(10.0);
/// assert_eq!(price.to_usd(), Money::Usd(2.0));
/// assert_eq!(price.to_usd().to_usd(), Money::Usd(2.0));
/// assert_eq!(price.convert(Currency::Brl), price);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Money {
    /// Amount in Brazilian reais.
    #[serde(rename = "BRL")]
    Brl(f64),
    /// Amount in US dollars.
    #[serde(rename = "USD")]
    Usd(f64),
}

impl Money {
    /// The bare magnitude, regardless of currency.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Brl(v) | Self::Usd(v) => v,
        }
    }

    /// The currency this amount is expressed in.
    #[must_use]
    pub const fn currency(self) -> Currency {
        match self {
            Self::Brl(_) => Currency::Brl,
            Self::Usd(_) => Currency::Usd,
        }
    }

    /// Express this amount in US dollars.
    #[must_use]
    pub fn to_usd(self) -> Self {
        match self {
            Self::Brl(v) => Self::Usd(v / USD_TO_BRL_RATE),
            usd @ Self::Usd(_) => usd,
        }
    }

    /// Express this amount in reais.
    #[must_use]
    pub fn to_brl(self) -> Self {
        match self {
            Self::Usd(v) => Self::Brl(v * USD_TO_BRL_RATE),
            brl @ Self::Brl(_) => brl,
        }
    }

    /// Express this amount in `target`.
    #[must_use]
    pub fn convert(self, target: Currency) -> Self {
        match target {
            Currency::Brl => self.to_brl(),
            Currency::Usd => self.to_usd(),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value(), self.currency())
    }
}
