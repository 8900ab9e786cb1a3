//! The sales ledger.
//!
//! A [`SalesDb`] owns its [`SaleRecord`]s keyed by [`SaleId`]. Identifiers come
//! from a counter that starts at 1 and only ever moves forward, so an id freed
//! by removal is never handed out again, even when the ledger becomes empty.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::ops::AddAssign;

use crate::error::{LedgerError, ValidationError};
use crate::money::Currency;
use crate::sale::SaleRecord;

/// Identifier of a sale within one ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(u64);

impl SaleId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A calendar month, validated to lie in 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    month: u32,
    year: i32,
}

impl Period {
    /// Build a period, rejecting months outside 1..=12.
    pub fn new(month: i64, year: i64) -> Result<Self, ValidationError> {
        let month = u32::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or(ValidationError::InvalidMonth(month))?;
        let year = i32::try_from(year).map_err(|_| ValidationError::InvalidYear(year))?;
        Ok(Self { month, year })
    }

    /// Month number, 1 to 12.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Year number.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Whether `date` falls within this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Total and mean revenue of the sales in one month.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthSummary {
    /// Sum of `price * quantity` over matching sales.
    pub total: f64,
    /// `total / count`, or 0 when nothing matched.
    pub average: f64,
    /// Number of matching sales.
    pub count: usize,
}

/// A ledger of sales.
#[derive(Debug, Clone, Default)]
pub struct SalesDb {
    sales: BTreeMap<SaleId, SaleRecord>,
    next_id: u64,
}

impl SalesDb {
    /// Create an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sales: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Number of stored sales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    /// Whether the ledger holds no sales.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// The identifier the next insertion will receive.
    #[must_use]
    pub const fn next_id(&self) -> SaleId {
        SaleId(self.next_id)
    }

    /// Look up a sale.
    #[must_use]
    pub fn get(&self, id: SaleId) -> Option<&SaleRecord> {
        self.sales.get(&id)
    }

    /// Iterate over sales in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (SaleId, &SaleRecord)> {
        self.sales.iter().map(|(id, sale)| (*id, sale))
    }

    /// Store a sale and return its newly assigned identifier.
    pub fn insert(&mut self, sale: SaleRecord) -> SaleId {
        // `new()` starts at 1, `Default` starts at 0
        let id = SaleId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.sales.insert(id, sale);
        id
    }

    /// Remove every listed sale, or none of them.
    ///
    /// Fails with [`LedgerError::NotFound`] on the first identifier that is
    /// absent or repeated; the ledger is untouched in that case.
    pub fn remove(&mut self, ids: &[SaleId]) -> Result<Vec<(SaleId, SaleRecord)>, LedgerError> {
        let mut seen = HashSet::with_capacity(ids.len());
        for &id in ids {
            if !self.sales.contains_key(&id) || !seen.insert(id) {
                return Err(LedgerError::NotFound(id));
            }
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.sales.remove(id).map(|sale| (*id, sale)))
            .collect())
    }

    /// Convert every price to `currency`.
    pub fn convert_prices(&mut self, currency: Currency) {
        for sale in self.sales.values_mut() {
            sale.price = sale.price.convert(currency);
        }
    }

    /// Convert every price to US dollars.
    pub fn to_usd(&mut self) {
        self.convert_prices(Currency::Usd);
    }

    /// Render the ledger as pretty-printed JSON keyed by identifier.
    pub fn view(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.sales)
    }

    fn in_period(&self, period: Period) -> impl Iterator<Item = &SaleRecord> {
        self.sales.values().filter(move |s| period.contains(s.date))
    }

    /// Total and mean revenue of the sales made in `period`.
    #[must_use]
    pub fn month_summary(&self, period: Period) -> MonthSummary {
        let (total, count) = self
            .in_period(period)
            .fold((0.0, 0), |(total, count), sale| (total + sale.revenue(), count + 1));
        if count == 0 {
            return MonthSummary::default();
        }
        MonthSummary {
            total,
            average: total / count as f64,
            count,
        }
    }

    /// The employee with the highest revenue in `period`.
    #[must_use]
    pub fn employee_of_the_month(&self, period: Period) -> Option<&str> {
        self.leader(period, |s| &s.employee_name, SaleRecord::revenue)
    }

    /// The product sold most often in `period`.
    ///
    /// Counts sales, not units.
    #[must_use]
    pub fn product_of_the_month(&self, period: Period) -> Option<&str> {
        self.leader(period, |s| &s.product_name, |_| 1_u64)
    }

    /// Accumulate `weight` per `key` over a period and return the largest key.
    ///
    /// Ties go to the key seen first in identifier order.
    fn leader<'a, T>(
        &'a self,
        period: Period,
        key: impl Fn(&'a SaleRecord) -> &'a String,
        weight: impl Fn(&SaleRecord) -> T,
    ) -> Option<&'a str>
    where
        T: Copy + Default + PartialOrd + AddAssign,
    {
        let mut totals: Vec<(&str, T)> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();
        for sale in self.in_period(period) {
            let name = key(sale).as_str();
            let slot = *slots.entry(name).or_insert_with(|| {
                totals.push((name, T::default()));
                totals.len() - 1
            });
            totals[slot].1 += weight(sale);
        }
        totals
            .into_iter()
            .fold(None, |best: Option<(&str, T)>, (name, total)| match best {
                Some((_, top)) if top >= total => best,
                _ => Some((name, total)),
            })
            .map(|(name, _)| name)
    }
}
