//! Revenue aggregator — lifetime revenue summed per customer status,
//! with the millions-scaled display value the impact panel shows.
//!
//! Sums are exact (fixed-point cents). The only rounding is the
//! documented one: the millions figure is `raw_dollars / 1e6` rounded to
//! two decimal places, half-to-even, computed in integer arithmetic.

use crate::dataset::CustomerTable;
use crate::error::{ChurnError, ChurnResult};
use crate::record::CustomerStatus;
use crate::types::Cents;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueByStatus {
    totals: BTreeMap<CustomerStatus, Cents>,
}

impl RevenueByStatus {
    /// Exact summed revenue (cents) for `status`; `MissingCategory` if
    /// the status never appears in the data.
    pub fn raw_for(&self, status: CustomerStatus) -> ChurnResult<Cents> {
        self.totals
            .get(&status)
            .copied()
            .ok_or_else(|| ChurnError::MissingCategory {
                kind: "customer status",
                key: status.to_string(),
            })
    }

    /// Revenue in millions of dollars, rounded to two decimals.
    pub fn millions_for(&self, status: CustomerStatus) -> ChurnResult<f64> {
        Ok(self.millions_hundredths(status)? as f64 / 100.0)
    }

    /// Display form of the millions figure: "1.0", "0.25", "1.05".
    /// Trailing zero in the second decimal place is dropped, matching
    /// how the dashboard prints the number.
    pub fn millions_label(&self, status: CustomerStatus) -> ChurnResult<String> {
        let hundredths = self.millions_hundredths(status)?;
        let whole = hundredths / 100;
        let frac = hundredths % 100;
        Ok(if frac % 10 == 0 {
            format!("{whole}.{}", frac / 10)
        } else {
            format!("{whole}.{frac:02}")
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (CustomerStatus, Cents)> + '_ {
        self.totals.iter().map(|(&s, &c)| (s, c))
    }

    // dollars / 1e6 to two decimals == cents / 1e6 as an integer count
    // of hundredths of a million.
    fn millions_hundredths(&self, status: CustomerStatus) -> ChurnResult<i64> {
        Ok(round_half_even_div(self.raw_for(status)?, 1_000_000))
    }
}

/// Group the table by status, summing `total_revenue` exactly.
pub fn revenue_by_status(table: &CustomerTable) -> RevenueByStatus {
    let mut totals: BTreeMap<CustomerStatus, Cents> = BTreeMap::new();
    for record in table.records() {
        *totals.entry(record.customer_status).or_default() += record.total_revenue;
    }
    RevenueByStatus { totals }
}

/// `n / d` rounded half-to-even. `n` is non-negative, `d` positive.
fn round_half_even_div(n: i64, d: i64) -> i64 {
    let quotient = n / d;
    let remainder = n % d;
    match (remainder * 2).cmp(&d) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => {
            if quotient % 2 == 0 {
                quotient
            } else {
                quotient + 1
            }
        }
    }
}
