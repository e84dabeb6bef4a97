//! Status aggregator — distinct customer counts per lifecycle status.
//!
//! Feeds the overview pie chart and the three headline scalars. Lookups
//! are by key: a status absent from the data is a data-quality error
//! (`MissingCategory`), never a positional-index panic.

use crate::dataset::CustomerTable;
use crate::error::{ChurnError, ChurnResult};
use crate::record::CustomerStatus;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Distinct customer count per status.
///
/// Invariant: the counts sum to the table's distinct customer total
/// (every record carries exactly one status).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    counts: BTreeMap<CustomerStatus, u64>,
}

/// The three headline scalars the overview panel prints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusSummary {
    pub churned: u64,
    pub stayed: u64,
    pub joined: u64,
}

impl StatusCount {
    /// Count for `status`, failing with `MissingCategory` if the status
    /// never appears in the data.
    pub fn count_of(&self, status: CustomerStatus) -> ChurnResult<u64> {
        self.counts
            .get(&status)
            .copied()
            .ok_or_else(|| ChurnError::MissingCategory {
                kind: "customer status",
                key: status.to_string(),
            })
    }

    pub fn get(&self, status: CustomerStatus) -> Option<u64> {
        self.counts.get(&status).copied()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CustomerStatus, u64)> + '_ {
        self.counts.iter().map(|(&s, &n)| (s, n))
    }

    pub fn summary(&self) -> ChurnResult<StatusSummary> {
        Ok(StatusSummary {
            churned: self.count_of(CustomerStatus::Churned)?,
            stayed: self.count_of(CustomerStatus::Stayed)?,
            joined: self.count_of(CustomerStatus::Joined)?,
        })
    }
}

/// Group the table by status, counting distinct customer ids per group.
/// Deterministic and order-independent: same rows, any order, same result.
pub fn status_counts(table: &CustomerTable) -> StatusCount {
    let mut ids: BTreeMap<CustomerStatus, HashSet<&str>> = BTreeMap::new();
    for record in table.records() {
        ids.entry(record.customer_status)
            .or_default()
            .insert(record.customer_id.as_str());
    }

    let counts = ids
        .into_iter()
        .map(|(status, set)| (status, set.len() as u64))
        .collect();

    StatusCount { counts }
}
