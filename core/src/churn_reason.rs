//! Churn reason ranker — the two-level breakdown behind the horizontal
//! bar chart of why customers left.
//!
//! The ranker:
//!   1. Groups churned rows by (category, reason), counting distinct
//!      customer ids per group
//!   2. Sums the group counts into per-category totals
//!   3. Sorts ascending by (category total, reason count) so the bar
//!      chart reads top-to-bottom from smallest to largest
//!   4. Flags the single largest reason within each category
//!   5. Renders a "{reason} ({count})" label per row

use crate::dataset::CustomerTable;
use crate::error::{ChurnError, ChurnResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnReasonRow {
    pub churn_category: String,
    pub churn_reason: String,
    pub count_in_reason: u64,
    pub count_in_category: u64,
    pub is_largest: bool,
    pub label: String,
}

/// Build the ranked breakdown from the churned subset of `table`.
///
/// Rows lacking either `churn_category` or `churn_reason` are skipped.
/// Groups form in first-encountered row order, and that order is the
/// tie-break everywhere it matters: the stable ascending sort keeps it
/// among equal-count rows, and the `is_largest` flag goes to the
/// first-encountered reason when two reasons in a category tie at the
/// maximum. The tie rule is an accepted ambiguity carried over from the
/// dashboard, not a business rule.
pub fn churn_reason_breakdown(table: &CustomerTable) -> ChurnResult<Vec<ChurnReasonRow>> {
    // Group in first-encountered order, counting distinct customers.
    let mut order: Vec<(String, String)> = Vec::new();
    let mut members: HashMap<(String, String), HashSet<&str>> = HashMap::new();

    for record in table.records() {
        let (Some(category), Some(reason)) = (&record.churn_category, &record.churn_reason)
        else {
            continue;
        };
        let key = (category.clone(), reason.clone());
        let group = members.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            HashSet::new()
        });
        group.insert(record.customer_id.as_str());
    }

    // Per-category totals over the reason counts.
    let mut category_totals: HashMap<&str, u64> = HashMap::new();
    for (category, reason) in &order {
        let n = members[&(category.clone(), reason.clone())].len() as u64;
        *category_totals.entry(category.as_str()).or_default() += n;
        log::debug!("churn group ({category}, {reason}): {n} customers");
    }

    // Largest reason per category: strict > keeps the first-encountered
    // group on ties.
    let mut largest: HashMap<&str, (&str, u64)> = HashMap::new();
    for (category, reason) in &order {
        let n = members[&(category.clone(), reason.clone())].len() as u64;
        let entry = largest.entry(category.as_str());
        match entry {
            std::collections::hash_map::Entry::Vacant(v) => {
                v.insert((reason.as_str(), n));
            }
            std::collections::hash_map::Entry::Occupied(mut o) => {
                if n > o.get().1 {
                    o.insert((reason.as_str(), n));
                }
            }
        }
    }

    let mut rows: Vec<ChurnReasonRow> = Vec::with_capacity(order.len());
    for (category, reason) in &order {
        let count_in_reason = members[&(category.clone(), reason.clone())].len() as u64;
        let count_in_category =
            *category_totals
                .get(category.as_str())
                .ok_or_else(|| ChurnError::EmptyCategory {
                    category: category.clone(),
                })?;
        let winner = largest
            .get(category.as_str())
            .ok_or_else(|| ChurnError::EmptyCategory {
                category: category.clone(),
            })?;

        rows.push(ChurnReasonRow {
            churn_category: category.clone(),
            churn_reason: reason.clone(),
            count_in_reason,
            count_in_category,
            is_largest: winner.0 == reason.as_str(),
            label: format!("{reason} ({count_in_reason})"),
        });
    }

    // Stable: equal keys keep first-encountered order.
    rows.sort_by_key(|r| (r.count_in_category, r.count_in_reason));

    Ok(rows)
}
