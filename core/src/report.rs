//! Report assembly — everything one render pass of the dashboard needs,
//! in a single serializable bundle.
//!
//! The rendering layer (charts, layout, HTML) consumes this as plain
//! structured data. Aggregates are memoized through the caller-supplied
//! cache, so rebuilding the report for the same filter selection reuses
//! prior results.

use crate::cache::{AggregateCache, CacheKey};
use crate::churn_reason::{churn_reason_breakdown, ChurnReasonRow};
use crate::dataset::CustomerTable;
use crate::demographics::{
    AgeHistogram, ContractInternetRow, DemographicSlice, MarriedSplit,
};
use crate::error::ChurnResult;
use crate::record::{CustomerRecord, CustomerStatus, Gender};
use crate::revenue::revenue_by_status;
use crate::status::{status_counts, StatusSummary};
use crate::types::Cents;
use serde::{Deserialize, Serialize};

/// One wedge of the overview pie: a status, its distinct customer count
/// and its share of all customers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusShare {
    pub status: CustomerStatus,
    pub customers: u64,
    pub share_pct: f64,
}

/// One line of the revenue impact panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueLine {
    pub status: CustomerStatus,
    pub raw_cents: Cents,
    pub raw_dollars: f64,
    pub millions: f64,
    pub millions_label: String,
}

/// One gender column of the demographics section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderBlock {
    pub gender: Gender,
    pub customer_count: u64,
    pub selection_caption: String,
    pub age_histogram: AgeHistogram,
    pub married_split: MarriedSplit,
    pub contract_internet: Vec<ContractInternetRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub total_rows: usize,
    pub total_columns: usize,
    pub distinct_customers: u64,
    pub status_summary: StatusSummary,
    pub status_shares: Vec<StatusShare>,
    pub churn_reasons: Vec<ChurnReasonRow>,
    pub revenue: Vec<RevenueLine>,
    pub selected_statuses: Vec<CustomerStatus>,
    pub demographics: Vec<GenderBlock>,
}

impl DashboardReport {
    /// Compute every aggregate for one render pass.
    ///
    /// `statuses` is the demographic filter selection; the overview,
    /// churn reason and revenue sections always cover the full table.
    /// Fails with `MissingCategory` when a headline status is absent
    /// from the data — a data-quality problem the caller should surface
    /// as a warning.
    pub fn build(
        table: &CustomerTable,
        statuses: &[CustomerStatus],
        cache: &mut AggregateCache,
    ) -> ChurnResult<Self> {
        let counts = cache.get_or_compute(CacheKey::of("status_counts", &())?, || {
            Ok(status_counts(table))
        })?;
        let status_summary = counts.summary()?;

        let total = counts.total();
        let status_shares = counts
            .iter()
            .map(|(status, customers)| StatusShare {
                status,
                customers,
                share_pct: if total > 0 {
                    customers as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        let churn_reasons = cache
            .get_or_compute(CacheKey::of("churn_reason_breakdown", &())?, || {
                churn_reason_breakdown(table)
            })?;

        let revenue_totals = cache.get_or_compute(CacheKey::of("revenue_by_status", &())?, || {
            Ok(revenue_by_status(table))
        })?;
        let mut revenue = Vec::new();
        for (status, raw_cents) in revenue_totals.iter() {
            revenue.push(RevenueLine {
                status,
                raw_cents,
                raw_dollars: raw_cents as f64 / 100.0,
                millions: revenue_totals.millions_for(status)?,
                millions_label: revenue_totals.millions_label(status)?,
            });
        }

        let slice = DemographicSlice::new(table, statuses);
        log::info!(
            "render pass: {} of {} rows selected ({})",
            slice.len(),
            table.len(),
            slice.selection_caption(),
        );

        let mut demographics = Vec::with_capacity(Gender::ALL.len());
        for gender in Gender::ALL {
            let block = cache.get_or_compute(
                CacheKey::of("gender_block", &(statuses, gender))?,
                || {
                    Ok(GenderBlock {
                        gender,
                        customer_count: slice.count_by_gender().count_of(gender),
                        selection_caption: slice.selection_caption(),
                        age_histogram: slice.age_histogram(gender),
                        married_split: slice.married_split(gender),
                        contract_internet: slice.contract_internet_breakdown(gender),
                    })
                },
            )?;
            demographics.push(block);
        }

        Ok(Self {
            total_rows: table.len(),
            total_columns: CustomerRecord::COLUMN_COUNT,
            distinct_customers: table.distinct_customers(),
            status_summary,
            status_shares,
            churn_reasons,
            revenue,
            selected_statuses: statuses.to_vec(),
            demographics,
        })
    }
}
