//! Demographic slicer — gender/age/married/contract breakdowns over a
//! status-filtered subset of the table.
//!
//! The slice filters once; every operation runs against that subset.
//! An empty selection is not an error: every operation degrades to an
//! explicit zero or empty result, so the dashboard renders "no data"
//! instead of crashing on a positional lookup.

use crate::dataset::CustomerTable;
use crate::record::{CustomerRecord, CustomerStatus, Gender, Married};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Category substituted for a null `internet_type` before grouping.
pub const NO_INTERNET_SERVICE: &str = "No Internet Service";

/// The age histogram always spans the observed range with this many
/// equal-width bins.
pub const AGE_HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderCount {
    counts: BTreeMap<Gender, u64>,
}

impl GenderCount {
    /// Distinct customer count for `gender`; 0 when the gender does not
    /// appear in the filtered subset.
    pub fn count_of(&self, gender: Gender) -> u64 {
        self.counts.get(&gender).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgeBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeHistogram {
    pub bins: Vec<AgeBin>,
}

impl AgeHistogram {
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarriedSplit {
    pub yes: u64,
    pub no: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractInternetRow {
    pub contract: String,
    pub internet_type: String,
    pub count: u64,
}

pub struct DemographicSlice<'a> {
    records: Vec<&'a CustomerRecord>,
    statuses: Vec<CustomerStatus>,
}

impl<'a> DemographicSlice<'a> {
    /// Filter `table` down to the selected statuses. The table itself is
    /// untouched; the slice borrows the matching rows.
    pub fn new(table: &'a CustomerTable, statuses: &[CustomerStatus]) -> Self {
        let records = table
            .records()
            .iter()
            .filter(|r| statuses.contains(&r.customer_status))
            .collect();
        Self {
            records,
            statuses: statuses.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The caption printed under each gender count, e.g. "Stayed, Joined".
    pub fn selection_caption(&self) -> String {
        self.statuses
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Distinct customer count per gender over the filtered subset.
    pub fn count_by_gender(&self) -> GenderCount {
        let mut ids: BTreeMap<Gender, HashSet<&str>> = BTreeMap::new();
        for record in &self.records {
            ids.entry(record.gender)
                .or_default()
                .insert(record.customer_id.as_str());
        }
        GenderCount {
            counts: ids
                .into_iter()
                .map(|(g, set)| (g, set.len() as u64))
                .collect(),
        }
    }

    /// Ten equal-width bins over the observed age range for `gender`,
    /// both ends inclusive. No matching rows yields no bins; a single
    /// observed age yields a zero-width range with everything counted in
    /// the first bin.
    pub fn age_histogram(&self, gender: Gender) -> AgeHistogram {
        let ages: Vec<u32> = self
            .records
            .iter()
            .filter(|r| r.gender == gender)
            .map(|r| r.age)
            .collect();

        let (Some(&min), Some(&max)) = (ages.iter().min(), ages.iter().max()) else {
            return AgeHistogram { bins: Vec::new() };
        };

        let lo = f64::from(min);
        let width = (f64::from(max) - lo) / AGE_HISTOGRAM_BINS as f64;

        let mut counts = [0u64; AGE_HISTOGRAM_BINS];
        for age in &ages {
            let index = if width > 0.0 {
                (((f64::from(*age) - lo) / width) as usize).min(AGE_HISTOGRAM_BINS - 1)
            } else {
                0
            };
            counts[index] += 1;
        }

        let bins = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| AgeBin {
                lower: lo + i as f64 * width,
                upper: lo + (i + 1) as f64 * width,
                count,
            })
            .collect();

        AgeHistogram { bins }
    }

    /// Distinct yes/no married counts for `gender`; both zero when the
    /// subset has no matching rows.
    pub fn married_split(&self, gender: Gender) -> MarriedSplit {
        let mut yes: HashSet<&str> = HashSet::new();
        let mut no: HashSet<&str> = HashSet::new();
        for record in self.records.iter().filter(|r| r.gender == gender) {
            match record.married {
                Married::Yes => yes.insert(record.customer_id.as_str()),
                Married::No => no.insert(record.customer_id.as_str()),
            };
        }
        MarriedSplit {
            yes: yes.len() as u64,
            no: no.len() as u64,
        }
    }

    /// Distinct customer counts per (contract, internet_type) pair for
    /// `gender`, with null internet normalized to "No Internet Service"
    /// before grouping. Rows come back in key order for deterministic
    /// output.
    pub fn contract_internet_breakdown(&self, gender: Gender) -> Vec<ContractInternetRow> {
        let mut groups: BTreeMap<(&str, &str), HashSet<&str>> = BTreeMap::new();
        for record in self.records.iter().filter(|r| r.gender == gender) {
            let internet = record
                .internet_type
                .as_deref()
                .unwrap_or(NO_INTERNET_SERVICE);
            groups
                .entry((record.contract.as_str(), internet))
                .or_default()
                .insert(record.customer_id.as_str());
        }

        groups
            .into_iter()
            .map(|((contract, internet_type), ids)| ContractInternetRow {
                contract: contract.to_string(),
                internet_type: internet_type.to_string(),
                count: ids.len() as u64,
            })
            .collect()
    }
}
