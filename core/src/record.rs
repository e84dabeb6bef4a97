//! The customer record and its categorical domains.
//!
//! Field names match the normalized CSV headers (lowercase, spaces
//! replaced with underscores) so rows deserialize directly; columns the
//! dashboard never uses (zip_code, latitude, longitude) simply have no
//! field here and are dropped on load.

use crate::error::ChurnError;
use crate::types::Cents;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a customer for the reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CustomerStatus {
    Churned,
    Stayed,
    Joined,
}

impl CustomerStatus {
    pub const ALL: [CustomerStatus; 3] = [
        CustomerStatus::Churned,
        CustomerStatus::Stayed,
        CustomerStatus::Joined,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CustomerStatus::Churned => "Churned",
            CustomerStatus::Stayed => "Stayed",
            CustomerStatus::Joined => "Joined",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = ChurnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Churned" => Ok(CustomerStatus::Churned),
            "Stayed" => Ok(CustomerStatus::Stayed),
            "Joined" => Ok(CustomerStatus::Joined),
            other => Err(ChurnError::InvalidFilter {
                reason: format!(
                    "unknown customer status '{other}' (expected Churned, Stayed or Joined)"
                ),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Married {
    Yes,
    No,
}

/// One row of the source table: one customer.
///
/// `churn_category` / `churn_reason` are only populated for churned
/// customers; `internet_type` is absent for customers without internet
/// service (normalized to "No Internet Service" at aggregation time, not
/// here — the raw record keeps what the data said).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: String,
    pub gender: Gender,
    pub age: u32,
    pub married: Married,
    pub customer_status: CustomerStatus,
    pub churn_category: Option<String>,
    pub churn_reason: Option<String>,
    #[serde(deserialize_with = "crate::types::cents_from_csv")]
    pub total_revenue: Cents,
    pub contract: String,
    pub internet_type: Option<String>,
}

impl CustomerRecord {
    /// Number of columns the model retains after the load-time drops.
    /// Reported as the dashboard's "total columns" metric.
    pub const COLUMN_COUNT: usize = 10;
}
