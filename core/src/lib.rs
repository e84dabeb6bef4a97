//! Churn Desk core — the aggregation layer behind the telco churn dashboard.
//!
//! Turns an in-memory table of customer records into the exact shapes the
//! dashboard renders: status counts, ranked churn reasons, revenue impact
//! by status and per-gender demographic breakdowns over a status-filtered
//! subset. Rendering, layout and colors live elsewhere; this crate only
//! produces structured data.
//!
//! RULE: aggregation functions never mutate the input table. Every result
//! is a freshly derived summary, and every per-category lookup goes
//! through a key (with an explicit error or zero default on absence),
//! never a positional index into an ordered result.

pub mod cache;
pub mod churn_reason;
pub mod dataset;
pub mod demographics;
pub mod error;
pub mod record;
pub mod report;
pub mod revenue;
pub mod status;
pub mod types;
