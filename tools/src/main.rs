//! churn-report: headless report generator for the churn dashboard.
//!
//! Loads the customer CSV, computes every aggregate the dashboard
//! renders and prints the bundle as JSON on stdout.
//!
//! Usage:
//!   churn-report --data telecom_customer_churn.csv
//!   churn-report --data churn.csv --status Stayed,Joined --pretty

use anyhow::{Context, Result};
use churn_desk_core::{
    cache::AggregateCache, dataset::CustomerTable, record::CustomerStatus,
    report::DashboardReport,
};
use std::env;
use std::path::Path;
use std::str::FromStr;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data = args
        .windows(2)
        .find(|w| w[0] == "--data")
        .map(|w| w[1].clone())
        .context("--data <csv path> is required")?;
    let status_arg = args
        .windows(2)
        .find(|w| w[0] == "--status")
        .map(|w| w[1].as_str())
        .unwrap_or("Stayed");
    let pretty = args.iter().any(|a| a == "--pretty");

    let statuses = parse_status_list(status_arg)?;

    let table = CustomerTable::from_csv_path(Path::new(&data))
        .with_context(|| format!("failed to load {data}"))?;
    log::info!("{}: {} rows", data, table.len());

    let mut cache = AggregateCache::new();
    let report = DashboardReport::build(&table, &statuses, &mut cache)?;

    let out = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");

    Ok(())
}

/// Parse a comma-separated status selection, e.g. "Stayed,Joined".
/// An empty selection is allowed; the demographic section then reports
/// zero/empty results.
fn parse_status_list(raw: &str) -> Result<Vec<CustomerStatus>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| CustomerStatus::from_str(s).map_err(anyhow::Error::from))
        .collect()
}
