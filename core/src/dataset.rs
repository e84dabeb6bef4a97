//! CSV ingestion and the in-memory customer table.
//!
//! The table is loaded once and treated as read-only from then on:
//! filtering produces a new table, never a mutation of the original.

use crate::error::ChurnResult;
use crate::record::{CustomerRecord, CustomerStatus};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

pub struct CustomerTable {
    records: Vec<CustomerRecord>,
}

impl CustomerTable {
    pub fn from_records(records: Vec<CustomerRecord>) -> Self {
        Self { records }
    }

    /// Load the table from a CSV file on disk.
    pub fn from_csv_path(path: &Path) -> ChurnResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        Self::load(reader)
    }

    /// Load the table from any CSV byte stream (used by tests).
    pub fn from_csv_reader<R: Read>(source: R) -> ChurnResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self::load(reader)
    }

    fn load<R: Read>(mut reader: csv::Reader<R>) -> ChurnResult<Self> {
        // Preprocessing contract: headers are lower-cased and spaces
        // become underscores before serde sees the rows. Columns with no
        // matching record field (zip_code, latitude, longitude, ...) are
        // ignored by deserialization.
        let normalized: csv::StringRecord = reader
            .headers()?
            .iter()
            .map(normalize_header)
            .collect();
        reader.set_headers(normalized);

        let mut records = Vec::new();
        for row in reader.deserialize::<CustomerRecord>() {
            records.push(row?);
        }

        let distinct = distinct_ids(&records);
        if distinct < records.len() as u64 {
            log::warn!(
                "loaded {} rows but only {} distinct customer ids; duplicates will be deduped in distinct counts",
                records.len(),
                distinct,
            );
        }
        log::info!("loaded {} customer rows", records.len());

        Ok(Self { records })
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count of distinct `customer_id` values.
    pub fn distinct_customers(&self) -> u64 {
        distinct_ids(&self.records)
    }

    /// New table holding only the rows whose status is in `statuses`.
    /// An empty selection yields an empty table; downstream aggregators
    /// degrade to zero/empty results rather than failing on it.
    pub fn filter_by_status(&self, statuses: &[CustomerStatus]) -> CustomerTable {
        let records = self
            .records
            .iter()
            .filter(|r| statuses.contains(&r.customer_status))
            .cloned()
            .collect();
        CustomerTable { records }
    }
}

fn normalize_header(name: &str) -> String {
    name.to_ascii_lowercase().replace(' ', "_")
}

fn distinct_ids(records: &[CustomerRecord]) -> u64 {
    records
        .iter()
        .map(|r| r.customer_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64
}
