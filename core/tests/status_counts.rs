use churn_desk_core::dataset::CustomerTable;
use churn_desk_core::error::ChurnError;
use churn_desk_core::record::{CustomerRecord, CustomerStatus, Gender, Married};
use churn_desk_core::status::status_counts;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn rec(id: &str, status: CustomerStatus) -> CustomerRecord {
    CustomerRecord {
        customer_id: id.into(),
        gender: Gender::Male,
        age: 40,
        married: Married::No,
        customer_status: status,
        churn_category: None,
        churn_reason: None,
        total_revenue: 0,
        contract: "Month-to-Month".into(),
        internet_type: None,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Sum of the per-status counts equals the distinct customer total.
#[test]
fn counts_sum_to_distinct_customers() {
    let table = CustomerTable::from_records(vec![
        rec("c1", CustomerStatus::Churned),
        rec("c2", CustomerStatus::Stayed),
        rec("c3", CustomerStatus::Stayed),
        rec("c4", CustomerStatus::Joined),
    ]);

    let counts = status_counts(&table);

    assert_eq!(counts.total(), table.distinct_customers());
    assert_eq!(counts.total(), 4);
}

/// Counting is per distinct customer id, so a duplicated row only
/// contributes once.
#[test]
fn duplicate_rows_count_once() {
    let table = CustomerTable::from_records(vec![
        rec("c1", CustomerStatus::Stayed),
        rec("c1", CustomerStatus::Stayed),
        rec("c2", CustomerStatus::Churned),
    ]);

    let counts = status_counts(&table);

    assert_eq!(counts.count_of(CustomerStatus::Stayed).unwrap(), 1);
    assert_eq!(counts.count_of(CustomerStatus::Churned).unwrap(), 1);
}

/// Same rows in a different order produce the same counts.
#[test]
fn result_is_independent_of_row_order() {
    let mut rows = vec![
        rec("c1", CustomerStatus::Churned),
        rec("c2", CustomerStatus::Stayed),
        rec("c3", CustomerStatus::Joined),
        rec("c4", CustomerStatus::Stayed),
    ];
    let forward = status_counts(&CustomerTable::from_records(rows.clone()));
    rows.reverse();
    let backward = status_counts(&CustomerTable::from_records(rows));

    for status in CustomerStatus::ALL {
        assert_eq!(forward.get(status), backward.get(status));
    }
}

/// `summary` exposes the three headline scalars via key lookups.
#[test]
fn summary_reports_the_three_headline_scalars() {
    let table = CustomerTable::from_records(vec![
        rec("c1", CustomerStatus::Churned),
        rec("c2", CustomerStatus::Churned),
        rec("c3", CustomerStatus::Stayed),
        rec("c4", CustomerStatus::Stayed),
        rec("c5", CustomerStatus::Stayed),
        rec("c6", CustomerStatus::Joined),
    ]);

    let summary = status_counts(&table).summary().unwrap();

    assert_eq!(summary.churned, 2);
    assert_eq!(summary.stayed, 3);
    assert_eq!(summary.joined, 1);
}

/// A status absent from the data is a data-quality error carrying the
/// offending key, not a panic.
#[test]
fn absent_status_is_a_missing_category_error() {
    let table = CustomerTable::from_records(vec![
        rec("c1", CustomerStatus::Stayed),
        rec("c2", CustomerStatus::Churned),
    ]);

    let counts = status_counts(&table);

    match counts.count_of(CustomerStatus::Joined) {
        Err(ChurnError::MissingCategory { kind, key }) => {
            assert_eq!(kind, "customer status");
            assert_eq!(key, "Joined");
        }
        other => panic!("expected MissingCategory, got {other:?}"),
    }

    assert!(counts.summary().is_err());
}
