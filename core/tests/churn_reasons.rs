use churn_desk_core::churn_reason::churn_reason_breakdown;
use churn_desk_core::dataset::CustomerTable;
use churn_desk_core::record::{CustomerRecord, CustomerStatus, Gender, Married};
use std::collections::HashMap;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn churned(id: &str, category: &str, reason: &str) -> CustomerRecord {
    CustomerRecord {
        customer_id: id.into(),
        gender: Gender::Female,
        age: 35,
        married: Married::No,
        customer_status: CustomerStatus::Churned,
        churn_category: Some(category.into()),
        churn_reason: Some(reason.into()),
        total_revenue: 0,
        contract: "Month-to-Month".into(),
        internet_type: None,
    }
}

fn stayed(id: &str) -> CustomerRecord {
    CustomerRecord {
        customer_id: id.into(),
        gender: Gender::Male,
        age: 35,
        married: Married::Yes,
        customer_status: CustomerStatus::Stayed,
        churn_category: None,
        churn_reason: None,
        total_revenue: 0,
        contract: "Two Year".into(),
        internet_type: None,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The worked example: three churned Competitor rows with reasons
/// "Better Device" (2 customers) and "Better Offer" (1). The category
/// totals 3, "Better Device" is flagged largest, and the single-reason
/// "Attitude" category sorts ahead of it.
#[test]
fn competitor_example_scenario() {
    let table = CustomerTable::from_records(vec![
        churned("c1", "Competitor", "Better Device"),
        churned("c2", "Competitor", "Better Device"),
        churned("c3", "Competitor", "Better Offer"),
        churned("c4", "Attitude", "Attitude of support person"),
    ]);

    let rows = churn_reason_breakdown(&table).unwrap();

    assert_eq!(rows.len(), 3);
    // Smallest category first.
    assert_eq!(rows[0].churn_category, "Attitude");
    assert_eq!(rows[0].count_in_category, 1);

    let device = rows
        .iter()
        .find(|r| r.churn_reason == "Better Device")
        .unwrap();
    assert_eq!(device.count_in_reason, 2);
    assert_eq!(device.count_in_category, 3);
    assert!(device.is_largest);
    assert_eq!(device.label, "Better Device (2)");

    let offer = rows
        .iter()
        .find(|r| r.churn_reason == "Better Offer")
        .unwrap();
    assert_eq!(offer.count_in_category, 3);
    assert!(!offer.is_largest);
}

/// For every category, the reason counts sum to the category count.
#[test]
fn category_totals_are_sums_of_reason_counts() {
    let table = CustomerTable::from_records(vec![
        churned("c1", "Competitor", "Better Device"),
        churned("c2", "Competitor", "Better Offer"),
        churned("c3", "Competitor", "Better Offer"),
        churned("c4", "Price", "Too expensive"),
        churned("c5", "Price", "Price increase"),
        churned("c6", "Dissatisfaction", "Network reliability"),
    ]);

    let rows = churn_reason_breakdown(&table).unwrap();

    let mut sums: HashMap<&str, u64> = HashMap::new();
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for row in &rows {
        *sums.entry(row.churn_category.as_str()).or_default() += row.count_in_reason;
        totals.insert(row.churn_category.as_str(), row.count_in_category);
    }

    for (category, total) in &totals {
        assert_eq!(sums[category], *total, "category {category}");
    }
}

/// Exactly one reason per category carries the largest flag, and it has
/// the maximum count within that category.
#[test]
fn exactly_one_largest_per_category() {
    let table = CustomerTable::from_records(vec![
        churned("c1", "Competitor", "Better Device"),
        churned("c2", "Competitor", "Better Device"),
        churned("c3", "Competitor", "Better Offer"),
        churned("c4", "Price", "Too expensive"),
        churned("c5", "Price", "Too expensive"),
        churned("c6", "Price", "Price increase"),
        churned("c7", "Dissatisfaction", "Network reliability"),
    ]);

    let rows = churn_reason_breakdown(&table).unwrap();

    let mut flagged: HashMap<&str, u64> = HashMap::new();
    for row in rows.iter().filter(|r| r.is_largest) {
        *flagged.entry(row.churn_category.as_str()).or_default() += 1;

        let max_in_category = rows
            .iter()
            .filter(|r| r.churn_category == row.churn_category)
            .map(|r| r.count_in_reason)
            .max()
            .unwrap();
        assert_eq!(row.count_in_reason, max_in_category);
    }

    for category in ["Competitor", "Price", "Dissatisfaction"] {
        assert_eq!(flagged.get(category), Some(&1), "category {category}");
    }
}

/// Tie on the maximum count: the first-encountered reason (row order,
/// not alphabetical) wins the flag. This pins down an accepted
/// ambiguity, not a business rule.
#[test]
fn largest_tie_broken_by_first_encountered_row_order() {
    let table = CustomerTable::from_records(vec![
        churned("c1", "Competitor", "Zebra plan"),
        churned("c2", "Competitor", "Alpha plan"),
    ]);

    let rows = churn_reason_breakdown(&table).unwrap();

    let zebra = rows.iter().find(|r| r.churn_reason == "Zebra plan").unwrap();
    let alpha = rows.iter().find(|r| r.churn_reason == "Alpha plan").unwrap();
    assert!(zebra.is_largest, "first-encountered reason should win the tie");
    assert!(!alpha.is_largest);
}

/// Rows come back ascending by (category total, reason count) so the
/// bar chart reads smallest to largest.
#[test]
fn rows_sorted_ascending_by_category_then_reason_count() {
    let table = CustomerTable::from_records(vec![
        churned("c1", "Competitor", "Better Device"),
        churned("c2", "Competitor", "Better Device"),
        churned("c3", "Competitor", "Better Offer"),
        churned("c4", "Price", "Too expensive"),
        churned("c5", "Dissatisfaction", "Network reliability"),
        churned("c6", "Dissatisfaction", "Network reliability"),
    ]);

    let rows = churn_reason_breakdown(&table).unwrap();

    let keys: Vec<(u64, u64)> = rows
        .iter()
        .map(|r| (r.count_in_category, r.count_in_reason))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    // Largest category lands last.
    assert_eq!(rows.last().unwrap().churn_category, "Competitor");
}

/// Rows without both churn fields are outside the input contract and
/// are skipped, so a mixed table only ranks the churned subset.
#[test]
fn rows_without_category_or_reason_are_skipped() {
    let mut partial = churned("c3", "Price", "Too expensive");
    partial.churn_reason = None;

    let table = CustomerTable::from_records(vec![
        stayed("c1"),
        churned("c2", "Competitor", "Better Device"),
        partial,
    ]);

    let rows = churn_reason_breakdown(&table).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].churn_category, "Competitor");
}

/// Reason counts are distinct customer counts: the same customer listed
/// twice under one reason counts once.
#[test]
fn reason_counts_are_distinct_customers() {
    let table = CustomerTable::from_records(vec![
        churned("c1", "Competitor", "Better Device"),
        churned("c1", "Competitor", "Better Device"),
        churned("c2", "Competitor", "Better Device"),
    ]);

    let rows = churn_reason_breakdown(&table).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].count_in_reason, 2);
    assert_eq!(rows[0].count_in_category, 2);
}

/// A table with no churned rows yields an empty breakdown, not an error.
#[test]
fn no_churned_rows_yields_empty_breakdown() {
    let table = CustomerTable::from_records(vec![stayed("c1"), stayed("c2")]);

    let rows = churn_reason_breakdown(&table).unwrap();

    assert!(rows.is_empty());
}
