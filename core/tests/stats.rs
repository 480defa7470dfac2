//! Stats aggregator tests — counts, category breakdowns, rounding.

use chrono::{DateTime, Utc};
use hosteldesk_core::{
    actor::UserRef,
    complaint::{Category, ComplaintRecord, Priority, Status},
    stats::aggregate,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn complaint(id: &str, category: Category, status: Status) -> ComplaintRecord {
    ComplaintRecord {
        complaint_id: id.to_string(),
        student: UserRef {
            id: "s1".to_string(),
            name: "Student One".to_string(),
        },
        title: format!("Complaint {id}"),
        description: "details".to_string(),
        category,
        priority: Priority::Medium,
        status,
        admin_remark: None,
        hostel_block: "A".to_string(),
        room_number: "A-101".to_string(),
        created_at: ts("2026-03-01T08:00:00Z"),
        resolved_at: None,
        resolved_by: None,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Status counts partition the input: they always sum to the total.
#[test]
fn status_counts_partition_total() {
    let complaints = vec![
        complaint("c1", Category::Plumbing, Status::Pending),
        complaint("c2", Category::Cleaning, Status::Pending),
        complaint("c3", Category::Electrical, Status::InProgress),
        complaint("c4", Category::Plumbing, Status::Resolved),
        complaint("c5", Category::Security, Status::Rejected),
    ];

    let stats = aggregate(&complaints);
    assert_eq!(stats.total, 5);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.resolved, 1);
    assert_eq!(stats.rejected, 1);
    assert_eq!(
        stats.pending + stats.in_progress + stats.resolved + stats.rejected,
        stats.total,
    );

    let category_sum: usize = stats.by_category.iter().map(|s| s.count).sum();
    assert_eq!(category_sum, stats.total);
}

/// Two Plumbing and one Electrical: Plumbing leads at 67%, Electrical
/// trails at 33%. Each slice rounds independently.
#[test]
fn category_breakdown_rounds_per_slice() {
    let complaints = vec![
        complaint("c1", Category::Plumbing, Status::Pending),
        complaint("c2", Category::Plumbing, Status::Resolved),
        complaint("c3", Category::Electrical, Status::Pending),
    ];

    let stats = aggregate(&complaints);
    assert_eq!(stats.by_category.len(), 2);

    assert_eq!(stats.by_category[0].category, Category::Plumbing);
    assert_eq!(stats.by_category[0].count, 2);
    assert_eq!(stats.by_category[0].percentage, 67);

    assert_eq!(stats.by_category[1].category, Category::Electrical);
    assert_eq!(stats.by_category[1].count, 1);
    assert_eq!(stats.by_category[1].percentage, 33);

    // Independent rounding: 67 + 33 happens to hit 100 here, but the
    // aggregator never rebalances slices to force that.
    let pct_sum: u32 = stats.by_category.iter().map(|s| s.percentage).sum();
    assert_eq!(pct_sum, 100);
}

/// Three categories at 1/3 each: every slice says 33 and the sum is 99.
/// That shortfall is the documented behavior, not a bug to correct.
#[test]
fn percentages_may_not_sum_to_100() {
    let complaints = vec![
        complaint("c1", Category::Plumbing, Status::Pending),
        complaint("c2", Category::Electrical, Status::Pending),
        complaint("c3", Category::Cleaning, Status::Pending),
    ];

    let stats = aggregate(&complaints);
    let pct_sum: u32 = stats.by_category.iter().map(|s| s.percentage).sum();
    assert_eq!(pct_sum, 99);
}

/// Equal counts fall back to category name order, so breakdowns are
/// stable run to run.
#[test]
fn category_ties_order_by_name() {
    let complaints = vec![
        complaint("c1", Category::Security, Status::Pending),
        complaint("c2", Category::Cleaning, Status::Pending),
        complaint("c3", Category::Electrical, Status::Pending),
    ];

    let stats = aggregate(&complaints);
    let names: Vec<&str> = stats
        .by_category
        .iter()
        .map(|s| s.category.as_str())
        .collect();
    assert_eq!(names, vec!["Cleaning", "Electrical", "Security"]);
}

/// Empty input produces zeroes and an empty breakdown — never an error,
/// so dashboards render a clean "no data" state.
#[test]
fn empty_input_yields_zeroes() {
    let stats = aggregate(&[]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.in_progress, 0);
    assert_eq!(stats.resolved, 0);
    assert_eq!(stats.rejected, 0);
    assert!(stats.by_category.is_empty());
}
